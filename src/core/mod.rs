pub mod amount;
pub mod error;
pub mod ledger;
pub mod participant;
pub mod transaction;
