//! # debt-graph
//!
//! Tracks who owes whom how much and answers three questions about the
//! resulting network of loans:
//!
//! - which small set of net payments settles every debt,
//! - what one participant owes another once everything is settled,
//! - which participant reaches everybody else along the cheapest paths.
//!
//! ## Architecture
//!
//! - **core** — Participants, amounts, transactions, net balances, errors
//! - **graph** — Weighted adjacency, graph instances, shortest paths, DOT export
//! - **optimization** — Greedy net-debt settlement and path centrality
//! - **simulation** — Random network generation for demos and benchmarks
//! - **book** — The validating boundary that keeps the raw and settled views

pub mod book;
pub mod core;
pub mod graph;
pub mod optimization;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::book::{GraphView, LoanBook};
    pub use crate::core::amount::EPSILON;
    pub use crate::core::error::LoanError;
    pub use crate::core::participant::ParticipantId;
    pub use crate::graph::debt_graph::DebtGraph;
    pub use crate::optimization::centrality::Influence;
    pub use crate::optimization::settlement::{SettlementEngine, SettlementSummary};
    pub use crate::simulation::random_network::RandomNetworkConfig;
}
