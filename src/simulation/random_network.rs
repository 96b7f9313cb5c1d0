//! Random loan networks for demos and benchmarks.
//!
//! The engine itself is deterministic; randomness lives here and reaches the
//! book only through its normal `add_participant` / `record_debt` calls.

use crate::book::LoanBook;
use crate::core::error::{LoanError, Result};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Names handed out to generated participants, in order.
pub static NAME_POOL: [&str; 26] = [
    "Alice", "Bob", "Charlie", "David", "Eve", "Frank", "Grace", "Heidi", "Ivan", "Julia",
    "Kevin", "Laura", "Mike", "Nancy", "Oscar", "Patricia", "Quinn", "Rachel", "Sam", "Tina",
    "Ursula", "Victor", "Whitney", "Xavier", "Yvonne", "Zack",
];

/// Shape of a generated network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomNetworkConfig {
    /// Number of participants, capped at the size of [`NAME_POOL`].
    pub participant_count: usize,
    /// Number of loans to record.
    pub debt_count: usize,
    /// Smallest loan amount (whole dollars).
    pub min_amount: u64,
    /// Largest loan amount (whole dollars, inclusive).
    pub max_amount: u64,
}

impl Default for RandomNetworkConfig {
    fn default() -> Self {
        Self {
            participant_count: 5,
            debt_count: 8,
            min_amount: 50,
            max_amount: 500,
        }
    }
}

impl RandomNetworkConfig {
    /// The participant names this config will use.
    pub fn names(&self) -> &'static [&'static str] {
        &NAME_POOL[..self.participant_count.min(NAME_POOL.len())]
    }

    pub fn validate(&self) -> Result<()> {
        if self.names().len() < 2 {
            return Err(LoanError::InvalidConfig(format!(
                "need at least 2 participants, got {}",
                self.participant_count
            )));
        }
        if self.min_amount == 0 {
            return Err(LoanError::InvalidConfig("min_amount must be positive".into()));
        }
        if self.min_amount > self.max_amount {
            return Err(LoanError::InvalidConfig(format!(
                "min_amount {} exceeds max_amount {}",
                self.min_amount, self.max_amount
            )));
        }
        Ok(())
    }
}

/// Reset `book` and fill it with a random network shaped by `config`.
///
/// The book is left untouched if `config` is invalid.
pub fn populate<R: Rng + ?Sized>(
    book: &mut LoanBook,
    config: &RandomNetworkConfig,
    rng: &mut R,
) -> Result<()> {
    config.validate()?;
    book.reset();

    let names = config.names();
    for name in names {
        book.add_participant(name)?;
    }

    for _ in 0..config.debt_count {
        let u = rng.gen_range(0..names.len());
        let mut v = rng.gen_range(0..names.len());
        while v == u {
            v = rng.gen_range(0..names.len());
        }
        let amount = Decimal::from(rng.gen_range(config.min_amount..=config.max_amount));
        book.record_debt(names[u], names[v], amount)?;
    }

    log::info!(
        "generated {} participants and {} loans",
        names.len(),
        config.debt_count
    );
    Ok(())
}
