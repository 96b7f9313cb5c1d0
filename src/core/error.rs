use rust_decimal::Decimal;
use thiserror::Error;

/// Result alias for operations on a [`LoanBook`](crate::book::LoanBook).
pub type Result<T> = std::result::Result<T, LoanError>;

/// Input rejected at the book boundary.
///
/// The graph primitives underneath silently skip bad input; the book checks
/// it up front and reports it so callers get an actionable error instead of
/// a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoanError {
    #[error("participant name must not be empty")]
    EmptyName,
    #[error("lender and borrower cannot be the same participant ({0})")]
    SelfLoan(String),
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),
    #[error("amount {0} would overflow the book's total")]
    AmountOverflow(Decimal),
    #[error("unknown participant: {0}")]
    UnknownParticipant(String),
    #[error("invalid network configuration: {0}")]
    InvalidConfig(String),
}
