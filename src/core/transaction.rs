use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single recorded loan: `borrower` now owes `lender` an extra `amount`.
///
/// Transactions are immutable once recorded. The log of transactions is the
/// canonical history of a [`LoanBook`](crate::book::LoanBook); both graph
/// views are derived from it.
///
/// # Examples
///
/// ```
/// use debt_graph::core::transaction::Transaction;
/// use rust_decimal_macros::dec;
///
/// let tx = Transaction::new(1, "Alice", "Bob", dec!(25));
/// assert_eq!(tx.lender(), "Alice");
/// assert_eq!(tx.borrower(), "Bob");
/// assert!(tx.involves("Bob"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Sequential identifier, starting at 1 for each fresh log.
    id: u64,
    /// The participant who lent the money.
    lender: String,
    /// The participant who owes it back.
    borrower: String,
    amount: Decimal,
    timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        id: u64,
        lender: impl Into<String>,
        borrower: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            id,
            lender: lender.into(),
            borrower: borrower.into(),
            amount,
            timestamp: Utc::now(),
        }
    }

    // --- Accessors ---

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn lender(&self) -> &str {
        &self.lender
    }

    pub fn borrower(&self) -> &str {
        &self.borrower
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// True if `name` is either side of this loan.
    pub fn involves(&self, name: &str) -> bool {
        self.lender == name || self.borrower == name
    }
}

/// Append-only history of recorded loans with sequential ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionLog {
    transactions: Vec<Transaction>,
    next_id: u64,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            next_id: 1,
        }
    }

    /// Append a loan, assigning it the next id.
    pub fn record(&mut self, lender: &str, borrower: &str, amount: Decimal) -> &Transaction {
        let tx = Transaction::new(self.next_id, lender, borrower, amount);
        self.next_id += 1;
        self.transactions.push(tx);
        &self.transactions[self.transactions.len() - 1]
    }

    /// Drop every transaction naming `name`. Returns how many were removed.
    pub fn remove_participant(&mut self, name: &str) -> usize {
        let before = self.transactions.len();
        self.transactions.retain(|tx| !tx.involves(name));
        before - self.transactions.len()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Sum of every recorded amount.
    pub fn gross_total(&self) -> Decimal {
        self.transactions.iter().map(|tx| tx.amount()).sum()
    }

    /// Empty the log and restart ids at 1.
    pub fn clear(&mut self) {
        self.transactions.clear();
        self.next_id = 1;
    }
}

impl Default for TransactionLog {
    fn default() -> Self {
        Self::new()
    }
}
