//! The boundary callers talk to.
//!
//! A [`LoanBook`] owns the canonical transaction log and the raw graph
//! accumulated from it. The simplified graph is never edited directly: it is
//! re-derived from the raw graph after every mutation, so the two views can
//! not drift apart.
//!
//! Unlike the graph primitives, the book validates its input and reports
//! rejected calls as [`LoanError`]s. Names are trimmed on every entry point,
//! so `" Alice "` and `"Alice"` are the same participant.
//!
//! The sum of all recorded amounts always fits in a [`Decimal`]. Every edge
//! weight, balance and settlement amount is bounded by that sum, so deriving
//! the views can not overflow.

use crate::core::error::{LoanError, Result};
use crate::core::participant::ParticipantId;
use crate::core::transaction::{Transaction, TransactionLog};
use crate::graph::debt_graph::{DebtGraph, GraphNode, GraphSnapshot, NamedDebt};
use crate::graph::dot::to_dot;
use crate::optimization::centrality::{most_influential, Influence};
use crate::optimization::settlement::{SettlementEngine, SettlementSummary};
use crate::simulation::random_network::{self, RandomNetworkConfig};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which graph instance a query reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphView {
    /// Every loan as recorded.
    Raw,
    /// The settlement derived from net balances.
    Simplified,
}

/// Everything a front end needs to draw both views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub users: Vec<GraphNode>,
    pub raw_graph: GraphSnapshot,
    pub simplified_graph: GraphSnapshot,
    pub transactions: Vec<Transaction>,
}

/// Ledger of who lent whom how much, with its settled view.
///
/// # Examples
///
/// ```
/// use debt_graph::book::LoanBook;
/// use rust_decimal_macros::dec;
///
/// let mut book = LoanBook::new();
/// book.record_debt("Alice", "Bob", dec!(100)).unwrap();
/// book.record_debt("Bob", "Carol", dec!(100)).unwrap();
///
/// // Bob's debts pass straight through: Carol owes Alice directly.
/// assert_eq!(book.lookup_debt("Alice", "Carol").unwrap(), Some(dec!(100)));
/// assert_eq!(book.lookup_debt("Alice", "Bob").unwrap(), None);
///
/// assert!(book.record_debt("Alice", "Alice", dec!(5)).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoanBook {
    raw: DebtGraph,
    simplified: DebtGraph,
    log: TransactionLog,
}

impl LoanBook {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Mutations ---

    /// Register a participant. Adding an existing name returns its id and
    /// changes nothing.
    pub fn add_participant(&mut self, name: &str) -> Result<ParticipantId> {
        let name = validate_name(name)?;
        let id = self.raw.add_participant(name);
        log::debug!("participant {} is {}", name, id);
        self.rebuild();
        Ok(id)
    }

    /// Remove a participant, every edge touching it and every transaction
    /// naming it. Returns `None` if the name is unknown.
    pub fn remove_participant(&mut self, name: &str) -> Option<ParticipantId> {
        let name = name.trim();
        let id = self.raw.remove_participant(name)?;
        let dropped = self.log.remove_participant(name);
        log::debug!("removed participant {} ({}), dropped {} transactions", name, id, dropped);
        self.rebuild();
        Some(id)
    }

    /// Record that `lender` lent `borrower` `amount`.
    ///
    /// Unknown names are registered on the fly. Self-loans, non-positive
    /// amounts and empty names are rejected, as is an amount that would push
    /// the book's total past [`Decimal::MAX`].
    pub fn record_debt(
        &mut self,
        lender: &str,
        borrower: &str,
        amount: Decimal,
    ) -> Result<&Transaction> {
        let lender = validate_name(lender)?;
        let borrower = validate_name(borrower)?;
        if lender == borrower {
            log::warn!("rejected self-loan for {}", lender);
            return Err(LoanError::SelfLoan(lender.to_string()));
        }
        if amount <= Decimal::ZERO {
            log::warn!(
                "rejected non-positive amount {} from {} to {}",
                amount,
                lender,
                borrower
            );
            return Err(LoanError::NonPositiveAmount(amount));
        }
        if self.log.gross_total().checked_add(amount).is_none() {
            log::warn!(
                "rejected amount {} from {} to {}: total overflow",
                amount,
                lender,
                borrower
            );
            return Err(LoanError::AmountOverflow(amount));
        }

        self.raw.add_loan(lender, borrower, amount);
        self.rebuild();
        let tx = self.log.record(lender, borrower, amount);
        log::debug!("recorded transaction {}: {} lent {} {}", tx.id(), lender, borrower, amount);
        Ok(tx)
    }

    /// Replace the whole book with a random network.
    pub fn populate_random<R: rand::Rng + ?Sized>(
        &mut self,
        config: &RandomNetworkConfig,
        rng: &mut R,
    ) -> Result<()> {
        random_network::populate(self, config, rng)
    }

    /// Forget every participant, edge and transaction.
    pub fn reset(&mut self) {
        self.raw.reset();
        self.simplified.reset();
        self.log.clear();
        log::info!("loan book reset");
    }

    // --- Queries ---

    /// Live participants in discovery order.
    pub fn participants(&self) -> Vec<GraphNode> {
        self.raw
            .participants()
            .map(|(id, name)| GraphNode {
                id,
                name: name.to_string(),
            })
            .collect()
    }

    pub fn participant_id(&self, name: &str) -> Option<ParticipantId> {
        self.raw.id_of(name.trim())
    }

    pub fn participant_name(&self, id: ParticipantId) -> Option<&str> {
        self.raw.name_of(id)
    }

    pub fn raw_edges(&self) -> Vec<NamedDebt> {
        self.raw.named_edges()
    }

    pub fn simplified_edges(&self) -> Vec<NamedDebt> {
        self.simplified.named_edges()
    }

    pub fn graph(&self, view: GraphView) -> &DebtGraph {
        match view {
            GraphView::Raw => &self.raw,
            GraphView::Simplified => &self.simplified,
        }
    }

    /// What `borrower` owes `lender` after settlement.
    ///
    /// `Ok(None)` means both are known but nothing is owed in that direction.
    pub fn lookup_debt(&self, lender: &str, borrower: &str) -> Result<Option<Decimal>> {
        self.lookup_in(GraphView::Simplified, lender, borrower)
    }

    /// What `borrower` owes `lender` before settlement.
    pub fn raw_debt(&self, lender: &str, borrower: &str) -> Result<Option<Decimal>> {
        self.lookup_in(GraphView::Raw, lender, borrower)
    }

    fn lookup_in(
        &self,
        view: GraphView,
        lender: &str,
        borrower: &str,
    ) -> Result<Option<Decimal>> {
        let (lender, borrower) = (lender.trim(), borrower.trim());
        for name in [lender, borrower] {
            if self.raw.id_of(name).is_none() {
                return Err(LoanError::UnknownParticipant(name.to_string()));
            }
        }
        Ok(self.graph(view).lookup_debt(lender, borrower))
    }

    /// The participant with the cheapest average outward path in the raw
    /// graph, or `None` if nobody reaches anybody.
    pub fn most_influential(&self) -> Option<Influence> {
        most_influential(&self.raw)
    }

    pub fn export_dot(&self, view: GraphView) -> String {
        to_dot(self.graph(view))
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.log.transactions()
    }

    pub fn settlement_summary(&self) -> SettlementSummary {
        SettlementEngine::summarize(&self.raw, &self.simplified)
    }

    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            users: self.participants(),
            raw_graph: self.raw.snapshot(),
            simplified_graph: self.simplified.snapshot(),
            transactions: self.log.transactions().to_vec(),
        }
    }

    fn rebuild(&mut self) {
        self.simplified = SettlementEngine::simplify(&self.raw);
    }
}

/// Trimmed `name`, or [`LoanError::EmptyName`] if nothing is left.
fn validate_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LoanError::EmptyName);
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_record_debt_validation() {
        let mut book = LoanBook::new();
        assert_eq!(
            book.record_debt("A", "A", dec!(10)).unwrap_err(),
            LoanError::SelfLoan("A".into())
        );
        assert_eq!(
            book.record_debt("A", "B", Decimal::ZERO).unwrap_err(),
            LoanError::NonPositiveAmount(Decimal::ZERO)
        );
        assert_eq!(
            book.record_debt("A", "B", dec!(-3)).unwrap_err(),
            LoanError::NonPositiveAmount(dec!(-3))
        );
        assert_eq!(book.record_debt(" ", "B", dec!(1)).unwrap_err(), LoanError::EmptyName);

        // Nothing leaked into the graph
        assert!(book.participants().is_empty());
        assert!(book.transactions().is_empty());
    }

    #[test]
    fn test_record_debt_returns_transaction() {
        let mut book = LoanBook::new();
        let tx = book.record_debt("A", "B", dec!(10)).unwrap();
        assert_eq!(tx.id(), 1);
        assert_eq!(tx.amount(), dec!(10));
        let tx = book.record_debt("B", "C", dec!(5)).unwrap();
        assert_eq!(tx.id(), 2);
    }

    #[test]
    fn test_add_participant() {
        let mut book = LoanBook::new();
        assert_eq!(book.add_participant("A").unwrap(), ParticipantId::new(0));
        assert_eq!(book.add_participant("A").unwrap(), ParticipantId::new(0));
        assert_eq!(book.add_participant("").unwrap_err(), LoanError::EmptyName);
        assert_eq!(book.participants().len(), 1);
    }

    #[test]
    fn test_views_differ() {
        let mut book = LoanBook::new();
        book.record_debt("A", "B", dec!(100)).unwrap();
        book.record_debt("B", "C", dec!(100)).unwrap();

        assert_eq!(book.raw_debt("A", "B").unwrap(), Some(dec!(100)));
        assert_eq!(book.lookup_debt("A", "B").unwrap(), None);
        assert_eq!(book.raw_edges().len(), 2);
        assert_eq!(book.simplified_edges().len(), 1);
    }

    #[test]
    fn test_lookup_unknown_participant_is_an_error() {
        let mut book = LoanBook::new();
        book.record_debt("A", "B", dec!(1)).unwrap();
        assert_eq!(
            book.lookup_debt("A", "Zed").unwrap_err(),
            LoanError::UnknownParticipant("Zed".into())
        );
        assert_eq!(book.lookup_debt("B", "A").unwrap(), None);
    }

    #[test]
    fn test_overflowing_amount_is_rejected_before_mutation() {
        let mut book = LoanBook::new();
        book.record_debt("A", "B", Decimal::MAX).unwrap();

        assert_eq!(
            book.record_debt("A", "B", Decimal::MAX).unwrap_err(),
            LoanError::AmountOverflow(Decimal::MAX)
        );
        assert_eq!(
            book.record_debt("C", "B", dec!(1)).unwrap_err(),
            LoanError::AmountOverflow(dec!(1))
        );

        assert_eq!(book.transactions().len(), 1);
        assert_eq!(book.participant_id("C"), None);
        assert_eq!(book.raw_debt("A", "B").unwrap(), Some(Decimal::MAX));
        assert_eq!(book.lookup_debt("A", "B").unwrap(), Some(Decimal::MAX));
        assert_eq!(book.settlement_summary().savings_percent(), 0.0);
    }

    #[test]
    fn test_padded_names_reach_the_same_participant() {
        let mut book = LoanBook::new();
        book.record_debt(" Alice ", "Bob", dec!(10)).unwrap();

        assert_eq!(book.participants()[0].name, "Alice");
        assert_eq!(book.participant_id(" Alice "), Some(ParticipantId::new(0)));
        assert_eq!(book.lookup_debt(" Alice ", "Bob").unwrap(), Some(dec!(10)));
        assert_eq!(book.raw_debt("Alice", " Bob").unwrap(), Some(dec!(10)));

        assert_eq!(book.remove_participant(" Alice "), Some(ParticipantId::new(0)));
        assert!(book.transactions().is_empty());
        assert_eq!(book.participant_id("Alice"), None);
    }

    #[test]
    fn test_remove_unknown_participant() {
        let mut book = LoanBook::new();
        assert_eq!(book.remove_participant("ghost"), None);
    }

    #[test]
    fn test_remove_participant_drops_transactions() {
        let mut book = LoanBook::new();
        book.record_debt("A", "B", dec!(10)).unwrap();
        book.record_debt("C", "D", dec!(10)).unwrap();

        book.remove_participant("B");
        assert_eq!(book.transactions().len(), 1);
        assert_eq!(book.transactions()[0].lender(), "C");
    }

    #[test]
    fn test_reset() {
        let mut book = LoanBook::new();
        book.record_debt("A", "B", dec!(10)).unwrap();
        book.reset();

        assert!(book.participants().is_empty());
        assert!(book.transactions().is_empty());
        assert_eq!(book.export_dot(GraphView::Raw), "digraph LoanGraph {\n}\n");
        assert_eq!(book.record_debt("X", "Y", dec!(1)).unwrap().id(), 1);
        assert_eq!(book.participant_id("X"), Some(ParticipantId::new(0)));
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut book = LoanBook::new();
        book.record_debt("A", "B", dec!(10)).unwrap();
        let json = serde_json::to_value(book.snapshot()).unwrap();
        assert_eq!(json["users"][1]["name"], "B");
        assert_eq!(json["raw_graph"]["links"][0]["amount"], "10");
        assert_eq!(json["simplified_graph"]["links"][0]["target"], 1);
        assert_eq!(json["transactions"][0]["borrower"], "B");
    }

    #[test]
    fn test_graph_view_serde() {
        assert_eq!(serde_json::to_string(&GraphView::Raw).unwrap(), "\"raw\"");
        let view: GraphView = serde_json::from_str("\"simplified\"").unwrap();
        assert_eq!(view, GraphView::Simplified);
    }
}
