use crate::core::amount::{is_negligible, EPSILON};
use crate::core::error::{LoanError, Result};
use crate::core::participant::ParticipantId;
use crate::graph::adjacency::Edge;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Net position of every participant touched by a set of loans.
///
/// A positive balance means the participant is owed money overall (net
/// lender). A negative balance means the participant owes money overall
/// (net borrower).
///
/// Balances are derived data: they are rebuilt from the edges every time the
/// simplified view is recomputed and never stored between rebuilds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetBalances {
    /// Ordered by id so iteration follows discovery order.
    balances: BTreeMap<ParticipantId, Decimal>,
}

impl NetBalances {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a set of debt edges into balances.
    ///
    /// An edge whose amount would overflow a balance is left out and logged.
    pub fn from_edges(edges: impl IntoIterator<Item = Edge>) -> Self {
        let mut balances = Self::new();
        for edge in edges {
            if let Err(e) = balances.apply_loan(edge.lender, edge.borrower, edge.amount) {
                log::error!(
                    "edge {} -> {} left out of balances: {}",
                    edge.lender,
                    edge.borrower,
                    e
                );
            }
        }
        balances
    }

    /// Apply a loan: the lender gains a claim, the borrower takes on the debt.
    ///
    /// Either both balances change or neither does.
    pub fn apply_loan(
        &mut self,
        lender: ParticipantId,
        borrower: ParticipantId,
        amount: Decimal,
    ) -> Result<()> {
        let credited = self.balance(lender).checked_add(amount);
        let debited = self.balance(borrower).checked_sub(amount);
        let (Some(credited), Some(debited)) = (credited, debited) else {
            return Err(LoanError::AmountOverflow(amount));
        };
        self.balances.insert(lender, credited);
        self.balances.insert(borrower, debited);
        Ok(())
    }

    /// Net balance of `id`; zero if it never appeared.
    pub fn balance(&self, id: ParticipantId) -> Decimal {
        self.balances.get(&id).copied().unwrap_or(Decimal::ZERO)
    }

    /// All balances in ascending id order, including settled ones.
    pub fn iter(&self) -> impl Iterator<Item = (ParticipantId, Decimal)> + '_ {
        self.balances.iter().map(|(&id, &amount)| (id, amount))
    }

    /// Net lenders (balance > epsilon) with their magnitude, in id order.
    pub fn creditors(&self) -> Vec<(ParticipantId, Decimal)> {
        self.iter().filter(|(_, b)| *b > EPSILON).collect()
    }

    /// Net borrowers (balance < -epsilon) with their magnitude, in id order.
    pub fn debtors(&self) -> Vec<(ParticipantId, Decimal)> {
        self.iter()
            .filter(|(_, b)| *b < -EPSILON)
            .map(|(id, b)| (id, -b))
            .collect()
    }

    /// Number of participants whose balance is not within epsilon of zero.
    pub fn unsettled_count(&self) -> usize {
        self.iter().filter(|(_, b)| !is_negligible(*b)).count()
    }

    /// Verify that balances sum to zero: every claim has a matching debt.
    pub fn is_balanced(&self) -> bool {
        let sum: Decimal = self.balances.values().sum();
        is_negligible(sum)
    }

    /// Total owed to net lenders (equivalently, total owed by net borrowers).
    /// This is the volume that still has to move to settle everything.
    pub fn total_outstanding(&self) -> Decimal {
        self.balances.values().filter(|b| **b > Decimal::ZERO).sum()
    }

    /// True if two balance sets agree for every participant within epsilon.
    pub fn matches(&self, other: &NetBalances) -> bool {
        self.balances
            .keys()
            .chain(other.balances.keys())
            .all(|&id| is_negligible(self.balance(id) - other.balance(id)))
    }
}
