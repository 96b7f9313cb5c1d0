use crate::core::amount::{is_negligible, EPSILON};
use crate::core::ledger::NetBalances;
use crate::graph::adjacency::Edge;
use crate::graph::debt_graph::DebtGraph;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payments that settle a set of net balances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementPlan {
    /// Settlement edges in emission order, lender -> borrower.
    transfers: Vec<Edge>,
    /// Magnitude left unmatched when one side ran out. Zero for a
    /// consistent balance set, up to epsilon per participant otherwise.
    residual: Decimal,
}

impl SettlementPlan {
    pub fn transfers(&self) -> &[Edge] {
        &self.transfers
    }

    pub fn residual(&self) -> Decimal {
        self.residual
    }

    pub fn len(&self) -> usize {
        self.transfers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }

    pub fn total(&self) -> Decimal {
        self.transfers.iter().map(|t| t.amount).sum()
    }
}

/// Before/after comparison of a raw graph and its settlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementSummary {
    /// Sum of all raw edge weights.
    pub gross_total: Decimal,
    /// Sum of all simplified edge weights.
    pub settled_total: Decimal,
    pub raw_edge_count: usize,
    pub simplified_edge_count: usize,
}

impl SettlementSummary {
    /// Volume that no longer needs to move.
    pub fn savings(&self) -> Decimal {
        self.gross_total - self.settled_total
    }

    /// Savings as a percentage of gross.
    pub fn savings_percent(&self) -> f64 {
        if self.gross_total == Decimal::ZERO {
            return 0.0;
        }
        let pct = self.savings() / self.gross_total * Decimal::ONE_HUNDRED;
        pct.to_f64().unwrap_or(0.0)
    }

    /// Payments removed by settlement.
    pub fn edges_removed(&self) -> usize {
        self.raw_edge_count.saturating_sub(self.simplified_edge_count)
    }
}

impl std::fmt::Display for SettlementSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Settlement ===")?;
        writeln!(f, "Gross Total:    {}", self.gross_total)?;
        writeln!(f, "Settled Total:  {}", self.settled_total)?;
        writeln!(f, "Savings:        {}", self.savings())?;
        writeln!(f, "Savings %:      {:.1}%", self.savings_percent())?;
        writeln!(
            f,
            "Payments:       {} -> {}",
            self.raw_edge_count, self.simplified_edge_count
        )
    }
}

/// Net-debt simplification.
///
/// Collapses an arbitrary web of loans into a small set of one-directional
/// payments that leaves every participant's net position unchanged.
pub struct SettlementEngine;

impl SettlementEngine {
    /// Match net borrowers against net lenders.
    ///
    /// # Algorithm
    ///
    /// 1. Net lenders (balance > epsilon) and net borrowers (balance <
    ///    -epsilon) are listed in participant id order. Settled participants
    ///    are left out.
    /// 2. Two cursors walk the lists from the front. Each step moves
    ///    `min(borrower remaining, lender remaining)` and emits (or grows) a
    ///    lender -> borrower edge.
    /// 3. A cursor advances once its remaining amount is within epsilon of
    ///    zero. Both may advance on the same step.
    /// 4. Matching stops when either list runs out.
    ///
    /// Every step retires at least one participant, so the plan has at most
    /// `N - 1` edges for `N` unsettled participants. This is a greedy pass,
    /// not a minimum-transfer solver: the pairing follows id order.
    pub fn settle(balances: &NetBalances) -> SettlementPlan {
        let mut creditors = balances.creditors();
        let mut debtors = balances.debtors();
        let mut transfers: Vec<Edge> = Vec::new();

        let (mut i, mut j) = (0, 0);
        while i < debtors.len() && j < creditors.len() {
            let (borrower, owed) = debtors[i];
            let (lender, due) = creditors[j];
            let amount = owed.min(due);

            match transfers
                .iter_mut()
                .find(|t| t.lender == lender && t.borrower == borrower)
            {
                Some(existing) => existing.amount += amount,
                None => transfers.push(Edge {
                    lender,
                    borrower,
                    amount,
                }),
            }

            debtors[i].1 -= amount;
            creditors[j].1 -= amount;

            if is_negligible(debtors[i].1) {
                i += 1;
            }
            if is_negligible(creditors[j].1) {
                j += 1;
            }
        }

        let residual: Decimal = debtors[i.min(debtors.len())..]
            .iter()
            .chain(creditors[j.min(creditors.len())..].iter())
            .map(|(_, remaining)| *remaining)
            .filter(|remaining| !is_negligible(*remaining))
            .sum();

        let tolerance = EPSILON * Decimal::from(balances.iter().count().max(1));
        if residual > tolerance {
            log::error!(
                "settlement left {} unmatched (tolerance {}): lender and borrower totals disagree",
                residual,
                tolerance
            );
        }

        log::debug!(
            "settled {} borrowers against {} lenders with {} transfers",
            debtors.len(),
            creditors.len(),
            transfers.len()
        );

        SettlementPlan {
            transfers,
            residual,
        }
    }

    /// Derive the simplified view of `raw`.
    ///
    /// The result keeps `raw`'s participants and ids and replaces its edges
    /// with the settlement of their net balances. Pure: `raw` is untouched.
    pub fn simplify(raw: &DebtGraph) -> DebtGraph {
        let plan = Self::settle(&raw.net_balances());
        let mut simplified = DebtGraph::with_directory(raw.directory().clone());
        for t in plan.transfers() {
            simplified.add_edge_raw(t.lender, t.borrower, t.amount);
        }
        simplified
    }

    /// Compare a raw graph with its simplified view.
    pub fn summarize(raw: &DebtGraph, simplified: &DebtGraph) -> SettlementSummary {
        SettlementSummary {
            gross_total: raw.total_amount(),
            settled_total: simplified.total_amount(),
            raw_edge_count: raw.edge_count(),
            simplified_edge_count: simplified.edge_count(),
        }
    }
}
