use crate::core::amount::EPSILON;
use crate::core::participant::ParticipantId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One aggregated debt: `borrower` owes `lender` `amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub lender: ParticipantId,
    pub borrower: ParticipantId,
    pub amount: Decimal,
}

/// Directed, weighted adjacency between participants.
///
/// Edges run lender -> borrower. Repeated loans between the same ordered
/// pair accumulate into one weight. A flat `(lender, borrower)` index sits
/// next to the nested map so point queries do not walk the adjacency.
///
/// The store is deliberately permissive: self-loans and non-positive
/// amounts are skipped without an error. Validation belongs to the caller.
#[derive(Debug, Clone, Default)]
pub struct WeightedAdjacency {
    /// lender -> borrower -> accumulated amount
    adj: BTreeMap<ParticipantId, BTreeMap<ParticipantId, Decimal>>,
    /// (lender, borrower) -> accumulated amount
    index: HashMap<(ParticipantId, ParticipantId), Decimal>,
}

impl WeightedAdjacency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to the lender -> borrower edge. No-op for self-loans,
    /// non-positive amounts and sums that would overflow.
    pub fn add_edge_raw(
        &mut self,
        lender: ParticipantId,
        borrower: ParticipantId,
        amount: Decimal,
    ) {
        if lender == borrower || amount <= Decimal::ZERO {
            return;
        }
        let current = self.index.get(&(lender, borrower)).copied();
        let Some(weight) = current.unwrap_or(Decimal::ZERO).checked_add(amount) else {
            log::warn!("skipped edge {} -> {}: weight overflow", lender, borrower);
            return;
        };
        self.adj.entry(lender).or_default().insert(borrower, weight);
        self.index.insert((lender, borrower), weight);
    }

    /// Accumulated amount on lender -> borrower, or `None` if absent or
    /// negligible.
    pub fn edge(&self, lender: ParticipantId, borrower: ParticipantId) -> Option<Decimal> {
        self.index
            .get(&(lender, borrower))
            .copied()
            .filter(|amount| *amount > EPSILON)
    }

    /// Every edge above epsilon, ordered by (lender, borrower).
    ///
    /// Each call starts a fresh pass over the current state.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.adj.iter().flat_map(|(&lender, row)| {
            row.iter()
                .filter(|(_, amount)| **amount > EPSILON)
                .map(move |(&borrower, &amount)| Edge {
                    lender,
                    borrower,
                    amount,
                })
        })
    }

    /// Outgoing (borrower, amount) pairs of `lender` above epsilon.
    pub fn neighbors(
        &self,
        lender: ParticipantId,
    ) -> impl Iterator<Item = (ParticipantId, Decimal)> + '_ {
        self.adj
            .get(&lender)
            .into_iter()
            .flat_map(|row| row.iter())
            .filter(|(_, amount)| **amount > EPSILON)
            .map(|(&borrower, &amount)| (borrower, amount))
    }

    /// Number of edges above epsilon.
    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Drop every edge where `id` is lender or borrower.
    pub fn remove_participant(&mut self, id: ParticipantId) {
        self.adj.remove(&id);
        for row in self.adj.values_mut() {
            row.remove(&id);
        }
        self.adj.retain(|_, row| !row.is_empty());
        self.index
            .retain(|&(lender, borrower), _| lender != id && borrower != id);
    }

    /// Drop all edges.
    pub fn clear(&mut self) {
        self.adj.clear();
        self.index.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn id(i: usize) -> ParticipantId {
        ParticipantId::new(i)
    }

    #[test]
    fn test_edge_aggregation() {
        let mut adj = WeightedAdjacency::new();
        adj.add_edge_raw(id(0), id(1), dec!(100));
        adj.add_edge_raw(id(0), id(1), dec!(50));

        assert_eq!(adj.edge(id(0), id(1)), Some(dec!(150)));
        assert_eq!(adj.edge(id(1), id(0)), None);
        assert_eq!(adj.edge_count(), 1);
    }

    #[test]
    fn test_invalid_edges_are_skipped() {
        let mut adj = WeightedAdjacency::new();
        adj.add_edge_raw(id(0), id(0), dec!(100));
        adj.add_edge_raw(id(0), id(1), Decimal::ZERO);
        adj.add_edge_raw(id(0), id(1), dec!(-5));

        assert_eq!(adj.edge_count(), 0);
        assert_eq!(adj.edge(id(0), id(0)), None);
    }

    #[test]
    fn test_overflowing_weight_is_skipped() {
        let mut adj = WeightedAdjacency::new();
        adj.add_edge_raw(id(0), id(1), Decimal::MAX);
        adj.add_edge_raw(id(0), id(1), dec!(1));

        assert_eq!(adj.edge(id(0), id(1)), Some(Decimal::MAX));
        assert_eq!(adj.edge_count(), 1);
    }

    #[test]
    fn test_negligible_edge_is_absent() {
        let mut adj = WeightedAdjacency::new();
        adj.add_edge_raw(id(0), id(1), dec!(0.0004));
        assert_eq!(adj.edge(id(0), id(1)), None);
        assert_eq!(adj.edges().count(), 0);
    }

    #[test]
    fn test_edges_ordered_and_restartable() {
        let mut adj = WeightedAdjacency::new();
        adj.add_edge_raw(id(2), id(0), dec!(3));
        adj.add_edge_raw(id(0), id(2), dec!(1));
        adj.add_edge_raw(id(0), id(1), dec!(2));

        let first: Vec<_> = adj.edges().map(|e| (e.lender, e.borrower)).collect();
        let second: Vec<_> = adj.edges().map(|e| (e.lender, e.borrower)).collect();
        assert_eq!(first, vec![(id(0), id(1)), (id(0), id(2)), (id(2), id(0))]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_remove_participant_drops_both_directions() {
        let mut adj = WeightedAdjacency::new();
        adj.add_edge_raw(id(0), id(1), dec!(10));
        adj.add_edge_raw(id(1), id(2), dec!(20));
        adj.add_edge_raw(id(2), id(0), dec!(30));

        adj.remove_participant(id(1));

        assert_eq!(adj.edge(id(0), id(1)), None);
        assert_eq!(adj.edge(id(1), id(2)), None);
        assert_eq!(adj.edge(id(2), id(0)), Some(dec!(30)));
        assert!(adj.edges().all(|e| e.lender != id(1) && e.borrower != id(1)));
    }

    #[test]
    fn test_neighbors() {
        let mut adj = WeightedAdjacency::new();
        adj.add_edge_raw(id(0), id(1), dec!(10));
        adj.add_edge_raw(id(0), id(2), dec!(20));

        let out: Vec<_> = adj.neighbors(id(0)).collect();
        assert_eq!(out, vec![(id(1), dec!(10)), (id(2), dec!(20))]);
        assert_eq!(adj.neighbors(id(5)).count(), 0);
    }

    #[test]
    fn test_clear() {
        let mut adj = WeightedAdjacency::new();
        adj.add_edge_raw(id(0), id(1), dec!(10));
        adj.clear();
        assert_eq!(adj.edge_count(), 0);
        assert_eq!(adj.edge(id(0), id(1)), None);
    }
}
