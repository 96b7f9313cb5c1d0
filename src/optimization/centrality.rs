use crate::core::participant::ParticipantId;
use crate::graph::debt_graph::DebtGraph;
use crate::graph::shortest_path::PathGraph;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The participant that reaches everyone else most cheaply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Influence {
    pub id: ParticipantId,
    pub name: String,
    /// Mean shortest-path cost from this participant to every participant
    /// it can reach.
    pub avg_path_length: Decimal,
}

/// Mean outward shortest-path cost of every live participant, in id order.
///
/// `None` marks a participant that reaches nobody (infinite cost).
/// Distances are measured *from* each participant along lender -> borrower
/// edges, not towards it.
///
/// Every path costs at most the graph's total weight. If that total does not
/// fit in a [`Decimal`], no average is defined and every entry is `None`.
pub fn average_path_lengths(graph: &DebtGraph) -> Vec<(ParticipantId, Option<Decimal>)> {
    let total_weight = graph
        .edges()
        .try_fold(Decimal::ZERO, |total, e| total.checked_add(e.amount));
    if total_weight.is_none() {
        log::error!("edge weights overflow; path lengths are undefined");
        return graph.participants().map(|(id, _)| (id, None)).collect();
    }

    let paths = PathGraph::from_debt_graph(graph);
    graph
        .participants()
        .map(|(id, _)| {
            let dist = paths.distances_from(id);
            if dist.is_empty() {
                return (id, None);
            }
            let count = Decimal::from(dist.len());
            let avg = match dist
                .values()
                .try_fold(Decimal::ZERO, |total, d| total.checked_add(*d))
            {
                Some(total) => total / count,
                // Divide first when the plain sum does not fit.
                None => dist
                    .values()
                    .fold(Decimal::ZERO, |acc, d| acc.saturating_add(*d / count)),
            };
            (id, Some(avg))
        })
        .collect()
}

/// The participant with the lowest mean outward path cost.
///
/// Ties go to the earliest-discovered participant. Returns `None` for an
/// empty graph, or when nobody reaches anybody.
///
/// # Examples
///
/// ```
/// use debt_graph::graph::debt_graph::DebtGraph;
/// use debt_graph::optimization::centrality::most_influential;
/// use rust_decimal_macros::dec;
///
/// let mut graph = DebtGraph::new();
/// graph.add_loan("Hub", "A", dec!(5));
/// graph.add_loan("Hub", "B", dec!(5));
/// graph.add_loan("A", "B", dec!(50));
///
/// assert_eq!(most_influential(&graph).unwrap().name, "Hub");
/// ```
pub fn most_influential(graph: &DebtGraph) -> Option<Influence> {
    let mut best: Option<(ParticipantId, Decimal)> = None;
    for (id, avg) in average_path_lengths(graph) {
        let Some(avg) = avg else { continue };
        if best.map_or(true, |(_, best_avg)| avg < best_avg) {
            best = Some((id, avg));
        }
    }

    let (id, avg_path_length) = best?;
    let name = graph.name_of(id)?.to_string();
    log::debug!("most influential participant: {} (avg {})", name, avg_path_length);
    Some(Influence {
        id,
        name,
        avg_path_length,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_graph() {
        assert_eq!(most_influential(&DebtGraph::new()), None);
    }

    #[test]
    fn test_single_participant() {
        let mut graph = DebtGraph::new();
        graph.add_participant("Alone");
        assert_eq!(most_influential(&graph), None);
    }

    #[test]
    fn test_no_edges() {
        let mut graph = DebtGraph::new();
        graph.add_participant("A");
        graph.add_participant("B");
        assert_eq!(most_influential(&graph), None);
    }

    #[test]
    fn test_equal_cycle_picks_first() {
        let mut graph = DebtGraph::new();
        graph.add_loan("A", "B", dec!(10));
        graph.add_loan("B", "C", dec!(10));
        graph.add_loan("C", "A", dec!(10));

        let averages = average_path_lengths(&graph);
        assert!(averages.iter().all(|(_, avg)| *avg == Some(dec!(15))));

        let influence = most_influential(&graph).unwrap();
        assert_eq!(influence.name, "A");
        assert_eq!(influence.avg_path_length, dec!(15));
    }

    #[test]
    fn test_outward_direction() {
        // Only "Src" has outgoing edges; the sinks are reached, they reach nobody.
        let mut graph = DebtGraph::new();
        graph.add_loan("Src", "X", dec!(1));
        graph.add_loan("Src", "Y", dec!(3));

        let averages = average_path_lengths(&graph);
        assert_eq!(averages[0].1, Some(dec!(2)));
        assert_eq!(averages[1].1, None);
        assert_eq!(averages[2].1, None);
        assert_eq!(most_influential(&graph).unwrap().name, "Src");
    }

    #[test]
    fn test_average_only_counts_reachable() {
        let mut graph = DebtGraph::new();
        graph.add_participant("Isolated");
        graph.add_loan("A", "B", dec!(8));

        let influence = most_influential(&graph).unwrap();
        assert_eq!(influence.name, "A");
        assert_eq!(influence.avg_path_length, dec!(8));
    }

    #[test]
    fn test_huge_distances_do_not_overflow() {
        // Total weight is exactly MAX; Hub's two distances sum past it.
        let mut graph = DebtGraph::new();
        graph.add_loan("Hub", "A", Decimal::MAX - dec!(1));
        graph.add_loan("A", "B", dec!(1));

        let averages = average_path_lengths(&graph);
        assert!(averages[0].1.unwrap() > Decimal::MAX / dec!(2));
        assert_eq!(averages[1].1, Some(dec!(1)));
        assert_eq!(averages[2].1, None);
        assert_eq!(most_influential(&graph).unwrap().name, "A");
    }

    #[test]
    fn test_overflowing_total_weight_has_no_answer() {
        let mut graph = DebtGraph::new();
        graph.add_loan("Hub", "A", Decimal::MAX);
        graph.add_loan("Hub", "B", Decimal::MAX);

        let averages = average_path_lengths(&graph);
        assert_eq!(averages.len(), 3);
        assert!(averages.iter().all(|(_, avg)| avg.is_none()));
        assert_eq!(most_influential(&graph), None);
    }

    #[test]
    fn test_lower_average_wins_over_discovery() {
        let mut graph = DebtGraph::new();
        graph.add_loan("A", "B", dec!(100));
        graph.add_loan("B", "A", dec!(1));

        assert_eq!(most_influential(&graph).unwrap().name, "B");
    }
}
