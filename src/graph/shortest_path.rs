use crate::core::participant::ParticipantId;
use crate::graph::debt_graph::DebtGraph;
use petgraph::algo::dijkstra;
use petgraph::graph::{DiGraph, NodeIndex};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

/// A petgraph projection of a [`DebtGraph`] for path queries.
///
/// Nodes are live participants, edges run lender -> borrower weighted by the
/// amount owed. Weights are always positive, so Dijkstra applies.
#[derive(Debug)]
pub struct PathGraph {
    graph: DiGraph<ParticipantId, Decimal>,
    node_map: HashMap<ParticipantId, NodeIndex>,
}

impl PathGraph {
    pub fn from_debt_graph(source: &DebtGraph) -> Self {
        let mut graph = DiGraph::new();
        let mut node_map = HashMap::new();

        for (id, _) in source.participants() {
            node_map.insert(id, graph.add_node(id));
        }
        for edge in source.edges() {
            let (Some(&u), Some(&v)) = (node_map.get(&edge.lender), node_map.get(&edge.borrower))
            else {
                continue;
            };
            graph.add_edge(u, v, edge.amount);
        }

        Self { graph, node_map }
    }

    /// Shortest weighted distance from `source` to every participant it can
    /// reach, excluding `source` itself. Unreachable participants are absent.
    pub fn distances_from(&self, source: ParticipantId) -> BTreeMap<ParticipantId, Decimal> {
        let Some(&start) = self.node_map.get(&source) else {
            return BTreeMap::new();
        };
        dijkstra(&self.graph, start, None, |e| *e.weight())
            .into_iter()
            .filter(|(node, _)| *node != start)
            .map(|(node, dist)| (self.graph[node], dist))
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }
}
