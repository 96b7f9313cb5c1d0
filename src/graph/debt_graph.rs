use crate::core::ledger::NetBalances;
use crate::core::participant::{ParticipantDirectory, ParticipantId};
use crate::graph::adjacency::{Edge, WeightedAdjacency};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single graph instance: participants plus the debts between them.
///
/// The same type backs both the raw view (every loan accumulated verbatim)
/// and the simplified view (the settlement derived from it). The two never
/// share storage.
///
/// # Examples
///
/// ```
/// use debt_graph::graph::debt_graph::DebtGraph;
/// use rust_decimal_macros::dec;
///
/// let mut graph = DebtGraph::new();
/// graph.add_loan("Alice", "Bob", dec!(100));
/// graph.add_loan("Alice", "Bob", dec!(20));
///
/// assert_eq!(graph.participant_count(), 2);
/// assert_eq!(graph.lookup_debt("Alice", "Bob"), Some(dec!(120)));
/// assert_eq!(graph.lookup_debt("Bob", "Alice"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DebtGraph {
    directory: ParticipantDirectory,
    adjacency: WeightedAdjacency,
}

impl DebtGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// An edgeless graph sharing `directory`'s participants and ids.
    pub fn with_directory(directory: ParticipantDirectory) -> Self {
        Self {
            directory,
            adjacency: WeightedAdjacency::new(),
        }
    }

    // --- Participants ---

    /// Register `name` if it is new. Returns its id either way.
    pub fn add_participant(&mut self, name: &str) -> ParticipantId {
        self.directory.add(name)
    }

    /// Remove `name` and every edge touching it. Unknown names are a no-op.
    pub fn remove_participant(&mut self, name: &str) -> Option<ParticipantId> {
        let id = self.directory.remove(name)?;
        self.adjacency.remove_participant(id);
        Some(id)
    }

    pub fn id_of(&self, name: &str) -> Option<ParticipantId> {
        self.directory.id_of(name)
    }

    pub fn name_of(&self, id: ParticipantId) -> Option<&str> {
        self.directory.name_of(id)
    }

    pub fn directory(&self) -> &ParticipantDirectory {
        &self.directory
    }

    pub fn participants(&self) -> impl Iterator<Item = (ParticipantId, &str)> + '_ {
        self.directory.iter()
    }

    pub fn participant_count(&self) -> usize {
        self.directory.len()
    }

    // --- Edges ---

    /// Record a loan between named participants, creating either on first
    /// reference. Self-loans and non-positive amounts are skipped.
    pub fn add_loan(&mut self, lender: &str, borrower: &str, amount: Decimal) {
        if lender == borrower {
            return;
        }
        let u = self.directory.add(lender);
        let v = self.directory.add(borrower);
        self.adjacency.add_edge_raw(u, v, amount);
    }

    /// Accumulate `amount` onto lender -> borrower by id.
    pub fn add_edge_raw(
        &mut self,
        lender: ParticipantId,
        borrower: ParticipantId,
        amount: Decimal,
    ) {
        self.adjacency.add_edge_raw(lender, borrower, amount);
    }

    pub fn edge(&self, lender: ParticipantId, borrower: ParticipantId) -> Option<Decimal> {
        self.adjacency.edge(lender, borrower)
    }

    /// How much `borrower` owes `lender` in this graph, by name.
    pub fn lookup_debt(&self, lender: &str, borrower: &str) -> Option<Decimal> {
        let u = self.directory.id_of(lender)?;
        let v = self.directory.id_of(borrower)?;
        self.adjacency.edge(u, v)
    }

    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.adjacency.edges()
    }

    pub fn neighbors(
        &self,
        lender: ParticipantId,
    ) -> impl Iterator<Item = (ParticipantId, Decimal)> + '_ {
        self.adjacency.neighbors(lender)
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.edge_count()
    }

    /// Sum of all edge weights.
    pub fn total_amount(&self) -> Decimal {
        self.edges().map(|e| e.amount).sum()
    }

    /// Net position of every participant with an edge.
    pub fn net_balances(&self) -> NetBalances {
        NetBalances::from_edges(self.edges())
    }

    /// Drop every edge, keeping participants.
    pub fn clear_edges(&mut self) {
        self.adjacency.clear();
    }

    /// Drop participants and edges. Ids restart at 0.
    pub fn reset(&mut self) {
        self.directory = ParticipantDirectory::new();
        self.adjacency.clear();
    }

    /// Edges by participant name, in (lender id, borrower id) order.
    pub fn named_edges(&self) -> Vec<NamedDebt> {
        self.edges()
            .filter_map(|e| {
                Some(NamedDebt {
                    lender: self.name_of(e.lender)?.to_string(),
                    borrower: self.name_of(e.borrower)?.to_string(),
                    amount: e.amount,
                })
            })
            .collect()
    }

    /// Serializable node/link view of this graph.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self
                .participants()
                .map(|(id, name)| GraphNode {
                    id,
                    name: name.to_string(),
                })
                .collect(),
            links: self
                .edges()
                .map(|e| GraphLink {
                    source: e.lender,
                    target: e.borrower,
                    amount: e.amount,
                })
                .collect(),
        }
    }
}

/// A debt expressed with participant names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedDebt {
    pub lender: String,
    pub borrower: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: ParticipantId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: ParticipantId,
    pub target: ParticipantId,
    pub amount: Decimal,
}

/// Node/link rendering of one graph instance, ready for a visualizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}
