//! Graphviz DOT rendering of a debt graph.
//!
//! Each edge becomes `"<lender>" -> "<borrower>" [label="$<amount>"];`,
//! read as "the borrower owes the lender". Rendering is pure: the caller
//! decides where the text goes.

use crate::core::amount::format_dollars;
use crate::graph::debt_graph::DebtGraph;

/// Render `graph` as a `digraph LoanGraph { ... }` document.
///
/// # Examples
///
/// ```
/// use debt_graph::graph::debt_graph::DebtGraph;
/// use debt_graph::graph::dot::to_dot;
/// use rust_decimal_macros::dec;
///
/// let mut graph = DebtGraph::new();
/// graph.add_loan("A", "B", dec!(25));
///
/// let dot = to_dot(&graph);
/// assert!(dot.contains(r#""A" -> "B" [label="$25.00"];"#));
/// ```
pub fn to_dot(graph: &DebtGraph) -> String {
    let mut out = String::from("digraph LoanGraph {\n");
    for edge in graph.edges() {
        let (Some(lender), Some(borrower)) =
            (graph.name_of(edge.lender), graph.name_of(edge.borrower))
        else {
            continue;
        };
        out.push_str(&format!(
            "  \"{}\" -> \"{}\" [label=\"{}\"];\n",
            escape(lender),
            escape(borrower),
            format_dollars(edge.amount)
        ));
    }
    out.push_str("}\n");
    out
}

fn escape(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}
