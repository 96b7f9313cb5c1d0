//! Shared expenses between flatmates.
//!
//! Shows how a tangle of small loans collapses into a handful of payments
//! and how lookups read the settled view.

use debt_graph::book::{GraphView, LoanBook};
use rust_decimal_macros::dec;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  debt-graph: Shared Expenses Example     ║");
    println!("╚══════════════════════════════════════════╝\n");

    let mut book = LoanBook::new();

    // --- Scenario 1: A simple pass-through ---
    println!("━━━ Scenario 1: Pass-Through ━━━\n");

    book.record_debt("Alice", "Bob", dec!(100)).unwrap();
    book.record_debt("Bob", "Charlie", dec!(100)).unwrap();

    println!("Alice lent Bob:      $100");
    println!("Bob lent Charlie:    $100");
    println!(
        "Charlie owes Alice:  {:?}",
        book.lookup_debt("Alice", "Charlie").unwrap()
    );
    println!(
        "Bob owes Alice:      {:?}",
        book.lookup_debt("Alice", "Bob").unwrap()
    );
    println!();

    // --- Scenario 2: A month of groceries ---
    println!("━━━ Scenario 2: A Month of Groceries (5 flatmates) ━━━\n");

    book.reset();
    book.record_debt("Alice", "Bob", dec!(42.50)).unwrap();
    book.record_debt("Bob", "Charlie", dec!(18.20)).unwrap();
    book.record_debt("Charlie", "David", dec!(65.00)).unwrap();
    book.record_debt("David", "Alice", dec!(12.75)).unwrap();
    book.record_debt("Eve", "Bob", dec!(30.00)).unwrap();
    book.record_debt("Charlie", "Alice", dec!(27.40)).unwrap();
    book.record_debt("Bob", "David", dec!(9.99)).unwrap();
    book.record_debt("David", "Eve", dec!(21.00)).unwrap();

    println!("{}", book.settlement_summary());

    println!("━━━ Payments To Make ━━━\n");
    for debt in book.simplified_edges() {
        println!("  {:<8} pays {:<8} ${}", debt.borrower, debt.lender, debt.amount);
    }

    println!("\n━━━ Graphviz (settled) ━━━\n");
    print!("{}", book.export_dot(GraphView::Simplified));
}
