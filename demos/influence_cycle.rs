//! Path centrality on a small loan network.
//!
//! Demonstrates that centrality is measured outward from each participant
//! over the raw loans, and that ties go to whoever was seen first.

use debt_graph::book::{GraphView, LoanBook};
use debt_graph::optimization::centrality::average_path_lengths;
use rust_decimal_macros::dec;

fn main() {
    println!("╔═══════════════════════════════════════════════╗");
    println!("║  debt-graph: Influence Around a Cycle         ║");
    println!("╚═══════════════════════════════════════════════╝\n");

    let mut book = LoanBook::new();

    println!("Loans:");
    println!("  Alice   → Bob:     $10");
    println!("  Bob     → Charlie: $10");
    println!("  Charlie → Alice:   $10\n");

    book.record_debt("Alice", "Bob", dec!(10)).unwrap();
    book.record_debt("Bob", "Charlie", dec!(10)).unwrap();
    book.record_debt("Charlie", "Alice", dec!(10)).unwrap();

    print_averages(&book);

    // Add a hub with cheap outgoing loans
    println!("Adding Dana, who lends everyone $1...\n");
    for name in ["Alice", "Bob", "Charlie"] {
        book.record_debt("Dana", name, dec!(1)).unwrap();
    }
    print_averages(&book);

    println!("━━━ Settled Payments ━━━\n");
    let settled = book.simplified_edges();
    if settled.is_empty() {
        println!("  (everyone is square)");
    }
    for debt in settled {
        println!("  {} pays {} ${}", debt.borrower, debt.lender, debt.amount);
    }
}

fn print_averages(book: &LoanBook) {
    println!("━━━ Average Outward Path Length ━━━\n");
    let raw = book.graph(GraphView::Raw);
    for (id, avg) in average_path_lengths(raw) {
        let name = raw.name_of(id).unwrap_or("?");
        match avg {
            Some(avg) => println!("  {:<8} {:>8}", name, avg.round_dp(2)),
            None => println!("  {:<8} {:>8}", name, "∞"),
        }
    }
    match book.most_influential() {
        Some(influence) => println!("\n  Most influential: {}\n", influence.name),
        None => println!("\n  Most influential: none\n"),
    }
}
