//! debt-graph CLI
//!
//! Settle, query and export a network of loans from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Settle loans from a JSON file
//! debt-graph settle --input loans.json
//!
//! # What does Carol owe Alice after settlement?
//! debt-graph lookup --input loans.json --lender Alice --borrower Carol
//!
//! # Who reaches everyone most cheaply?
//! debt-graph influential --input loans.json
//!
//! # Graphviz output of the raw loans
//! debt-graph export --input loans.json --view raw
//!
//! # Generate a random network for testing
//! debt-graph generate --participants 6 --debts 12
//! ```

use debt_graph::book::{GraphView, LoanBook};
use debt_graph::simulation::random_network::{populate, RandomNetworkConfig};
use rust_decimal::Decimal;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"debt-graph — settle who owes whom

USAGE:
    debt-graph <COMMAND> [OPTIONS]

COMMANDS:
    settle        Show raw loans, the settled payments and the savings
    lookup        Show what a borrower owes a lender after settlement
    influential   Find the participant with the cheapest outward paths
    export        Render a graph as Graphviz DOT
    generate      Generate a random loan network (for testing)
    help          Show this message

OPTIONS (settle, lookup, influential, export):
    --input <FILE>        Path to JSON loans file

OPTIONS (settle):
    --format <FORMAT>     Output format: text (default) or json

OPTIONS (lookup):
    --lender <NAME>       Participant who is owed
    --borrower <NAME>     Participant who owes

OPTIONS (export):
    --view <VIEW>         raw or simplified (default)
    --output <FILE>       Write to file instead of stdout

OPTIONS (generate):
    --participants <N>    Number of participants (default: 5)
    --debts <N>           Number of loans (default: 8)
    --min <N>             Smallest loan amount (default: 50)
    --max <N>             Largest loan amount (default: 500)
    --output <FILE>       Write to file instead of stdout

EXAMPLES:
    debt-graph settle --input loans.json --format json
    debt-graph lookup --input loans.json --lender Alice --borrower Bob
    debt-graph export --input loans.json --view raw --output raw.dot
    debt-graph generate --participants 10 --debts 30 --output loans.json"#
    );
}

/// JSON schema for input loans.
#[derive(serde::Deserialize, serde::Serialize)]
struct LoanInput {
    lender: String,
    borrower: String,
    amount: String,
}

#[derive(serde::Deserialize, serde::Serialize)]
struct LoansFile {
    #[serde(default)]
    participants: Vec<String>,
    debts: Vec<LoanInput>,
}

/// JSON output schema for the settle command.
#[derive(serde::Serialize)]
struct SettleOutput {
    summary: debt_graph::optimization::settlement::SettlementSummary,
    snapshot: debt_graph::book::BookSnapshot,
}

fn fail(message: String) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}

/// Parse `--flag value` pairs, rejecting anything not in `allowed`.
fn parse_options(args: &[String], allowed: &[&str]) -> Vec<(String, String)> {
    let mut options = Vec::new();
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        if !allowed.contains(&flag) {
            fail(format!("Unknown option: {}", flag));
        }
        i += 1;
        let value = args
            .get(i)
            .cloned()
            .unwrap_or_else(|| fail(format!("{} requires a value", flag)));
        options.push((flag.to_string(), value));
        i += 1;
    }
    options
}

fn option<'a>(options: &'a [(String, String)], flag: &str) -> Option<&'a str> {
    options
        .iter()
        .rev()
        .find(|(f, _)| f == flag)
        .map(|(_, v)| v.as_str())
}

fn required<'a>(options: &'a [(String, String)], flag: &str, what: &str) -> &'a str {
    option(options, flag).unwrap_or_else(|| fail(format!("Error: {} <{}> is required", flag, what)))
}

fn numeric<T: std::str::FromStr>(options: &[(String, String)], flag: &str, default: T) -> T {
    match option(options, flag) {
        Some(raw) => raw
            .parse()
            .unwrap_or_else(|_| fail(format!("{} requires a number", flag))),
        None => default,
    }
}

fn load_book(path: &str) -> LoanBook {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| fail(format!("Error reading file '{}': {}", path, e)));

    let file: LoansFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "participants": ["Alice", "Bob"],
  "debts": [
    {{ "lender": "Alice", "borrower": "Bob", "amount": "25.00" }}
  ]
}}"#
        );
        process::exit(1);
    });

    let mut book = LoanBook::new();
    for name in &file.participants {
        book.add_participant(name)
            .unwrap_or_else(|e| fail(format!("Invalid participant '{}': {}", name, e)));
    }
    for loan in file.debts {
        let amount: Decimal = loan
            .amount
            .parse()
            .unwrap_or_else(|e| fail(format!("Invalid amount '{}': {}", loan.amount, e)));
        if let Err(e) = book.record_debt(&loan.lender, &loan.borrower, amount) {
            fail(format!(
                "Rejected loan {} -> {} ({}): {}",
                loan.lender, loan.borrower, loan.amount, e
            ));
        }
    }
    book
}

fn cmd_settle(args: &[String]) {
    let options = parse_options(args, &["--input", "--format"]);
    let book = load_book(required(&options, "--input", "FILE"));
    let format = option(&options, "--format").unwrap_or("text");

    match format {
        "json" => {
            let output = SettleOutput {
                summary: book.settlement_summary(),
                snapshot: book.snapshot(),
            };
            let json = serde_json::to_string_pretty(&output)
                .unwrap_or_else(|e| fail(format!("Error serializing output: {}", e)));
            println!("{}", json);
        }
        "text" => {
            println!("Raw loans:");
            for debt in book.raw_edges() {
                println!("  {:<12} lent {:<12} {:>12}", debt.lender, debt.borrower, debt.amount);
            }
            println!("\nSettled payments:");
            let settled = book.simplified_edges();
            if settled.is_empty() {
                println!("  (everyone is square)");
            }
            for debt in settled {
                println!("  {:<12} pays {:<12} {:>12}", debt.borrower, debt.lender, debt.amount);
            }
            println!();
            print!("{}", book.settlement_summary());
        }
        other => fail(format!("Unknown format '{}': expected 'text' or 'json'", other)),
    }
}

fn cmd_lookup(args: &[String]) {
    let options = parse_options(args, &["--input", "--lender", "--borrower"]);
    let book = load_book(required(&options, "--input", "FILE"));
    let lender = required(&options, "--lender", "NAME");
    let borrower = required(&options, "--borrower", "NAME");

    match book.lookup_debt(lender, borrower) {
        Ok(Some(amount)) => println!("{} owes {} {}", borrower, lender, amount),
        Ok(None) => println!("{} owes {} nothing", borrower, lender),
        Err(e) => fail(format!("Error: {}", e)),
    }
}

fn cmd_influential(args: &[String]) {
    let options = parse_options(args, &["--input"]);
    let book = load_book(required(&options, "--input", "FILE"));

    match book.most_influential() {
        Some(influence) => println!(
            "{} (average path length {})",
            influence.name,
            influence.avg_path_length.round_dp(2)
        ),
        None => fail("No influential participant found".to_string()),
    }
}

fn cmd_export(args: &[String]) {
    let options = parse_options(args, &["--input", "--view", "--output"]);
    let book = load_book(required(&options, "--input", "FILE"));
    let view = match option(&options, "--view").unwrap_or("simplified") {
        "raw" => GraphView::Raw,
        "simplified" => GraphView::Simplified,
        other => fail(format!("Unknown view '{}': expected 'raw' or 'simplified'", other)),
    };

    let dot = book.export_dot(view);
    write_or_print(option(&options, "--output"), &dot);
}

fn cmd_generate(args: &[String]) {
    let options = parse_options(
        args,
        &["--participants", "--debts", "--min", "--max", "--output"],
    );
    let defaults = RandomNetworkConfig::default();
    let config = RandomNetworkConfig {
        participant_count: numeric(&options, "--participants", defaults.participant_count),
        debt_count: numeric(&options, "--debts", defaults.debt_count),
        min_amount: numeric(&options, "--min", defaults.min_amount),
        max_amount: numeric(&options, "--max", defaults.max_amount),
    };

    let mut book = LoanBook::new();
    populate(&mut book, &config, &mut rand::thread_rng())
        .unwrap_or_else(|e| fail(format!("Error: {}", e)));

    let output = LoansFile {
        participants: book.participants().into_iter().map(|p| p.name).collect(),
        debts: book
            .transactions()
            .iter()
            .map(|tx| LoanInput {
                lender: tx.lender().to_string(),
                borrower: tx.borrower().to_string(),
                amount: tx.amount().to_string(),
            })
            .collect(),
    };
    let json = serde_json::to_string_pretty(&output)
        .unwrap_or_else(|e| fail(format!("Error serializing output: {}", e)));

    let path = option(&options, "--output");
    write_or_print(path, &json);
    if let Some(path) = path {
        eprintln!(
            "Generated {} loans across {} participants → {}",
            output.debts.len(),
            output.participants.len(),
            path
        );
    }
}

fn write_or_print(path: Option<&str>, content: &str) {
    match path {
        Some(path) => fs::write(path, content)
            .unwrap_or_else(|e| fail(format!("Error writing to '{}': {}", path, e))),
        None => print!("{}", content),
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "settle" => cmd_settle(rest),
        "lookup" => cmd_lookup(rest),
        "influential" => cmd_influential(rest),
        "export" => cmd_export(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
