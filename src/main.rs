// Main module for the fraud network dashboard. Orchestrates data loading, client summary, and the network view pass.
use std::cmp::Ordering;
use std::error::Error;

use chrono::DateTime;

use csv_reader::{client_transactions, dataset, Transaction};
use layout::spring_layout;
use network::{build_network, NetworkConfig, NetworkOutcome};
use render::{render_network, render_placeholder, Primitive};

//imports other modules in the fraud_network crate
mod csv_reader;
mod layout;
mod network;
mod render;

const CSV_FILE_PATH: &str = "data/creditcard.csv";
const MAX_RECENT_ROWS: usize = 10;

// Holds the headline figures shown for the selected client
struct ClientSummary {
    total_transactions: usize,
    fraud_cases: usize,
    avg_amount: f64,
    last_activity: Option<i64>,
}

fn format_date(seconds: i64) -> String {
    DateTime::from_timestamp(seconds, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn format_time(seconds: i64) -> String {
    DateTime::from_timestamp(seconds, 0)
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

// Picks the example client to open the dashboard on
// Inputs: the full transaction dataset
// Outputs: the client owning the highest-amount fraud transaction, or the
//          first client in the dataset when no fraud exists at all
fn top_fraud_client(rows: &[Transaction]) -> Option<u32> {
    rows.iter()
        .filter(|tx| tx.is_fraud())
        .max_by(|a, b| {
            a.amount
                .unwrap_or(0.0)
                .partial_cmp(&b.amount.unwrap_or(0.0))
                .unwrap_or(Ordering::Equal)
        })
        .map(|tx| tx.client_id)
        .or_else(|| rows.first().map(|tx| tx.client_id))
}

// Aggregates the KPI figures for one client's transactions
fn summarize_client(rows: &[Transaction]) -> ClientSummary {
    let amounts: Vec<f64> = rows.iter().filter_map(|tx| tx.amount).collect();
    let avg_amount = if amounts.is_empty() {
        0.0
    } else {
        amounts.iter().sum::<f64>() / amounts.len() as f64
    };

    ClientSummary {
        total_transactions: rows.len(),
        fraud_cases: rows.iter().filter(|tx| tx.is_fraud()).count(),
        avg_amount,
        last_activity: rows.iter().filter_map(|tx| tx.time).max(),
    }
}

// Prints the client's most recent transactions, newest first
fn print_recent_transactions(rows: &[Transaction]) {
    let mut recent: Vec<&Transaction> = rows.iter().collect();
    recent.sort_by(|a, b| b.time.unwrap_or(0).cmp(&a.time.unwrap_or(0)));

    println!("\nRecent Transactions:");
    for tx in recent.iter().take(MAX_RECENT_ROWS) {
        let t = tx.time.unwrap_or(0);
        println!(
            "{} {}  ${:>10.2}  {}",
            format_date(t),
            format_time(t),
            tx.amount.unwrap_or(0.0),
            if tx.is_fraud() { "FRAUD" } else { "" }
        );
    }
}

// Runs the build -> layout -> render pass for the network view
// Inputs: selected client id and that client's transactions
// Outputs: prints the drawable primitives, or the no-fraud placeholder
// Key steps:
// 1. Build the sampled hub-and-spoke network
// 2. Compute the seeded spring layout
// 3. Emit primitives; construction failures stay confined to this view
fn print_network_view(client_id: u32, rows: &[Transaction]) {
    let config = NetworkConfig::default();
    match build_network(client_id, rows, &config) {
        Ok(NetworkOutcome::Network(graph)) => {
            let layout = spring_layout(&graph, config.seed);
            let primitives = render_network(&graph, &layout);
            println!(
                "\nTransaction Network: {} nodes, {} edges",
                graph.node_count(),
                graph.edge_count()
            );
            for primitive in &primitives {
                if let Primitive::Marker { at, label, .. } = primitive {
                    println!("  {} at ({:.3}, {:.3})", label, at[0], at[1]);
                }
            }
        }
        Ok(NetworkOutcome::NoFraudActivity) => {
            for primitive in render_placeholder() {
                if let Primitive::Placeholder { message } = primitive {
                    println!("\nTransaction Network: {}", message);
                }
            }
        }
        // The network view degrades alone; the rest of the dashboard still prints
        Err(e) => {
            log::error!("network view unavailable for client {}: {}", client_id, e);
            println!("\nTransaction Network: unavailable ({})", e);
        }
    }
}

// Prints fraud statistics when the client has fraudulent activity
fn print_fraud_details(rows: &[Transaction]) {
    let mut fraud: Vec<&Transaction> = rows.iter().filter(|tx| tx.is_fraud()).collect();
    if fraud.is_empty() {
        println!("\nNo fraudulent transactions detected for this client");
        return;
    }
    fraud.sort_by(|a, b| {
        b.amount
            .unwrap_or(0.0)
            .partial_cmp(&a.amount.unwrap_or(0.0))
            .unwrap_or(Ordering::Equal)
    });

    let amounts: Vec<f64> = fraud.iter().filter_map(|tx| tx.amount).collect();
    let highest = amounts.first().copied().unwrap_or(0.0);
    let average = if amounts.is_empty() {
        0.0
    } else {
        amounts.iter().sum::<f64>() / amounts.len() as f64
    };

    println!("\nFraud Analysis:");
    println!("Highest Fraud Amount: ${:.0}", highest);
    println!("Average Fraud Amount: ${:.0}", average);
    println!("Fraud Timeline:");
    for tx in &fraud {
        let t = tx.time.unwrap_or(0);
        println!(
            "  {} {}  ${:.2}",
            format_date(t),
            format_time(t),
            tx.amount.unwrap_or(0.0)
        );
    }
}

// Main entry point for the fraud network dashboard
// Inputs: None
// Outputs: Result indicating success or error
// Key steps:
// 1. Load the transaction dataset into the process-wide cache
// 2. Select the example fraud client
// 3. Print KPI summary and recent transactions
// 4. Run the network view pass
// 5. Print fraud details
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // Load and validate transaction data
    let rows = dataset(CSV_FILE_PATH)?;
    let client_id = match top_fraud_client(rows) {
        Some(id) => id,
        None => {
            println!("No transactions loaded.");
            return Ok(());
        }
    };
    let client_rows = client_transactions(rows, client_id);

    println!("Fraud Detection Dashboard");
    println!("Selected Client: {}", client_id);

    // KPI cards
    let summary = summarize_client(&client_rows);
    println!("\nTotal Transactions: {}", summary.total_transactions);
    println!("Fraud Cases: {}", summary.fraud_cases);
    println!("Avg Amount: ${:.0}", summary.avg_amount);
    match summary.last_activity {
        Some(t) => println!("Last Activity: {}", format_date(t)),
        None => println!("Last Activity: unknown"),
    }

    print_recent_transactions(&client_rows);
    print_network_view(client_id, &client_rows);
    print_fraud_details(&client_rows);

    Ok(())
}
