use std::cmp::Ordering;

use petgraph::graph::{NodeIndex, UnGraph};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::csv_reader::Transaction;

pub const HUB_COLOR: &str = "#e84118";
pub const FRAUD_NODE_COLOR: &str = "#ff4757";
pub const LEGIT_NODE_COLOR: &str = "#2ed573";
pub const FRAUD_EDGE_COLOR: &str = "#ff6b6b";
pub const LEGIT_EDGE_COLOR: &str = "#ffa502";

const HUB_SIZE: f64 = 40.0;
const FRAUD_EDGE_WEIGHT: f64 = 0.9;
const LEGIT_EDGE_WEIGHT: f64 = 0.4;
const FRAUD_SIZE_SCALE: f64 = 30.0;
const LEGIT_SIZE_SCALE: f64 = 20.0;

// Sampling parameters for the network view. `seed` fixes both the
// legitimate-transaction sample and the layout that follows.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub num_fraud: usize,
    pub num_legit: usize,
    pub seed: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            num_fraud: 15,
            num_legit: 8,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Hub,
    Fraud,
    Legit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeAttrs {
    pub id: String,
    pub kind: NodeKind,
    pub amount: Option<f64>,
    pub time: Option<i64>,
    pub size: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeAttrs {
    pub weight: f64,
    pub color: &'static str,
}

pub type TransactionNetwork = UnGraph<NodeAttrs, EdgeAttrs>;

// A client with no fraudulent transactions has no network to show. That is
// an expected state, distinct from both an error and an empty graph.
#[derive(Debug)]
pub enum NetworkOutcome {
    Network(TransactionNetwork),
    NoFraudActivity,
}

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("transaction {row} for client {client_id} has no amount")]
    MissingAmount { client_id: u32, row: usize },
    #[error("transaction {row} for client {client_id} has invalid amount {amount}")]
    InvalidAmount {
        client_id: u32,
        row: usize,
        amount: f64,
    },
}

// Policy deciding which fraud nodes get linked to each other. The default
// chains them in sampled order; the chain is a visual-emphasis heuristic and
// asserts no relationship between the underlying transactions.
pub trait LinkPolicy {
    fn link(&self, fraud_nodes: &[NodeIndex]) -> Vec<(NodeIndex, NodeIndex)>;
}

pub struct ChainLink;

impl LinkPolicy for ChainLink {
    fn link(&self, fraud_nodes: &[NodeIndex]) -> Vec<(NodeIndex, NodeIndex)> {
        fraud_nodes.windows(2).map(|pair| (pair[0], pair[1])).collect()
    }
}

fn checked_amount(tx: &Transaction, row: usize) -> Result<f64, NetworkError> {
    let amount = tx.amount.ok_or(NetworkError::MissingAmount {
        client_id: tx.client_id,
        row,
    })?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(NetworkError::InvalidAmount {
            client_id: tx.client_id,
            row,
            amount,
        });
    }
    Ok(amount)
}

pub fn build_network(
    client_id: u32,
    transactions: &[Transaction],
    config: &NetworkConfig,
) -> Result<NetworkOutcome, NetworkError> {
    build_network_with_policy(client_id, transactions, config, &ChainLink)
}

// Assembles the hub-and-spoke network for one client.
// Inputs: client id, the client's full transaction set, sampling config, and
//         the fraud-node linking policy
// Outputs: the assembled graph, or NoFraudActivity when nothing qualifies
// Key steps:
// 1. Bail out with the no-fraud sentinel when the client has no fraud rows
// 2. Validate amounts and rank fraud rows by amount (ties keep row order)
// 3. Draw a seeded uniform sample of legitimate rows, clamped to the population
// 4. Add the hub, one node per sampled row, and the spoke edges
// 5. Link fraud nodes per the policy
pub fn build_network_with_policy(
    client_id: u32,
    transactions: &[Transaction],
    config: &NetworkConfig,
    policy: &dyn LinkPolicy,
) -> Result<NetworkOutcome, NetworkError> {
    let fraud_rows: Vec<usize> = transactions
        .iter()
        .enumerate()
        .filter(|(_, tx)| tx.is_fraud())
        .map(|(row, _)| row)
        .collect();

    if fraud_rows.is_empty() {
        return Ok(NetworkOutcome::NoFraudActivity);
    }

    let amounts: Vec<f64> = transactions
        .iter()
        .enumerate()
        .map(|(row, tx)| checked_amount(tx, row))
        .collect::<Result<Vec<f64>, NetworkError>>()?;
    let mean_amount = amounts.iter().sum::<f64>() / amounts.len() as f64;

    // Highest-amount fraud first; the sort is stable, so equal amounts keep
    // their original row order.
    let mut fraud_ranked = fraud_rows;
    fraud_ranked.sort_by(|&a, &b| {
        amounts[b].partial_cmp(&amounts[a]).unwrap_or(Ordering::Equal)
    });
    fraud_ranked.truncate(config.num_fraud);

    let legit_rows: Vec<usize> = transactions
        .iter()
        .enumerate()
        .filter(|(_, tx)| !tx.is_fraud())
        .map(|(row, _)| row)
        .collect();
    let take = config.num_legit.min(legit_rows.len());
    if take < config.num_legit {
        log::warn!(
            "client {}: {} legitimate transactions requested, only {} available",
            client_id,
            config.num_legit,
            legit_rows.len()
        );
    }
    let mut rng = StdRng::seed_from_u64(config.seed);
    let legit_sampled: Vec<usize> = rand::seq::index::sample(&mut rng, legit_rows.len(), take)
        .into_iter()
        .map(|i| legit_rows[i])
        .collect();

    let mut graph = TransactionNetwork::new_undirected();

    let hub = graph.add_node(NodeAttrs {
        id: format!("Client {}", client_id),
        kind: NodeKind::Hub,
        amount: Some(mean_amount),
        time: None,
        size: HUB_SIZE,
        color: HUB_COLOR,
    });

    let mut fraud_nodes = Vec::with_capacity(fraud_ranked.len());
    for &row in &fraud_ranked {
        let node = graph.add_node(NodeAttrs {
            id: format!("F_{}", row),
            kind: NodeKind::Fraud,
            amount: Some(amounts[row]),
            time: transactions[row].time,
            size: (amounts[row] + 100.0).ln() * FRAUD_SIZE_SCALE,
            color: FRAUD_NODE_COLOR,
        });
        graph.add_edge(
            hub,
            node,
            EdgeAttrs {
                weight: FRAUD_EDGE_WEIGHT,
                color: FRAUD_EDGE_COLOR,
            },
        );
        fraud_nodes.push(node);
    }

    for &row in &legit_sampled {
        let node = graph.add_node(NodeAttrs {
            id: format!("L_{}", row),
            kind: NodeKind::Legit,
            amount: Some(amounts[row]),
            time: transactions[row].time,
            size: (amounts[row] + 100.0).ln() * LEGIT_SIZE_SCALE,
            color: LEGIT_NODE_COLOR,
        });
        graph.add_edge(
            hub,
            node,
            EdgeAttrs {
                weight: LEGIT_EDGE_WEIGHT,
                color: LEGIT_EDGE_COLOR,
            },
        );
    }

    for (a, b) in policy.link(&fraud_nodes) {
        graph.add_edge(
            a,
            b,
            EdgeAttrs {
                weight: FRAUD_EDGE_WEIGHT,
                color: FRAUD_EDGE_COLOR,
            },
        );
    }

    Ok(NetworkOutcome::Network(graph))
}
