use std::collections::HashMap;

use ndarray::Array2;
use petgraph::visit::EdgeRef;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::network::TransactionNetwork;

// Node id -> 2-D coordinate, domain equal to the graph's node set.
pub type Layout = HashMap<String, [f64; 2]>;

const ITERATIONS: usize = 50;
const INITIAL_TEMPERATURE: f64 = 0.1;
const MIN_DISTANCE: f64 = 0.01;

// Computes a Fruchterman-Reingold spring layout for the network.
// Inputs: the assembled network and the seed for initial placement
// Outputs: a position per node, recentered and scaled to [-1, 1]
// Key steps:
// 1. Place nodes uniformly at random from the seeded generator
// 2. Iterate pairwise repulsion and weighted edge attraction under a
//    linearly cooling displacement cap
// 3. Recenter on the origin and rescale to unit extent
//
// Same (graph, seed) in, same positions out: the generator is local, node
// and edge order follow insertion order, and nothing else is consulted.
pub fn spring_layout(graph: &TransactionNetwork, seed: u64) -> Layout {
    let n = graph.node_count();
    let mut layout = Layout::new();
    if n == 0 {
        return layout;
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut pos = Array2::<f64>::zeros((n, 2));
    for i in 0..n {
        pos[[i, 0]] = rng.gen::<f64>();
        pos[[i, 1]] = rng.gen::<f64>();
    }

    // Node indices are contiguous (nothing is ever removed), so a node's
    // index doubles as its row in the position matrix.
    let edges: Vec<(usize, usize, f64)> = graph
        .edge_references()
        .map(|e| (e.source().index(), e.target().index(), e.weight().weight))
        .collect();

    let k = 1.0 / (n as f64).sqrt();
    let mut temperature = INITIAL_TEMPERATURE;
    let cooling = temperature / (ITERATIONS as f64 + 1.0);

    for _ in 0..ITERATIONS {
        let mut disp = Array2::<f64>::zeros((n, 2));

        // Repulsion between every node pair
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = pos[[i, 0]] - pos[[j, 0]];
                let dy = pos[[i, 1]] - pos[[j, 1]];
                let dist = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                let force = k * k / dist;
                disp[[i, 0]] += dx / dist * force;
                disp[[i, 1]] += dy / dist * force;
                disp[[j, 0]] -= dx / dist * force;
                disp[[j, 1]] -= dy / dist * force;
            }
        }

        // Attraction along edges, scaled by edge weight
        for &(a, b, weight) in &edges {
            let dx = pos[[a, 0]] - pos[[b, 0]];
            let dy = pos[[a, 1]] - pos[[b, 1]];
            let dist = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
            let force = dist * dist / k * weight;
            disp[[a, 0]] -= dx / dist * force;
            disp[[a, 1]] -= dy / dist * force;
            disp[[b, 0]] += dx / dist * force;
            disp[[b, 1]] += dy / dist * force;
        }

        // Move each node at most `temperature` along its net displacement
        for i in 0..n {
            let dx = disp[[i, 0]];
            let dy = disp[[i, 1]];
            let len = (dx * dx + dy * dy).sqrt().max(1e-9);
            let step = len.min(temperature);
            pos[[i, 0]] += dx / len * step;
            pos[[i, 1]] += dy / len * step;
        }
        temperature -= cooling;
    }

    rescale(&mut pos);

    for (i, idx) in graph.node_indices().enumerate() {
        layout.insert(graph[idx].id.clone(), [pos[[i, 0]], pos[[i, 1]]]);
    }
    layout
}

fn rescale(pos: &mut Array2<f64>) {
    let n = pos.nrows() as f64;
    for c in 0..2 {
        let mean = pos.column(c).sum() / n;
        for i in 0..pos.nrows() {
            pos[[i, c]] -= mean;
        }
    }
    let extent = pos.iter().fold(0.0f64, |max, v| max.max(v.abs()));
    if extent > 0.0 {
        pos.mapv_inplace(|v| v / extent);
    }
}
