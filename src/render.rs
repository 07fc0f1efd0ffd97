use petgraph::visit::EdgeRef;

use crate::layout::Layout;
use crate::network::TransactionNetwork;

const LINE_WIDTH_SCALE: f64 = 3.0;
pub const PLACEHOLDER_MESSAGE: &str = "No fraud network detected";

// Drawable primitives handed to the rendering layer. Edges come first so
// markers draw on top of them.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line {
        from: [f64; 2],
        to: [f64; 2],
        width: f64,
        color: &'static str,
    },
    Marker {
        at: [f64; 2],
        size: f64,
        color: &'static str,
        label: String,
    },
    Placeholder {
        message: String,
    },
}

fn format_amount(amount: f64) -> String {
    let whole = amount.round() as i64;
    let digits = whole.abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${}", grouped)
}

pub fn render_network(graph: &TransactionNetwork, layout: &Layout) -> Vec<Primitive> {
    let position = |id: &str| layout.get(id).copied().unwrap_or([0.0, 0.0]);
    let mut primitives = Vec::with_capacity(graph.edge_count() + graph.node_count());

    for edge in graph.edge_references() {
        let attrs = edge.weight();
        primitives.push(Primitive::Line {
            from: position(&graph[edge.source()].id),
            to: position(&graph[edge.target()].id),
            width: attrs.weight * LINE_WIDTH_SCALE,
            color: attrs.color,
        });
    }

    for idx in graph.node_indices() {
        let node = &graph[idx];
        let label = match node.amount {
            Some(amount) => format_amount(amount),
            None => node.id.clone(),
        };
        primitives.push(Primitive::Marker {
            at: position(&node.id),
            size: node.size,
            color: node.color,
            label,
        });
    }

    primitives
}

pub fn render_placeholder() -> Vec<Primitive> {
    vec![Primitive::Placeholder {
        message: PLACEHOLDER_MESSAGE.to_string(),
    }]
}
