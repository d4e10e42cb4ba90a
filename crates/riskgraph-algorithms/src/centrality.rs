//! Degree centrality
//!
//! Degree counts every incident edge individually, so parallel edges add up
//! and a self-loop contributes two (once as source, once as target).

use super::common::{GraphView, NodeId};
use std::collections::HashMap;

/// Degree and normalized degree centrality for every node of a view
#[derive(Debug, Clone, Default)]
pub struct DegreeResult {
    /// Raw degree (in + out + dangling)
    pub degree: HashMap<NodeId, usize>,
    /// Degree divided by `max(N - 1, 1)`
    pub centrality: HashMap<NodeId, f64>,
}

/// Undirected degree of a node (by index)
pub fn degree(view: &GraphView, idx: usize) -> usize {
    view.out_degree(idx) + view.in_degree(idx) + view.dangling[idx]
}

/// Calculate degree centrality for the graph view
///
/// Normalizes by the maximum possible degree of a simple graph on N nodes.
/// Values can exceed 1.0 when parallel edges or self-loops are present;
/// callers that need a bounded score clamp it.
pub fn degree_centrality(view: &GraphView) -> DegreeResult {
    let n = view.node_count;
    if n == 0 {
        return DegreeResult::default();
    }

    let max_degree = n.saturating_sub(1).max(1) as f64;
    let mut result = DegreeResult {
        degree: HashMap::with_capacity(n),
        centrality: HashMap::with_capacity(n),
    };

    for idx in 0..n {
        let node = view.index_to_node[idx];
        let d = degree(view, idx);
        result.degree.insert(node, d);
        result.centrality.insert(node, d as f64 / max_degree);
    }

    result
}
