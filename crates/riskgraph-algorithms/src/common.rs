//! Shared utilities for graph algorithms
//!
//! Provides a read-only, dense view of the graph topology for algorithm execution.

use std::collections::HashMap;

/// Node Identifier type (u64)
pub type NodeId = u64;

/// A dense, integer-indexed view of the graph topology using Compressed Sparse Row (CSR) format.
///
/// Parallel and self-loop edges are kept as-is: every edge occupies its own
/// slot in both the outgoing and the incoming arrays.
#[derive(Debug, Clone)]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to NodeId
    pub index_to_node: Vec<NodeId>,
    /// Mapping from NodeId to dense index
    pub node_to_index: HashMap<NodeId, usize>,

    /// Outgoing edges CSR structure
    /// Offsets into `out_targets`. Size = node_count + 1
    pub out_offsets: Vec<usize>,
    /// Contiguous array of target node indices
    pub out_targets: Vec<usize>,

    /// Incoming edges CSR structure (Compressed Sparse Column effectively)
    /// Offsets into `in_sources`. Size = node_count + 1
    pub in_offsets: Vec<usize>,
    /// Contiguous array of source node indices
    pub in_sources: Vec<usize>,

    /// Edges with exactly one endpoint inside the view, counted per node
    pub dangling: Vec<usize>,
}

impl GraphView {
    /// Build a view from node ids and edges given as dense `(source, target)` indices.
    ///
    /// `dangling` lists the dense index of the in-view endpoint for every edge
    /// whose other endpoint lies outside the view.
    pub fn from_edges(
        index_to_node: Vec<NodeId>,
        edges: &[(usize, usize)],
        dangling: &[usize],
    ) -> Self {
        let node_count = index_to_node.len();
        let node_to_index = index_to_node
            .iter()
            .enumerate()
            .map(|(idx, &id)| (id, idx))
            .collect();

        let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        for &(u, v) in edges {
            outgoing[u].push(v);
            incoming[v].push(u);
        }

        let mut dangling_counts = vec![0; node_count];
        for &idx in dangling {
            dangling_counts[idx] += 1;
        }

        let (out_offsets, out_targets) = flatten(outgoing);
        let (in_offsets, in_sources) = flatten(incoming);

        GraphView {
            node_count,
            index_to_node,
            node_to_index,
            out_offsets,
            out_targets,
            in_offsets,
            in_sources,
            dangling: dangling_counts,
        }
    }

    /// Number of edges fully contained in the view
    pub fn edge_count(&self) -> usize {
        self.out_targets.len()
    }

    /// Get the out-degree of a node (by index)
    pub fn out_degree(&self, idx: usize) -> usize {
        self.out_offsets[idx + 1] - self.out_offsets[idx]
    }

    /// Get the in-degree of a node (by index)
    pub fn in_degree(&self, idx: usize) -> usize {
        self.in_offsets[idx + 1] - self.in_offsets[idx]
    }

    /// Get outgoing neighbors (successors) of a node
    pub fn successors(&self, idx: usize) -> &[usize] {
        let start = self.out_offsets[idx];
        let end = self.out_offsets[idx + 1];
        &self.out_targets[start..end]
    }

    /// Get incoming neighbors (predecessors) of a node
    pub fn predecessors(&self, idx: usize) -> &[usize] {
        let start = self.in_offsets[idx];
        let end = self.in_offsets[idx + 1];
        &self.in_sources[start..end]
    }
}

fn flatten(adjacency: Vec<Vec<usize>>) -> (Vec<usize>, Vec<usize>) {
    let mut offsets = Vec::with_capacity(adjacency.len() + 1);
    let mut flat = Vec::new();
    offsets.push(0);
    for neighbors in adjacency {
        flat.extend(neighbors);
        offsets.push(flat.len());
    }
    (offsets, flat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csr_layout() {
        // 0 -> 1, 0 -> 2, 2 -> 1
        let view = GraphView::from_edges(vec![10, 20, 30], &[(0, 1), (0, 2), (2, 1)], &[]);

        assert_eq!(view.node_count, 3);
        assert_eq!(view.edge_count(), 3);
        assert_eq!(view.successors(0), &[1, 2]);
        assert_eq!(view.predecessors(1), &[0, 2]);
        assert_eq!(view.out_degree(1), 0);
        assert_eq!(view.in_degree(1), 2);
        assert_eq!(view.node_to_index[&30], 2);
    }

    #[test]
    fn test_empty_view() {
        let view = GraphView::from_edges(Vec::new(), &[], &[]);
        assert_eq!(view.node_count, 0);
        assert_eq!(view.out_offsets, vec![0]);
        assert_eq!(view.in_offsets, vec![0]);
    }

    #[test]
    fn test_dangling_counts() {
        let view = GraphView::from_edges(vec![1, 2], &[], &[1, 1, 0]);
        assert_eq!(view.dangling, vec![1, 2]);
    }
}
