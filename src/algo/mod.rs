//! Graph metrics module
//!
//! Degree kernels live in the `riskgraph-algorithms` crate.
//! This module provides the integration/adapter layer and the risk blend.

pub mod metrics;

use crate::graph::GraphStore;
use riskgraph_algorithms::{GraphView, NodeId as AlgoNodeId};

pub use metrics::{compute_snapshot, EntityMetrics, MetricSnapshot, RiskWeights, WeightsError};
pub use riskgraph_algorithms::{degree, degree_centrality, DegreeResult};

/// Build a GraphView from the store for algorithm execution
///
/// Algorithm node ids are the entities' insertion positions, so results map
/// back through `GraphStore::list_entities` order. A relationship with one
/// unregistered endpoint is kept as a dangling half-edge on the other one;
/// relationships with no registered endpoint are ignored.
pub fn build_view(store: &GraphStore) -> GraphView {
    let index_to_node: Vec<AlgoNodeId> = (0..store.entity_count() as AlgoNodeId).collect();

    let mut edges = Vec::with_capacity(store.relationship_count());
    let mut dangling = Vec::new();

    for rel in store.list_relationships() {
        match (store.position_of(&rel.source), store.position_of(&rel.target)) {
            (Some(u), Some(v)) => edges.push((u, v)),
            (Some(u), None) => dangling.push(u),
            (None, Some(v)) => dangling.push(v),
            (None, None) => {}
        }
    }

    GraphView::from_edges(index_to_node, &edges, &dangling)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EntityAttributes, EntityId, EntityKind, RelationKind};

    #[test]
    fn test_graph_view_projection() {
        let mut store = GraphStore::new();
        let e1 = EntityId::new(EntityKind::Event, "e1");
        let e2 = EntityId::new(EntityKind::Event, "e2");
        let x = EntityId::new(EntityKind::Location, "X");
        for id in [&e1, &e2, &x] {
            store.upsert_entity(id.clone(), EntityAttributes::new());
        }

        // e1 -> X, e2 -> X, e2 -> missing
        store.add_relationship(e1.clone(), x.clone(), RelationKind::OCCURS_IN);
        store.add_relationship(e2.clone(), x.clone(), RelationKind::OCCURS_IN);
        store.add_relationship(
            e2.clone(),
            EntityId::new(EntityKind::Location, "missing"),
            RelationKind::OCCURS_IN,
        );

        let view = build_view(&store);

        assert_eq!(view.node_count, 3);
        assert_eq!(view.edge_count(), 2);
        assert_eq!(view.successors(0), &[2]);
        assert_eq!(view.in_degree(2), 2);
        assert_eq!(degree(&view, 1), 2);
    }
}
