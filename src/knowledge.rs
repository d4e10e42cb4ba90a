//! Owned knowledge-graph state
//!
//! `KnowledgeGraph` bundles the entity store, the embedding index and the
//! metric snapshot derived from them. Every graph mutation rebuilds the
//! snapshot from scratch and hands it back, so readers never see metrics
//! that disagree with the live graph.

use crate::algo::{compute_snapshot, MetricSnapshot, RiskWeights};
use crate::graph::{
    Entity, EntityAttributes, EntityId, GraphError, GraphResult, GraphStatistics, GraphStore,
    RelationKind,
};
use crate::vector::EmbeddingIndex;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct KnowledgeGraph {
    store: GraphStore,
    embeddings: EmbeddingIndex,
    metrics: MetricSnapshot,
    weights: RiskWeights,
}

impl KnowledgeGraph {
    pub fn new(weights: RiskWeights) -> Self {
        Self {
            weights,
            ..Default::default()
        }
    }

    /// Create or merge an entity
    pub fn upsert_entity(&mut self, id: EntityId, attributes: EntityAttributes) -> &MetricSnapshot {
        self.store.upsert_entity(id, attributes);
        self.rebuild()
    }

    /// Append a relationship; endpoints need not exist
    pub fn add_relationship(
        &mut self,
        source: EntityId,
        target: EntityId,
        kind: impl Into<RelationKind>,
    ) -> &MetricSnapshot {
        self.store.add_relationship(source, target, kind);
        self.rebuild()
    }

    /// Attach or replace the embedding of a registered entity
    pub fn upsert_embedding(&mut self, id: EntityId, vector: Vec<f32>) -> GraphResult<()> {
        if !self.store.has_entity(&id) {
            return Err(GraphError::EntityNotFound(id));
        }
        self.embeddings.upsert(id, vector);
        Ok(())
    }

    /// Clear entities, relationships, embeddings and metrics together
    pub fn reset(&mut self) -> &MetricSnapshot {
        self.store.clear();
        self.embeddings.clear();
        self.rebuild()
    }

    /// Swap the risk weights and rescore
    pub fn set_weights(&mut self, weights: RiskWeights) -> &MetricSnapshot {
        self.weights = weights;
        self.rebuild()
    }

    pub fn graph(&self) -> &GraphStore {
        &self.store
    }

    pub fn embeddings(&self) -> &EmbeddingIndex {
        &self.embeddings
    }

    pub fn metrics(&self) -> &MetricSnapshot {
        &self.metrics
    }

    pub fn weights(&self) -> &RiskWeights {
        &self.weights
    }

    pub fn get_entity(&self, id: &EntityId) -> Option<&Entity> {
        self.store.get_entity(id)
    }

    pub fn statistics(&self) -> GraphStatistics {
        self.store.statistics()
    }

    fn rebuild(&mut self) -> &MetricSnapshot {
        self.metrics = compute_snapshot(&self.store, &self.weights);
        debug!(
            entities = self.store.entity_count(),
            relationships = self.store.relationship_count(),
            "metric snapshot rebuilt"
        );
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EntityKind;

    fn event(ext: &str) -> EntityId {
        EntityId::new(EntityKind::Event, ext)
    }

    fn location(ext: &str) -> EntityId {
        EntityId::new(EntityKind::Location, ext)
    }

    #[test]
    fn test_mutations_return_fresh_snapshot() {
        let mut kg = KnowledgeGraph::default();

        let snapshot = kg.upsert_entity(event("e"), EntityAttributes::new().with_severity(0.9));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get(&event("e")).unwrap().degree, 0);

        kg.upsert_entity(location("X"), EntityAttributes::new().with_name("X"));
        let snapshot = kg.add_relationship(event("e"), location("X"), RelationKind::OCCURS_IN);
        let m = snapshot.get(&event("e")).unwrap();
        assert_eq!(m.degree, 1);
        assert!((m.risk_score - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_embedding_requires_entity() {
        let mut kg = KnowledgeGraph::default();
        let err = kg.upsert_embedding(event("ghost"), vec![1.0]).unwrap_err();
        assert_eq!(err, GraphError::EntityNotFound(event("ghost")));
        assert!(kg.embeddings().is_empty());

        kg.upsert_entity(event("real"), EntityAttributes::new());
        kg.upsert_embedding(event("real"), vec![1.0, 0.0]).unwrap();
        assert_eq!(kg.embeddings().get(&event("real")), Some(&[1.0, 0.0][..]));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut kg = KnowledgeGraph::default();
        kg.upsert_entity(event("e"), EntityAttributes::new());
        kg.upsert_embedding(event("e"), vec![1.0]).unwrap();
        kg.add_relationship(event("e"), location("X"), RelationKind::OCCURS_IN);

        let snapshot = kg.reset();
        assert!(snapshot.is_empty());
        assert!(kg.graph().is_empty());
        assert!(kg.embeddings().is_empty());
    }

    #[test]
    fn test_set_weights_rescores() {
        let mut kg = KnowledgeGraph::default();
        kg.upsert_entity(event("e"), EntityAttributes::new().with_severity(0.8));
        let all_severity = RiskWeights {
            severity_weight: 1.0,
            centrality_weight: 0.0,
            ..Default::default()
        };
        let snapshot = kg.set_weights(all_severity);
        assert!((snapshot.get(&event("e")).unwrap().risk_score - 0.8).abs() < 1e-12);
    }
}
