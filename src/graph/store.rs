//! In-memory graph storage implementation
//!
//! Entities live in an insertion-ordered map keyed by their composite id;
//! relationships are an append-only list. There is no per-entity deletion,
//! only a full `clear`.

use super::entity::{Entity, EntityAttributes};
use super::relationship::Relationship;
use super::types::{EntityId, EntityKind, RelationKind};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Entity {0} not found")]
    EntityNotFound(EntityId),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Counts per entity kind and relation kind
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphStatistics {
    pub entity_count: usize,
    pub relationship_count: usize,
    pub entities_by_kind: BTreeMap<EntityKind, usize>,
    pub relationships_by_kind: BTreeMap<RelationKind, usize>,
}

/// In-memory graph storage
#[derive(Debug, Default, Clone)]
pub struct GraphStore {
    /// Entity storage: EntityId -> Entity (insertion ordered)
    entities: IndexMap<EntityId, Entity>,

    /// Relationships in insertion order
    relationships: Vec<Relationship>,
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the entity or merge `attributes` into the existing record.
    ///
    /// Returns `true` if a new entity was created.
    pub fn upsert_entity(&mut self, id: EntityId, attributes: EntityAttributes) -> bool {
        match self.entities.get_mut(&id) {
            Some(entity) => {
                entity.merge(attributes);
                false
            }
            None => {
                self.entities.insert(id.clone(), Entity::new(id, attributes));
                true
            }
        }
    }

    /// Append a relationship. Endpoints are not required to exist.
    pub fn add_relationship(
        &mut self,
        source: EntityId,
        target: EntityId,
        kind: impl Into<RelationKind>,
    ) {
        self.relationships.push(Relationship::new(source, target, kind));
    }

    /// Remove all entities and relationships
    pub fn clear(&mut self) {
        self.entities.clear();
        self.relationships.clear();
    }

    /// Get an entity by ID
    pub fn get_entity(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Get an entity by ID, failing if it does not exist
    pub fn require_entity(&self, id: &EntityId) -> GraphResult<&Entity> {
        self.get_entity(id)
            .ok_or_else(|| GraphError::EntityNotFound(id.clone()))
    }

    /// Check if an entity exists
    pub fn has_entity(&self, id: &EntityId) -> bool {
        self.entities.contains_key(id)
    }

    /// All entities in insertion order
    pub fn list_entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Entities of one kind, in insertion order
    pub fn entities_of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> {
        self.entities.values().filter(move |e| e.kind() == kind)
    }

    /// All relationships in insertion order
    pub fn list_relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Relationships where `id` is the source or the target
    pub fn relationships_of<'a>(
        &'a self,
        id: &'a EntityId,
    ) -> impl Iterator<Item = &'a Relationship> + 'a {
        self.relationships.iter().filter(move |r| r.touches(id))
    }

    /// Distinct entities adjacent to `id` in either direction.
    ///
    /// Ordered by first appearance in the relationship list; a self-loop
    /// does not make an entity its own neighbor, and unresolved ids are
    /// skipped.
    pub fn neighbors(&self, id: &EntityId) -> Vec<&Entity> {
        let mut seen: IndexSet<&EntityId> = IndexSet::new();
        for rel in self.relationships_of(id) {
            if let Some(other) = rel.other_end(id) {
                if other != id {
                    seen.insert(other);
                }
            }
        }
        seen.into_iter()
            .filter_map(|other| self.entities.get(other))
            .collect()
    }

    /// Position of an entity in insertion order
    pub fn position_of(&self, id: &EntityId) -> Option<usize> {
        self.entities.get_index_of(id)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.relationships.is_empty()
    }

    /// Counts per entity kind and per relation kind
    pub fn statistics(&self) -> GraphStatistics {
        let mut stats = GraphStatistics {
            entity_count: self.entities.len(),
            relationship_count: self.relationships.len(),
            ..Default::default()
        };
        for entity in self.entities.values() {
            *stats.entities_by_kind.entry(entity.kind()).or_insert(0) += 1;
        }
        for rel in &self.relationships {
            *stats.relationships_by_kind.entry(rel.kind.clone()).or_insert(0) += 1;
        }
        stats
    }
}
