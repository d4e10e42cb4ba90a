//! Knowledge graph data model
//!
//! This module implements the entity/relationship model:
//! - Entities keyed by a composite `"{kind}:{externalId}"` identifier
//! - Field-wise merge on re-upsert (no duplicate entities)
//! - Directed, labeled relationships with duplicates allowed
//! - In-memory storage with insertion-ordered iteration

pub mod entity;
pub mod relationship;
pub mod store;
pub mod types;

// Re-export main types
pub use entity::{Entity, EntityAttributes};
pub use relationship::Relationship;
pub use store::{GraphError, GraphResult, GraphStatistics, GraphStore};
pub use types::{EntityId, EntityKind, IdParseError, RelationKind};
