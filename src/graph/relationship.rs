//! Directed, labeled relationships between entities

use super::types::{EntityId, RelationKind};
use serde::{Deserialize, Serialize};

/// A directed edge `(source, target, kind)`
///
/// Relationships carry no identity of their own: duplicates are legal and
/// each one counts toward the degree of its endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Source entity (edge goes FROM this entity)
    pub source: EntityId,

    /// Target entity (edge goes TO this entity)
    pub target: EntityId,

    /// Relationship kind (e.g. "OCCURS_IN")
    pub kind: RelationKind,
}

impl Relationship {
    pub fn new(source: EntityId, target: EntityId, kind: impl Into<RelationKind>) -> Self {
        Relationship {
            source,
            target,
            kind: kind.into(),
        }
    }

    /// Whether `id` is the source or the target
    pub fn touches(&self, id: &EntityId) -> bool {
        &self.source == id || &self.target == id
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// The endpoint opposite to `id`, if `id` is an endpoint
    pub fn other_end(&self, id: &EntityId) -> Option<&EntityId> {
        if &self.source == id {
            Some(&self.target)
        } else if &self.target == id {
            Some(&self.source)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EntityKind;

    #[test]
    fn test_relationship_endpoints() {
        let event = EntityId::new(EntityKind::Event, "e1");
        let texas = EntityId::new(EntityKind::Location, "Texas");
        let rel = Relationship::new(event.clone(), texas.clone(), RelationKind::OCCURS_IN);

        assert!(rel.touches(&event));
        assert!(rel.touches(&texas));
        assert!(!rel.is_self_loop());
        assert_eq!(rel.other_end(&event), Some(&texas));
        assert_eq!(rel.other_end(&EntityId::new(EntityKind::Paper, "p")), None);
    }
}
