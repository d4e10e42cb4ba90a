//! Core type definitions for the knowledge graph

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Kind of a domain entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum EntityKind {
    Paper,
    Event,
    Policy,
    Location,
}

impl EntityKind {
    /// All kinds, in ingestion order
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Paper,
        EntityKind::Event,
        EntityKind::Policy,
        EntityKind::Location,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Paper => "Paper",
            EntityKind::Event => "Event",
            EntityKind::Policy => "Policy",
            EntityKind::Location => "Location",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an identifier or kind fails
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdParseError {
    #[error("Unknown entity kind: {0}")]
    UnknownKind(String),

    #[error("Malformed entity id (expected \"Kind:externalId\"): {0}")]
    Malformed(String),
}

impl FromStr for EntityKind {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Paper" => Ok(EntityKind::Paper),
            "Event" => Ok(EntityKind::Event),
            "Policy" => Ok(EntityKind::Policy),
            "Location" => Ok(EntityKind::Location),
            other => Err(IdParseError::UnknownKind(other.to_string())),
        }
    }
}

/// Composite entity identifier `"{kind}:{externalId}"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId {
    kind: EntityKind,
    key: String,
}

impl EntityId {
    pub fn new(kind: EntityKind, external_id: impl AsRef<str>) -> Self {
        EntityId {
            kind,
            key: format!("{}:{}", kind, external_id.as_ref()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// The part after the kind prefix
    pub fn external_id(&self) -> &str {
        &self.key[self.kind.as_str().len() + 1..]
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl FromStr for EntityId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, external) = s
            .split_once(':')
            .ok_or_else(|| IdParseError::Malformed(s.to_string()))?;
        let kind: EntityKind = kind.parse()?;
        Ok(EntityId::new(kind, external))
    }
}

impl TryFrom<String> for EntityId {
    type Error = IdParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.key
    }
}

/// Relationship kind (open set, e.g. "OCCURS_IN", "APPLIES_TO")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct RelationKind(String);

impl RelationKind {
    pub const OCCURS_IN: &'static str = "OCCURS_IN";
    pub const APPLIES_TO: &'static str = "APPLIES_TO";
    pub const MENTIONS_EVENT: &'static str = "MENTIONS_EVENT";

    pub fn new(kind: impl Into<String>) -> Self {
        RelationKind(kind.into())
    }

    pub fn occurs_in() -> Self {
        RelationKind::new(Self::OCCURS_IN)
    }

    pub fn applies_to() -> Self {
        RelationKind::new(Self::APPLIES_TO)
    }

    pub fn mentions_event() -> Self {
        RelationKind::new(Self::MENTIONS_EVENT)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RelationKind {
    fn from(s: String) -> Self {
        RelationKind(s)
    }
}

impl From<&str> for RelationKind {
    fn from(s: &str) -> Self {
        RelationKind(s.to_string())
    }
}
