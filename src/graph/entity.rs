//! Entity records
//!
//! An entity is a node of the knowledge graph. Its kind is fixed by its
//! identifier; its attributes are merged field by field on every upsert.

use super::types::{EntityId, EntityKind};
use serde::{Deserialize, Serialize};

/// Attribute patch for an entity
///
/// Every field is optional. Merging copies the fields that are set in the
/// patch and leaves all other fields untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    // Paper
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,

    // Event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<f64>,

    // Policy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    // Location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

macro_rules! merge_fields {
    ($target:expr, $patch:expr, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $patch.$field {
                $target.$field = Some(value);
            }
        )+
    };
}

impl EntityAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_severity(mut self, severity: f64) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Merge a patch into these attributes (last write wins per field)
    pub fn merge(&mut self, patch: EntityAttributes) {
        merge_fields!(
            self,
            patch,
            title,
            summary,
            published,
            start_time,
            end_time,
            region,
            asset_type,
            severity,
            jurisdiction,
            start_date,
            end_date,
            category,
            name,
        );
    }
}

/// A node in the knowledge graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Unique identifier (`"{kind}:{externalId}"`)
    pub id: EntityId,

    /// Merged attributes
    pub attributes: EntityAttributes,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,

    /// Last update timestamp (Unix milliseconds)
    pub updated_at: i64,
}

impl Entity {
    pub fn new(id: EntityId, attributes: EntityAttributes) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Entity {
            id,
            attributes,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.id.kind()
    }

    /// Display title: explicit title, else location name, else the external id
    pub fn title(&self) -> &str {
        self.attributes
            .title
            .as_deref()
            .or(self.attributes.name.as_deref())
            .unwrap_or_else(|| self.id.external_id())
    }

    /// The timestamp field most relevant for this kind
    pub fn timestamp(&self) -> Option<&str> {
        let attrs = &self.attributes;
        match self.kind() {
            EntityKind::Paper => attrs.published.as_deref(),
            EntityKind::Event => attrs.start_time.as_deref().or(attrs.end_time.as_deref()),
            EntityKind::Policy => attrs.start_date.as_deref().or(attrs.end_date.as_deref()),
            EntityKind::Location => None,
        }
    }

    /// Region for events, jurisdiction for policies, name for locations
    pub fn region(&self) -> Option<&str> {
        let attrs = &self.attributes;
        match self.kind() {
            EntityKind::Event => attrs.region.as_deref(),
            EntityKind::Policy => attrs.jurisdiction.as_deref(),
            EntityKind::Location => attrs.name.as_deref(),
            EntityKind::Paper => None,
        }
    }

    pub(crate) fn merge(&mut self, patch: EntityAttributes) {
        self.attributes.merge(patch);
        self.updated_at = chrono::Utc::now().timestamp_millis();
    }
}
