//! Validated input records
//!
//! These are produced by an external parser; every field beyond the
//! identifier and name may be absent.

use super::text::CanonicalText;
use crate::graph::{EntityAttributes, EntityId, EntityKind, RelationKind};
use serde::{Deserialize, Serialize};

/// Common shape of a record the pipeline can ingest
pub trait IngestRecord: Sync {
    const KIND: EntityKind;

    fn external_id(&self) -> &str;

    fn attributes(&self) -> EntityAttributes;

    fn canonical_text(&self) -> String;

    /// Region-like field and the relation linking the record to it
    fn location_link(&self) -> Option<(&str, &'static str)> {
        None
    }

    fn entity_id(&self) -> EntityId {
        EntityId::new(Self::KIND, self.external_id())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub published: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub external_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub asset_type: Option<String>,
    #[serde(default)]
    pub severity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRecord {
    pub external_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub jurisdiction: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl IngestRecord for PaperRecord {
    const KIND: EntityKind = EntityKind::Paper;

    fn external_id(&self) -> &str {
        &self.id
    }

    fn attributes(&self) -> EntityAttributes {
        EntityAttributes {
            title: Some(self.title.clone()),
            summary: self.summary.clone(),
            published: self.published.clone(),
            ..Default::default()
        }
    }

    fn canonical_text(&self) -> String {
        CanonicalText::new()
            .line(&self.title)
            .optional(self.summary.as_deref())
            .build()
    }
}

impl IngestRecord for EventRecord {
    const KIND: EntityKind = EntityKind::Event;

    fn external_id(&self) -> &str {
        &self.external_id
    }

    fn attributes(&self) -> EntityAttributes {
        EntityAttributes {
            title: Some(self.name.clone()),
            summary: self.description.clone(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            region: self.region.clone(),
            asset_type: self.asset_type.clone(),
            severity: self.severity,
            ..Default::default()
        }
    }

    fn canonical_text(&self) -> String {
        CanonicalText::new()
            .line(&self.name)
            .optional(self.description.as_deref())
            .labeled("Region", self.region.as_deref())
            .labeled("Asset", self.asset_type.as_deref())
            .build()
    }

    fn location_link(&self) -> Option<(&str, &'static str)> {
        self.region.as_deref().map(|r| (r, RelationKind::OCCURS_IN))
    }
}

impl IngestRecord for PolicyRecord {
    const KIND: EntityKind = EntityKind::Policy;

    fn external_id(&self) -> &str {
        &self.external_id
    }

    fn attributes(&self) -> EntityAttributes {
        EntityAttributes {
            title: Some(self.name.clone()),
            summary: self.description.clone(),
            jurisdiction: self.jurisdiction.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            category: self.category.clone(),
            ..Default::default()
        }
    }

    fn canonical_text(&self) -> String {
        CanonicalText::new()
            .line(&self.name)
            .optional(self.description.as_deref())
            .labeled("Jurisdiction", self.jurisdiction.as_deref())
            .labeled("Category", self.category.as_deref())
            .build()
    }

    fn location_link(&self) -> Option<(&str, &'static str)> {
        self.jurisdiction.as_deref().map(|j| (j, RelationKind::APPLIES_TO))
    }
}
