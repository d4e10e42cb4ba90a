//! Structured context handed to the generator

use crate::graph::{Entity, EntityId, EntityKind};
use serde::Serialize;

/// One retrieved or neighboring entity, as shown to the model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextItem {
    pub id: EntityId,
    pub kind: EntityKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Cosine similarity to the question; absent for summarization context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl ContextItem {
    pub fn from_entity(entity: &Entity, score: Option<f32>, summary_chars: Option<usize>) -> Self {
        let summary = entity.attributes.summary.as_deref().map(|s| match summary_chars {
            Some(limit) => truncate_chars(s, limit).to_string(),
            None => s.to_string(),
        });

        ContextItem {
            id: entity.id.clone(),
            kind: entity.kind(),
            title: entity.title().to_string(),
            timestamp: entity.timestamp().map(str::to_string),
            region: entity.region().map(str::to_string),
            summary,
            score,
        }
    }
}

/// Compact JSON array of context items
pub fn context_block(items: &[ContextItem]) -> serde_json::Result<String> {
    serde_json::to_string(items)
}

/// Prefix of at most `limit` chars
pub fn truncate_chars(s: &str, limit: usize) -> &str {
    match s.char_indices().nth(limit) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
