//! Embedding index with exact top-k cosine search
//!
//! A linear scan over every stored vector: O(n·d) per query. Results are
//! ranked by descending similarity; equal scores keep insertion order.

use super::math::cosine_similarity;
use crate::graph::EntityId;
use indexmap::IndexMap;
use serde::Serialize;

/// A search hit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredEntity {
    pub id: EntityId,
    pub score: f32,
}

/// Mapping from entity id to its embedding vector
///
/// Dimensionality is not enforced across entries.
#[derive(Debug, Default, Clone)]
pub struct EmbeddingIndex {
    vectors: IndexMap<EntityId, Vec<f32>>,
}

impl EmbeddingIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store or replace the vector for `id`.
    ///
    /// Replacing keeps the entry's original insertion position, which is
    /// what tie-breaking in `top_k` uses.
    pub fn upsert(&mut self, id: EntityId, vector: Vec<f32>) {
        self.vectors.insert(id, vector);
    }

    pub fn get(&self, id: &EntityId) -> Option<&[f32]> {
        self.vectors.get(id).map(Vec::as_slice)
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.vectors.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn clear(&mut self) {
        self.vectors.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, &[f32])> {
        self.vectors.iter().map(|(id, v)| (id, v.as_slice()))
    }

    /// The `k` most similar entries to `query`, best first.
    ///
    /// Returns at most `min(k, len)` hits and never fails; an empty index
    /// yields an empty result. NaN similarities rank last.
    pub fn top_k(&self, query: &[f32], k: usize) -> Vec<ScoredEntity> {
        if k == 0 || self.vectors.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(f32, &EntityId)> = self
            .vectors
            .iter()
            .map(|(id, vector)| (cosine_similarity(query, vector), id))
            .collect();

        // Stable sort: ties keep insertion order
        scored.sort_by(|a, b| sort_key(b.0).total_cmp(&sort_key(a.0)));
        scored.truncate(k);

        scored
            .into_iter()
            .map(|(score, id)| ScoredEntity {
                id: id.clone(),
                score,
            })
            .collect()
    }
}

fn sort_key(score: f32) -> f32 {
    if score.is_nan() {
        f32::NEG_INFINITY
    } else {
        score
    }
}
