//! Vector math and the embedding index
//!
//! Embeddings are plain `Vec<f32>`; similarity is cosine over the shared
//! prefix of the two vectors.

pub mod index;
pub mod math;

pub use index::{EmbeddingIndex, ScoredEntity};
pub use math::{cosine_similarity, dot, norm};
