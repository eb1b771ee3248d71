//! Core journaling engine.
//!
//! [`admission`] is the single write path for entries; [`streak`] and
//! [`achievements`] maintain the per-user aggregates that accepted entries
//! feed. [`scorer`] and [`novelty`] are the two non-trivial admission gates.

pub mod achievements;
pub mod admission;
pub mod novelty;
pub mod query;
pub mod scorer;
pub mod stats;
pub mod streak;
pub mod types;

/// Convert an f32 embedding slice to raw bytes for sqlite-vec.
pub fn embedding_to_bytes(embedding: &[f32]) -> &[u8] {
    unsafe {
        std::slice::from_raw_parts(
            embedding.as_ptr() as *const u8,
            embedding.len() * std::mem::size_of::<f32>(),
        )
    }
}

/// Convert a cosine-similarity threshold to the equivalent max L2 distance.
///
/// Valid only for L2-normalized vectors, where `d² = 2(1 - cos)`.
pub fn cosine_threshold_to_l2(cosine_threshold: f64) -> f64 {
    (2.0 * (1.0 - cosine_threshold)).max(0.0).sqrt()
}

/// Convert an L2 distance between unit vectors back to cosine similarity.
pub fn l2_to_cosine_similarity(distance: f64) -> f64 {
    1.0 - (distance * distance) / 2.0
}
