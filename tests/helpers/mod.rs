#![allow(dead_code)]

use learnlog::db;
use learnlog::embedding::{EmbeddingProvider, EMBEDDING_DIM};
use rusqlite::Connection;

/// Open a fresh in-memory database with schema, migrations, and the seeded
/// achievement catalog applied.
pub fn test_db() -> Connection {
    db::load_sqlite_vec();
    let conn = Connection::open_in_memory().unwrap();
    conn.pragma_update(None, "foreign_keys", "ON").unwrap();
    db::schema::init_schema(&conn).unwrap();
    db::migrations::run_migrations(&conn).unwrap();
    db::seed::seed_achievements(&conn).unwrap();
    conn
}

/// Deterministic embedding provider for pipeline tests.
///
/// Hashes the text to a single spike dimension, so identical text yields an
/// identical unit vector (cosine similarity 1.0) and different text yields
/// orthogonal vectors (similarity 0.0). No model files required.
pub struct StubEmbedder;

impl EmbeddingProvider for StubEmbedder {
    fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        let mut hash: u64 = 1469598103934665603;
        for byte in text.bytes() {
            hash ^= byte as u64;
            hash = hash.wrapping_mul(1099511628211);
        }
        let mut v = vec![0.0f32; EMBEDDING_DIM];
        v[(hash % EMBEDDING_DIM as u64) as usize] = 1.0;
        Ok(v)
    }
}

/// Embedding provider that always fails, for dependency-failure tests.
pub struct FailingEmbedder;

impl EmbeddingProvider for FailingEmbedder {
    fn embed(&self, _text: &str) -> anyhow::Result<Vec<f32>> {
        anyhow::bail!("embedding model unavailable")
    }
}

/// A 384-dim unit vector with a spike at position `seed`.
pub fn test_embedding(seed: u8) -> Vec<f32> {
    let mut v = vec![0.0f32; EMBEDDING_DIM];
    v[seed as usize % EMBEDDING_DIM] = 1.0;
    v
}
