//! LearnLog — a journal that makes you earn the save.
//!
//! Every submitted entry passes a three-stage admission pipeline before it is
//! persisted:
//!
//! 1. **Length floor** — entries below a configured word count are rejected
//!    outright (`too_short`).
//! 2. **Generic-content scorer** — a multi-signal heuristic that rejects
//!    clichéd, unspecific writing (`generic`) and tells the writer what
//!    concrete detail is missing.
//! 3. **Novelty check** — the entry's embedding is compared against the
//!    user's prior entries via nearest-neighbor search; near-duplicates are
//!    rejected (`duplicate`) with a pointer to the earlier entry.
//!
//! Accepted entries feed two per-user aggregates: a daily writing-streak
//! tracker and an achievement unlock engine.
//!
//! # Architecture
//!
//! - **Storage**: SQLite with [sqlite-vec](https://github.com/asg017/sqlite-vec)
//!   for per-user vector search
//! - **Embeddings**: Local ONNX Runtime with all-MiniLM-L6-v2 (384 dimensions)
//! - **Frontend**: a small CLI (`submit`, `entries`, `streak`, `achievements`,
//!   `stats`)
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`db`] — SQLite database initialization, schema, migrations, and seed data
//! - [`embedding`] — Text-to-vector embedding pipeline via ONNX Runtime
//! - [`journal`] — Core engine: admission pipeline, scorer, novelty check,
//!   streaks, achievements, and analytics

pub mod config;
pub mod db;
pub mod embedding;
pub mod journal;
