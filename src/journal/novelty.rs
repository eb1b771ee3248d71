//! Near-duplicate detection via per-user nearest-neighbor search.
//!
//! Queries the vec0 table for the single closest prior entry (partitioned by
//! user), converts the L2 distance to cosine similarity, and flags matches at
//! or above the configured threshold. The outcome is typed so callers can
//! distinguish "no duplicate" from "couldn't check": a failed similarity
//! query fails open — journaling availability wins over duplicate detection —
//! but the failure is still visible as a warning event.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use crate::journal::{cosine_threshold_to_l2, embedding_to_bytes, l2_to_cosine_similarity};

/// Longest snippet of the prior entry quoted in duplicate feedback.
const SNIPPET_CHARS: usize = 50;

/// Result of a novelty check.
#[derive(Debug, Clone)]
pub enum NoveltyOutcome {
    /// No prior entry is similar enough to matter.
    Novel,
    /// A prior entry crossed the similarity threshold.
    Duplicate(DuplicateMatch),
    /// The similarity query failed; the entry is admitted anyway.
    Unavailable,
}

/// The prior entry a submission was too similar to.
#[derive(Debug, Clone)]
pub struct DuplicateMatch {
    pub entry_id: String,
    /// Cosine similarity in `[0, 1]`, at or above the threshold.
    pub similarity: f64,
    pub date: NaiveDate,
    /// First [`SNIPPET_CHARS`] characters of the prior entry.
    pub snippet: String,
}

impl DuplicateMatch {
    /// Human-readable remediation feedback for the writer.
    pub fn feedback(&self) -> String {
        format!(
            "This is {:.0}% similar to your entry from {} (\"{}...\"). Try finding a new angle on it.",
            self.similarity * 100.0,
            self.date.format("%B %-d, %Y"),
            self.snippet,
        )
    }
}

/// Check a candidate embedding against the user's prior entries.
///
/// Trivially novel when the user has no prior entries. Never returns an
/// error: query failures are logged and collapse to
/// [`NoveltyOutcome::Unavailable`].
pub fn check(
    conn: &Connection,
    user_id: &str,
    embedding: &[f32],
    similarity_threshold: f64,
) -> NoveltyOutcome {
    let max_distance = cosine_threshold_to_l2(similarity_threshold);
    match nearest_neighbor(conn, user_id, embedding) {
        Ok(None) => NoveltyOutcome::Novel,
        Ok(Some((entry_id, distance))) => {
            if distance > max_distance {
                return NoveltyOutcome::Novel;
            }
            let similarity = l2_to_cosine_similarity(distance);
            match load_match(conn, &entry_id, similarity) {
                Ok(found) => NoveltyOutcome::Duplicate(found),
                Err(e) => {
                    tracing::warn!(
                        user_id,
                        entry_id,
                        error = %e,
                        "nearest entry vanished mid-check — admitting without novelty check"
                    );
                    NoveltyOutcome::Unavailable
                }
            }
        }
        Err(e) => {
            tracing::warn!(
                user_id,
                error = %e,
                "similarity query failed — admitting without novelty check"
            );
            NoveltyOutcome::Unavailable
        }
    }
}

/// KNN query for the user's single nearest prior entry.
fn nearest_neighbor(
    conn: &Connection,
    user_id: &str,
    embedding: &[f32],
) -> anyhow::Result<Option<(String, f64)>> {
    let embedding_bytes = embedding_to_bytes(embedding);
    let row = conn
        .query_row(
            "SELECT entry_id, distance FROM entries_vec \
             WHERE embedding MATCH ?1 AND user_id = ?2 \
             ORDER BY distance LIMIT 1",
            params![embedding_bytes, user_id],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?)),
        )
        .optional()?;
    Ok(row)
}

/// Load the date and snippet for a matched prior entry.
fn load_match(conn: &Connection, entry_id: &str, similarity: f64) -> anyhow::Result<DuplicateMatch> {
    let (date_str, content): (String, String) = conn.query_row(
        "SELECT date, content FROM entries WHERE id = ?1",
        params![entry_id],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")?;
    let snippet: String = content.chars().take(SNIPPET_CHARS).collect();

    Ok(DuplicateMatch {
        entry_id: entry_id.to_string(),
        similarity,
        date,
        snippet,
    })
}
