//! Write path — the three-stage admission pipeline.
//!
//! [`admit_entry`] is the single entry point. Stages run in order — word-count
//! floor, generic-content scorer, novelty check — each short-circuiting on
//! rejection. Rejections are recorded in the append-only rejection log (a
//! best-effort side effect that never blocks the response); acceptance
//! persists the entry row and its embedding vector inside one transaction.

use chrono::NaiveDate;
use rusqlite::{params, Connection};

use crate::config::AdmissionConfig;
use crate::embedding::EmbeddingProvider;
use crate::journal::novelty::{self, NoveltyOutcome};
use crate::journal::types::{AdmissionError, RejectionReason};
use crate::journal::{embedding_to_bytes, scorer};

/// Result of one admission attempt.
#[derive(Debug, Clone)]
pub enum AdmissionOutcome {
    /// The entry was persisted.
    Accepted { entry_id: String },
    /// The entry was rejected with remediation feedback.
    Rejected {
        reason: RejectionReason,
        feedback: String,
    },
}

/// Run the full admission pipeline for one submission.
///
/// `date` is the logical writing day the entry belongs to. Validation
/// rejections are an expected outcome and come back as
/// [`AdmissionOutcome::Rejected`]; only dependency failures (embedding,
/// store) surface as [`AdmissionError`].
pub fn admit_entry(
    conn: &mut Connection,
    embedder: &dyn EmbeddingProvider,
    config: &AdmissionConfig,
    user_id: &str,
    text: &str,
    date: NaiveDate,
) -> Result<AdmissionOutcome, AdmissionError> {
    // Stage 1: word-count floor
    let word_count = text.split_whitespace().count();
    if word_count < config.min_word_count {
        let feedback = format!(
            "Please write at least {} words (currently {}).",
            config.min_word_count, word_count
        );
        return Ok(reject(conn, user_id, text, RejectionReason::TooShort, feedback, None));
    }

    // Stage 2: generic-content scorer
    let (is_generic, analysis) = scorer::score(text);
    if is_generic {
        tracing::debug!(
            user_id,
            generic_score = analysis.generic_score,
            specificity_score = analysis.specificity_score,
            "entry flagged as generic"
        );
        let feedback = analysis.feedback();
        return Ok(reject(conn, user_id, text, RejectionReason::Generic, feedback, None));
    }

    // Stage 3: novelty check. The embedding is needed either way — a
    // failure here is fatal because an accepted entry cannot be persisted
    // without its vector.
    let embedding = embedder.embed(text).map_err(AdmissionError::Embedding)?;

    if let NoveltyOutcome::Duplicate(found) =
        novelty::check(conn, user_id, &embedding, config.similarity_threshold)
    {
        let similarity = found.similarity;
        let feedback = found.feedback();
        return Ok(reject(
            conn,
            user_id,
            text,
            RejectionReason::Duplicate,
            feedback,
            Some(similarity),
        ));
    }

    // Accepted: persist entry row + vector atomically.
    let entry_id = insert_entry(conn, user_id, text, date, word_count, &embedding)?;
    tracing::info!(user_id, entry_id = %entry_id, word_count, "entry accepted");

    Ok(AdmissionOutcome::Accepted { entry_id })
}

/// Record a rejection and build the outcome. The log write is best-effort:
/// a failing rejection sink must not block the rejection response.
fn reject(
    conn: &Connection,
    user_id: &str,
    text: &str,
    reason: RejectionReason,
    feedback: String,
    similarity: Option<f64>,
) -> AdmissionOutcome {
    tracing::info!(user_id, reason = %reason, "entry rejected");

    if let Err(e) = log_rejection(conn, user_id, text, reason, similarity) {
        tracing::warn!(user_id, reason = %reason, error = %e, "failed to record rejection");
    }

    AdmissionOutcome::Rejected { reason, feedback }
}

/// Append a row to the rejection log.
fn log_rejection(
    conn: &Connection,
    user_id: &str,
    text: &str,
    reason: RejectionReason,
    similarity: Option<f64>,
) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO rejection_logs (user_id, content, reason, similarity_score, rejected_at) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            user_id,
            text,
            reason.as_str(),
            similarity,
            chrono::Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// Insert the entry row and its embedding vector in one transaction.
fn insert_entry(
    conn: &mut Connection,
    user_id: &str,
    text: &str,
    date: NaiveDate,
    word_count: usize,
    embedding: &[f32],
) -> Result<String, rusqlite::Error> {
    let tx = conn.transaction()?;
    let id = uuid::Uuid::now_v7().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    tx.execute(
        "INSERT INTO entries (id, user_id, content, date, word_count, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![id, user_id, text, date.to_string(), word_count as i64, now],
    )?;

    tx.execute(
        "INSERT INTO entries_vec (entry_id, user_id, embedding) VALUES (?1, ?2, ?3)",
        params![id, user_id, embedding_to_bytes(embedding)],
    )?;

    tx.commit()?;
    Ok(id)
}
