//! Core journal type definitions.
//!
//! Defines [`Entry`] (an accepted journal entry), [`RejectionReason`] (the
//! machine-readable admission reason codes), [`RejectionLog`] (the append-only
//! rejection record), [`StreakAggregate`], and the achievement catalog types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Machine-readable reason an admission attempt was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// Below the configured word-count floor.
    TooShort,
    /// Flagged by the generic-content scorer.
    Generic,
    /// Near-duplicate of a prior entry by embedding similarity.
    Duplicate,
}

impl RejectionReason {
    /// SQL-compatible string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TooShort => "too_short",
            Self::Generic => "generic",
            Self::Duplicate => "duplicate",
        }
    }
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RejectionReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "too_short" => Ok(Self::TooShort),
            "generic" => Ok(Self::Generic),
            "duplicate" => Ok(Self::Duplicate),
            _ => Err(format!("unknown rejection reason: {s}")),
        }
    }
}

/// Fatal admission failure — distinct from a validation rejection, which is
/// an expected outcome and carries remediation feedback instead.
///
/// An embedding failure aborts the request (the accepted entry could not be
/// persisted with its vector); a store failure likewise. Only the novelty
/// *query* fails open, inside [`crate::journal::novelty`].
#[derive(Debug, thiserror::Error)]
pub enum AdmissionError {
    #[error("could not embed entry text")]
    Embedding(#[source] anyhow::Error),
    #[error("could not persist entry")]
    Store(#[from] rusqlite::Error),
}

/// An accepted journal entry, matching the `entries` table schema.
///
/// Created only through a successful admission run; immutable thereafter.
/// `word_count` is the whitespace-token count of `content` at acceptance
/// time and is never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    /// UUID v7 (time-sortable) primary key.
    pub id: String,
    /// Owning user identifier. All queries are scoped by this.
    pub user_id: String,
    /// The full entry text.
    pub content: String,
    /// The logical "writing day" — a calendar date, not a timestamp.
    pub date: NaiveDate,
    /// Whitespace-token count of `content`, fixed at acceptance.
    pub word_count: u32,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
    /// Optional AI-derived quality score.
    pub ai_score: Option<f64>,
    /// Optional AI-derived tags (arbitrary JSON).
    pub tags: Option<serde_json::Value>,
}

/// A rejected submission, matching the `rejection_logs` table schema.
///
/// Append-only; written as a side effect of pipeline rejection and never
/// read by the pipeline itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectionLog {
    pub id: i64,
    pub user_id: String,
    pub content: String,
    pub reason: RejectionReason,
    /// Nearest-neighbor similarity, present only for `duplicate` rejections.
    pub similarity_score: Option<f64>,
    /// ISO 8601 rejection timestamp.
    pub rejected_at: String,
}

/// Per-user streak aggregate, matching the `streak_data` table schema.
///
/// Written exclusively by the streak tracker. `current_streak <= longest_streak`
/// always holds after recomputation; `longest_streak` never decreases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakAggregate {
    pub user_id: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Count of distinct entry dates. One qualifying entry per calendar day
    /// for streak purposes, even when multiple entries share a date. Not the
    /// raw entry count — achievements read that separately.
    pub total_days: u32,
    pub last_entry_date: Option<NaiveDate>,
}

/// A catalog achievement, matching the `achievements` table schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Frontend icon identifier (e.g. `"Flame"`, `"Zap"`).
    pub icon_name: String,
    /// Machine-readable criteria code (e.g. `"STREAK_7"`).
    pub criteria: String,
}

/// A catalog achievement joined with a user's unlock status.
#[derive(Debug, Clone, Serialize)]
pub struct AchievementStatus {
    #[serde(flatten)]
    pub achievement: Achievement,
    pub unlocked: bool,
    /// ISO 8601 unlock timestamp, present only when unlocked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<String>,
}
