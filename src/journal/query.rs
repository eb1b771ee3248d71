//! Read path — listing entries, rejections, and achievement status.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, params_from_iter, Connection};

use crate::journal::types::{AchievementStatus, Entry, RejectionLog, RejectionReason};

/// Filters for [`list_entries`]. All fields optional and combined with AND.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    /// Case-insensitive substring match on content.
    pub search: Option<String>,
    /// Inclusive lower bound on entry date.
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on entry date.
    pub end_date: Option<NaiveDate>,
}

/// List a user's entries, newest first.
pub fn list_entries(conn: &Connection, user_id: &str, filter: &EntryFilter) -> Result<Vec<Entry>> {
    let mut sql = String::from(
        "SELECT id, user_id, content, date, word_count, created_at, ai_score, tags \
         FROM entries WHERE user_id = ?1",
    );
    let mut params: Vec<String> = vec![user_id.to_string()];

    if let Some(search) = &filter.search {
        params.push(format!("%{}%", search.to_lowercase()));
        sql.push_str(&format!(" AND lower(content) LIKE ?{}", params.len()));
    }
    if let Some(start) = filter.start_date {
        params.push(start.to_string());
        sql.push_str(&format!(" AND date >= ?{}", params.len()));
    }
    if let Some(end) = filter.end_date {
        params.push(end.to_string());
        sql.push_str(&format!(" AND date <= ?{}", params.len()));
    }
    sql.push_str(" ORDER BY date DESC, created_at DESC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(params.iter()), |row| {
            let date_str: String = row.get(3)?;
            let tags_json: Option<String> = row.get(7)?;
            Ok((
                Entry {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    content: row.get(2)?,
                    date: NaiveDate::MIN,
                    word_count: row.get(4)?,
                    created_at: row.get(5)?,
                    ai_score: row.get(6)?,
                    tags: None,
                },
                date_str,
                tags_json,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(mut entry, date_str, tags_json)| {
            entry.date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                .with_context(|| format!("invalid date for entry {}: {date_str}", entry.id))?;
            entry.tags = tags_json.and_then(|t| serde_json::from_str(&t).ok());
            Ok(entry)
        })
        .collect()
}

/// List a user's rejection log, newest first.
pub fn list_rejections(conn: &Connection, user_id: &str) -> Result<Vec<RejectionLog>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, content, reason, similarity_score, rejected_at \
         FROM rejection_logs WHERE user_id = ?1 ORDER BY rejected_at DESC, id DESC",
    )?;
    let logs = stmt
        .query_map(params![user_id], |row| {
            let reason_str: String = row.get(3)?;
            Ok((
                RejectionLog {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    content: row.get(2)?,
                    reason: RejectionReason::TooShort,
                    similarity_score: row.get(4)?,
                    rejected_at: row.get(5)?,
                },
                reason_str,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    logs.into_iter()
        .map(|(mut log, reason_str)| {
            log.reason = reason_str
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))?;
            Ok(log)
        })
        .collect()
}

/// The full achievement catalog joined with a user's unlocks, in seeding
/// order (locked achievements included).
pub fn achievement_status(conn: &Connection, user_id: &str) -> Result<Vec<AchievementStatus>> {
    let mut stmt = conn.prepare(
        "SELECT a.id, a.name, a.description, a.icon_name, a.criteria, ua.unlocked_at \
         FROM achievements a \
         LEFT JOIN user_achievements ua \
             ON ua.achievement_id = a.id AND ua.user_id = ?1 \
         ORDER BY a.rowid",
    )?;
    let statuses = stmt
        .query_map(params![user_id], |row| {
            let unlocked_at: Option<String> = row.get(5)?;
            Ok(AchievementStatus {
                achievement: crate::journal::types::Achievement {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    description: row.get(2)?,
                    icon_name: row.get(3)?,
                    criteria: row.get(4)?,
                },
                unlocked: unlocked_at.is_some(),
                unlocked_at,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(statuses)
}
