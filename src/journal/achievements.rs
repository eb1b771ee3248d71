//! Achievement evaluation and unlocking.
//!
//! Runs after the streak tracker has persisted its aggregate. Each catalog
//! achievement has a criteria code mapped here to a predicate over the
//! user's aggregates; crossing a threshold unlocks the achievement exactly
//! once. Unlocks are permanent — a later drop back below the threshold
//! never revokes one.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

/// Aggregates the criteria predicates evaluate against.
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregateSnapshot {
    /// Current consecutive-day streak from `streak_data`.
    pub current_streak: u32,
    /// Raw count of accepted entries (not distinct days).
    pub total_entries: u64,
    /// Sum of `word_count` over all accepted entries.
    pub total_words: u64,
}

/// Criteria code → predicate. Codes match the seeded catalog rows; a catalog
/// row whose code has no predicate here is skipped with a warning.
const RULES: &[(&str, fn(&AggregateSnapshot) -> bool)] = &[
    ("FIRST_STEP", |s| s.total_entries >= 1),
    ("STREAK_3", |s| s.current_streak >= 3),
    ("STREAK_7", |s| s.current_streak >= 7),
    ("STREAK_30", |s| s.current_streak >= 30),
    ("WORDS_1000", |s| s.total_words >= 1000),
    ("ENTRIES_10", |s| s.total_entries >= 10),
];

/// Evaluate every rule against the user's current aggregates and unlock any
/// newly satisfied achievements.
///
/// Returns the display names of achievements unlocked by this call, in
/// catalog-seeding order. Idempotent: re-running with unchanged aggregates
/// returns an empty list.
pub fn evaluate(conn: &Connection, user_id: &str) -> Result<Vec<String>> {
    let snapshot = snapshot(conn, user_id)?;
    let mut newly_unlocked = Vec::new();

    for (criteria, satisfied) in RULES {
        if !satisfied(&snapshot) {
            continue;
        }
        if let Some(name) = unlock_if_needed(conn, user_id, criteria)? {
            tracing::info!(user_id, criteria, achievement = %name, "achievement unlocked");
            newly_unlocked.push(name);
        }
    }

    Ok(newly_unlocked)
}

/// Read the aggregates the predicates need. Missing streak row means zero.
pub fn snapshot(conn: &Connection, user_id: &str) -> Result<AggregateSnapshot> {
    let current_streak: u32 = conn
        .query_row(
            "SELECT current_streak FROM streak_data WHERE user_id = ?1",
            params![user_id],
            |row| row.get(0),
        )
        .optional()?
        .unwrap_or(0);

    let (total_entries, total_words): (u64, u64) = conn
        .query_row(
            "SELECT COUNT(*), COALESCE(SUM(word_count), 0) FROM entries WHERE user_id = ?1",
            params![user_id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .context("failed to read entry aggregates")?;

    Ok(AggregateSnapshot {
        current_streak,
        total_entries,
        total_words,
    })
}

/// Unlock the achievement with this criteria code unless already unlocked.
/// Returns the achievement's display name when a new unlock was recorded.
fn unlock_if_needed(conn: &Connection, user_id: &str, criteria: &str) -> Result<Option<String>> {
    let catalog_row = conn
        .query_row(
            "SELECT id, name FROM achievements WHERE criteria = ?1",
            params![criteria],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
        )
        .optional()?;

    let Some((achievement_id, name)) = catalog_row else {
        tracing::warn!(criteria, "no catalog achievement for criteria code");
        return Ok(None);
    };

    let already_unlocked: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM user_achievements WHERE user_id = ?1 AND achievement_id = ?2)",
        params![user_id, achievement_id],
        |row| row.get(0),
    )?;
    if already_unlocked {
        return Ok(None);
    }

    conn.execute(
        "INSERT INTO user_achievements (id, user_id, achievement_id, unlocked_at) \
         VALUES (?1, ?2, ?3, ?4)",
        params![
            uuid::Uuid::now_v7().to_string(),
            user_id,
            achievement_id,
            chrono::Utc::now().to_rfc3339(),
        ],
    )?;

    Ok(Some(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};

    fn test_db() -> Connection {
        crate::db::load_sqlite_vec();
        let conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "foreign_keys", "ON").unwrap();
        crate::db::schema::init_schema(&conn).unwrap();
        crate::db::seed::seed_achievements(&conn).unwrap();
        conn
    }

    fn insert_entry(conn: &Connection, user_id: &str, date: NaiveDate, word_count: u32) {
        conn.execute(
            "INSERT INTO entries (id, user_id, content, date, word_count, created_at) \
             VALUES (?1, ?2, 'text', ?3, ?4, ?5)",
            params![
                uuid::Uuid::now_v7().to_string(),
                user_id,
                date.to_string(),
                word_count,
                chrono::Utc::now().to_rfc3339(),
            ],
        )
        .unwrap();
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 25).unwrap()
    }

    #[test]
    fn first_entry_unlocks_first_steps() {
        let conn = test_db();
        insert_entry(&conn, "sam", today(), 20);

        let unlocked = evaluate(&conn, "sam").unwrap();
        assert_eq!(unlocked, vec!["First Steps"]);
    }

    #[test]
    fn second_evaluation_is_empty() {
        let conn = test_db();
        insert_entry(&conn, "sam", today(), 20);

        assert_eq!(evaluate(&conn, "sam").unwrap(), vec!["First Steps"]);
        assert!(evaluate(&conn, "sam").unwrap().is_empty());
    }

    #[test]
    fn streak_thresholds_unlock_in_order() {
        let conn = test_db();
        for offset in 0..3 {
            insert_entry(&conn, "sam", today() - Days::new(offset), 20);
        }
        crate::journal::streak::recompute(&conn, "sam", today()).unwrap();

        let unlocked = evaluate(&conn, "sam").unwrap();
        assert!(unlocked.contains(&"On Fire".to_string()));
        assert!(!unlocked.contains(&"Unstoppable".to_string()));

        // Extend the run to seven days.
        for offset in 3..7 {
            insert_entry(&conn, "sam", today() - Days::new(offset), 20);
        }
        crate::journal::streak::recompute(&conn, "sam", today()).unwrap();

        let unlocked = evaluate(&conn, "sam").unwrap();
        assert_eq!(unlocked, vec!["Unstoppable"]);
    }

    #[test]
    fn word_and_entry_totals_unlock() {
        let conn = test_db();
        for i in 0..10 {
            insert_entry(&conn, "sam", today() - Days::new(i), 100);
        }

        let unlocked = evaluate(&conn, "sam").unwrap();
        assert!(unlocked.contains(&"Wordsmith".to_string()));
        assert!(unlocked.contains(&"Journalist".to_string()));
    }

    #[test]
    fn unlocks_survive_streak_reset() {
        let conn = test_db();
        for offset in 0..3 {
            insert_entry(&conn, "sam", today() - Days::new(offset), 20);
        }
        crate::journal::streak::recompute(&conn, "sam", today()).unwrap();
        assert!(evaluate(&conn, "sam")
            .unwrap()
            .contains(&"On Fire".to_string()));

        // A week passes with no entries; the streak drops to zero but the
        // unlock row remains.
        crate::journal::streak::recompute(&conn, "sam", today() + Days::new(7)).unwrap();
        assert!(evaluate(&conn, "sam").unwrap().is_empty());

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM user_achievements ua \
                 JOIN achievements a ON a.id = ua.achievement_id \
                 WHERE ua.user_id = 'sam' AND a.criteria = 'STREAK_3'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn missing_catalog_row_is_skipped() {
        let conn = test_db();
        conn.execute("DELETE FROM achievements WHERE criteria = 'FIRST_STEP'", [])
            .unwrap();
        insert_entry(&conn, "sam", today(), 20);

        let unlocked = evaluate(&conn, "sam").unwrap();
        assert!(unlocked.is_empty());
    }

    #[test]
    fn snapshot_reads_raw_entry_count() {
        let conn = test_db();
        insert_entry(&conn, "sam", today(), 30);
        insert_entry(&conn, "sam", today(), 40);

        let snap = snapshot(&conn, "sam").unwrap();
        assert_eq!(snap.total_entries, 2);
        assert_eq!(snap.total_words, 70);
        assert_eq!(snap.current_streak, 0);
    }
}
