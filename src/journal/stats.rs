//! Analytics aggregates over a user's accepted entries.
//!
//! Pure reads, all best-effort from the caller's perspective: the CLI treats
//! these as display data, never as admission inputs.

use anyhow::Result;
use chrono::{Days, NaiveDate};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

/// Rolling-window summary of recent writing volume.
#[derive(Debug, Clone, Serialize)]
pub struct ActivitySummary {
    /// Entries with a date in the last 7 days (inclusive of today).
    pub entries_this_week: u64,
    /// Entries with a date in the last 30 days (inclusive of today).
    pub entries_this_month: u64,
    /// Mean word count over all entries, rounded to one decimal.
    pub avg_word_count: f64,
}

/// Lifetime totals plus the derived level.
#[derive(Debug, Clone, Serialize)]
pub struct UserStats {
    pub total_entries: u64,
    pub total_words: u64,
    /// One level per ten entries, starting at 1.
    pub level: u32,
}

/// One day's writing volume in the weekly activity view.
#[derive(Debug, Clone, Serialize)]
pub struct DayActivity {
    pub date: NaiveDate,
    /// Abbreviated weekday label, e.g. `"Mon"`.
    pub label: String,
    pub entries: u64,
    pub words: u64,
}

/// Summarize recent activity relative to `today`.
pub fn summary(conn: &Connection, user_id: &str, today: NaiveDate) -> Result<ActivitySummary> {
    let week_start = today - Days::new(7);
    let month_start = today - Days::new(30);

    let entries_this_week = count_since(conn, user_id, week_start)?;
    let entries_this_month = count_since(conn, user_id, month_start)?;

    let avg: Option<f64> = conn
        .query_row(
            "SELECT AVG(word_count) FROM entries WHERE user_id = ?1",
            params![user_id],
            |row| row.get(0),
        )
        .optional()?
        .flatten();

    Ok(ActivitySummary {
        entries_this_week,
        entries_this_month,
        avg_word_count: (avg.unwrap_or(0.0) * 10.0).round() / 10.0,
    })
}

/// Lifetime totals and level for a user.
pub fn user_stats(conn: &Connection, user_id: &str) -> Result<UserStats> {
    let (total_entries, total_words): (u64, u64) = conn.query_row(
        "SELECT COUNT(*), COALESCE(SUM(word_count), 0) FROM entries WHERE user_id = ?1",
        params![user_id],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    Ok(UserStats {
        total_entries,
        total_words,
        level: (total_entries / 10) as u32 + 1,
    })
}

/// Per-day entry and word counts for the last seven days, oldest first.
/// Days with no entries appear as zero rows.
pub fn weekly_activity(conn: &Connection, user_id: &str, today: NaiveDate) -> Result<Vec<DayActivity>> {
    let mut stmt = conn.prepare(
        "SELECT COUNT(*), COALESCE(SUM(word_count), 0) \
         FROM entries WHERE user_id = ?1 AND date = ?2",
    )?;

    let mut days = Vec::with_capacity(7);
    for offset in (0..7).rev() {
        let date = today - Days::new(offset);
        let (entries, words): (u64, u64) = stmt.query_row(
            params![user_id, date.to_string()],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        days.push(DayActivity {
            date,
            label: date.format("%a").to_string(),
            entries,
            words,
        });
    }
    Ok(days)
}

fn count_since(conn: &Connection, user_id: &str, start: NaiveDate) -> Result<u64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM entries WHERE user_id = ?1 AND date >= ?2",
        params![user_id, start.to_string()],
        |row| row.get(0),
    )?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Connection {
        crate::db::load_sqlite_vec();
        let conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "foreign_keys", "ON").unwrap();
        crate::db::schema::init_schema(&conn).unwrap();
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

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn summary_windows_and_average() {
        let conn = test_db();
        let today = day(2026, 8, 25);
        insert_entry(&conn, "sam", today, 20);
        insert_entry(&conn, "sam", today - Days::new(5), 30);
        insert_entry(&conn, "sam", today - Days::new(20), 40);
        insert_entry(&conn, "sam", today - Days::new(60), 100);

        let s = summary(&conn, "sam", today).unwrap();
        assert_eq!(s.entries_this_week, 2);
        assert_eq!(s.entries_this_month, 3);
        // (20 + 30 + 40 + 100) / 4 = 47.5
        assert_eq!(s.avg_word_count, 47.5);
    }

    #[test]
    fn summary_of_empty_history_is_zero() {
        let conn = test_db();
        let s = summary(&conn, "sam", day(2026, 8, 25)).unwrap();
        assert_eq!(s.entries_this_week, 0);
        assert_eq!(s.entries_this_month, 0);
        assert_eq!(s.avg_word_count, 0.0);
    }

    #[test]
    fn level_advances_every_ten_entries() {
        let conn = test_db();
        let today = day(2026, 8, 25);

        assert_eq!(user_stats(&conn, "sam").unwrap().level, 1);

        for i in 0..10 {
            insert_entry(&conn, "sam", today - Days::new(i), 50);
        }
        let stats = user_stats(&conn, "sam").unwrap();
        assert_eq!(stats.total_entries, 10);
        assert_eq!(stats.total_words, 500);
        assert_eq!(stats.level, 2);
    }

    #[test]
    fn weekly_activity_has_seven_buckets_oldest_first() {
        let conn = test_db();
        let today = day(2026, 8, 25);
        insert_entry(&conn, "sam", today, 25);
        insert_entry(&conn, "sam", today, 35);
        insert_entry(&conn, "sam", today - Days::new(3), 40);
        // Outside the window.
        insert_entry(&conn, "sam", today - Days::new(7), 99);

        let days = weekly_activity(&conn, "sam", today).unwrap();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].date, today - Days::new(6));
        assert_eq!(days[6].date, today);
        assert_eq!(days[6].entries, 2);
        assert_eq!(days[6].words, 60);
        assert_eq!(days[3].entries, 1);
        assert_eq!(days[0].entries, 0);
        assert_eq!(days[6].label, today.format("%a").to_string());
    }

    #[test]
    fn stats_are_scoped_to_the_user() {
        let conn = test_db();
        let today = day(2026, 8, 25);
        insert_entry(&conn, "alex", today, 500);

        let stats = user_stats(&conn, "sam").unwrap();
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.total_words, 0);
    }
}
