//! Writing-streak recomputation.
//!
//! [`recompute`] is the sole writer of the `streak_data` aggregate. It is
//! deterministic given the user's distinct entry dates and the evaluation
//! date, and must run to completion before the achievement engine reads the
//! aggregate.

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use rusqlite::{params, Connection, OptionalExtension};

use crate::journal::types::StreakAggregate;

/// Recompute and persist the user's streak aggregate.
///
/// Returns `(current_streak, longest_streak)`. The current streak counts
/// consecutive writing days ending today or yesterday relative to `today`;
/// `longest_streak` is monotone — it keeps its persisted maximum even when
/// the current run is shorter. With no entries at all the persisted row is
/// left untouched and `(0, persisted longest or 0)` is returned.
pub fn recompute(conn: &Connection, user_id: &str, today: NaiveDate) -> Result<(u32, u32)> {
    let dates = distinct_entry_dates(conn, user_id)?;

    let persisted_longest = get(conn, user_id)?
        .map(|agg| agg.longest_streak)
        .unwrap_or(0);

    let Some(&most_recent) = dates.first() else {
        return Ok((0, persisted_longest));
    };

    let yesterday = today - Days::new(1);
    let mut current_streak = 0u32;
    if most_recent == today || most_recent == yesterday {
        current_streak = 1;
        for pair in dates.windows(2) {
            if pair[0] - pair[1] == chrono::Duration::days(1) {
                current_streak += 1;
            } else {
                break;
            }
        }
    }

    let longest_streak = persisted_longest.max(current_streak);

    conn.execute(
        "INSERT INTO streak_data (user_id, current_streak, longest_streak, total_days, last_entry_date) \
         VALUES (?1, ?2, ?3, ?4, ?5) \
         ON CONFLICT(user_id) DO UPDATE SET \
             current_streak = excluded.current_streak, \
             longest_streak = excluded.longest_streak, \
             total_days = excluded.total_days, \
             last_entry_date = excluded.last_entry_date",
        params![
            user_id,
            current_streak,
            longest_streak,
            dates.len() as i64,
            most_recent.to_string(),
        ],
    )?;

    tracing::debug!(user_id, current_streak, longest_streak, "streak recomputed");
    Ok((current_streak, longest_streak))
}

/// Read the stored aggregate without recomputing.
pub fn get(conn: &Connection, user_id: &str) -> Result<Option<StreakAggregate>> {
    let row = conn
        .query_row(
            "SELECT current_streak, longest_streak, total_days, last_entry_date \
             FROM streak_data WHERE user_id = ?1",
            params![user_id],
            |row| {
                Ok((
                    row.get::<_, u32>(0)?,
                    row.get::<_, u32>(1)?,
                    row.get::<_, u32>(2)?,
                    row.get::<_, Option<String>>(3)?,
                ))
            },
        )
        .optional()?;

    let Some((current_streak, longest_streak, total_days, last_date)) = row else {
        return Ok(None);
    };

    let last_entry_date = last_date
        .map(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d"))
        .transpose()
        .context("invalid last_entry_date in streak_data")?;

    Ok(Some(StreakAggregate {
        user_id: user_id.to_string(),
        current_streak,
        longest_streak,
        total_days,
        last_entry_date,
    }))
}

/// Distinct entry dates for the user, newest first.
fn distinct_entry_dates(conn: &Connection, user_id: &str) -> Result<Vec<NaiveDate>> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT date FROM entries WHERE user_id = ?1 ORDER BY date DESC",
    )?;
    let dates = stmt
        .query_map(params![user_id], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    dates
        .into_iter()
        .map(|d| {
            NaiveDate::parse_from_str(&d, "%Y-%m-%d")
                .with_context(|| format!("invalid entry date: {d}"))
        })
        .collect()
}
