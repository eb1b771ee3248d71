//! Achievement catalog seeding.
//!
//! The catalog is reference data: seeded once at database open, read-mostly
//! afterward. Seeding is keyed on the `criteria` code so re-running against
//! an already-seeded database is a no-op.

use rusqlite::{params, Connection};

/// (name, description, icon, criteria code) for every built-in achievement.
const CATALOG: &[(&str, &str, &str, &str)] = &[
    ("First Steps", "Created your first entry.", "Footprints", "FIRST_STEP"),
    ("On Fire", "Reached a 3-day streak.", "Flame", "STREAK_3"),
    ("Unstoppable", "Reached a 7-day streak.", "Zap", "STREAK_7"),
    ("Wordsmith", "Wrote 1000 total words.", "Feather", "WORDS_1000"),
    ("Journalist", "Created 10 entries.", "BookOpen", "ENTRIES_10"),
    ("Monthly Master", "Reached a 30-day streak.", "Crown", "STREAK_30"),
];

/// Insert any catalog rows that are not already present. Idempotent.
pub fn seed_achievements(conn: &Connection) -> rusqlite::Result<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO achievements (id, name, description, icon_name, criteria) \
         SELECT ?1, ?2, ?3, ?4, ?5 \
         WHERE NOT EXISTS (SELECT 1 FROM achievements WHERE criteria = ?5)",
    )?;

    for (name, description, icon, criteria) in CATALOG {
        let id = uuid::Uuid::now_v7().to_string();
        let inserted = stmt.execute(params![id, name, description, icon, criteria])?;
        if inserted > 0 {
            tracing::debug!(name, criteria, "seeded achievement");
        }
    }

    Ok(())
}
