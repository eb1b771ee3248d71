use anyhow::Result;
use chrono::NaiveDate;

use crate::config::LearnlogConfig;
use crate::journal::query::{self, EntryFilter};

/// List a user's entries in the terminal, newest first.
pub fn entries(
    config: &LearnlogConfig,
    user: Option<&str>,
    search: Option<&str>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<()> {
    let conn = crate::db::open_database(config.resolved_db_path())?;
    let user_id = user.unwrap_or(&config.storage.default_user);

    let filter = EntryFilter {
        search: search.map(str::to_string),
        start_date: from,
        end_date: to,
    };
    let entries = query::list_entries(&conn, user_id, &filter)?;

    if entries.is_empty() {
        println!("No entries found.");
        return Ok(());
    }

    println!("{} entr{}\n", entries.len(), if entries.len() == 1 { "y" } else { "ies" });
    for entry in &entries {
        let preview: String = entry.content.chars().take(120).collect();
        let ellipsis = if entry.content.chars().count() > 120 { "..." } else { "" };
        println!("  {} ({} words)", entry.date, entry.word_count);
        println!("     {preview}{ellipsis}");
        println!();
    }

    Ok(())
}

/// List a user's rejected submissions, newest first.
pub fn rejections(config: &LearnlogConfig, user: Option<&str>) -> Result<()> {
    let conn = crate::db::open_database(config.resolved_db_path())?;
    let user_id = user.unwrap_or(&config.storage.default_user);

    let logs = query::list_rejections(&conn, user_id)?;
    if logs.is_empty() {
        println!("No rejections recorded.");
        return Ok(());
    }

    println!("{} rejection(s)\n", logs.len());
    for log in &logs {
        let preview: String = log.content.chars().take(80).collect();
        match log.similarity_score {
            Some(sim) => println!("  [{}] ({:.0}% similar) {}", log.reason, sim * 100.0, preview),
            None => println!("  [{}] {}", log.reason, preview),
        }
    }

    Ok(())
}
