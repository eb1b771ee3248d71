use anyhow::Result;

use crate::config::LearnlogConfig;

/// Display writing statistics in the terminal.
pub fn stats(config: &LearnlogConfig, user: Option<&str>) -> Result<()> {
    let conn = crate::db::open_database(config.resolved_db_path())?;
    let user_id = user.unwrap_or(&config.storage.default_user);
    let today = chrono::Local::now().date_naive();

    let totals = crate::journal::stats::user_stats(&conn, user_id)?;
    let summary = crate::journal::stats::summary(&conn, user_id, today)?;
    let weekly = crate::journal::stats::weekly_activity(&conn, user_id, today)?;

    println!("Writing Statistics");
    println!("{}", "=".repeat(40));
    println!("  Total entries:       {}", totals.total_entries);
    println!("  Total words:         {}", totals.total_words);
    println!("  Level:               {}", totals.level);
    println!();

    println!("Recent Activity:");
    println!("  This week:           {} entries", summary.entries_this_week);
    println!("  This month:          {} entries", summary.entries_this_month);
    println!("  Avg word count:      {}", summary.avg_word_count);
    println!();

    println!("Last 7 Days:");
    for day in &weekly {
        println!(
            "  {} {}  {:>2} entr{}, {} words",
            day.label,
            day.date,
            day.entries,
            if day.entries == 1 { "y " } else { "ies" },
            day.words,
        );
    }

    Ok(())
}
