use anyhow::Result;

use crate::config::LearnlogConfig;

/// Display the stored streak aggregate in the terminal.
pub fn streak(config: &LearnlogConfig, user: Option<&str>) -> Result<()> {
    let conn = crate::db::open_database(config.resolved_db_path())?;
    let user_id = user.unwrap_or(&config.storage.default_user);

    let Some(agg) = crate::journal::streak::get(&conn, user_id)? else {
        println!("No entries yet. Submit your first entry to start a streak.");
        return Ok(());
    };

    println!("Writing Streak");
    println!("{}", "=".repeat(40));
    println!("  Current streak:      {} day(s)", agg.current_streak);
    println!("  Longest streak:      {} day(s)", agg.longest_streak);
    println!("  Total writing days:  {}", agg.total_days);
    if let Some(last) = agg.last_entry_date {
        println!("  Last entry:          {last}");
    }

    Ok(())
}
