use anyhow::Result;

use crate::config::LearnlogConfig;

/// Display the achievement catalog with the user's unlock status.
pub fn achievements(config: &LearnlogConfig, user: Option<&str>) -> Result<()> {
    let conn = crate::db::open_database(config.resolved_db_path())?;
    let user_id = user.unwrap_or(&config.storage.default_user);

    let statuses = crate::journal::query::achievement_status(&conn, user_id)?;
    let unlocked_count = statuses.iter().filter(|s| s.unlocked).count();

    println!("Achievements ({unlocked_count}/{})", statuses.len());
    println!("{}", "=".repeat(40));
    for status in &statuses {
        let marker = if status.unlocked { "[x]" } else { "[ ]" };
        println!("  {} {:<16} {}", marker, status.achievement.name, status.achievement.description);
        if let Some(ref at) = status.unlocked_at {
            println!("      unlocked {at}");
        }
    }

    Ok(())
}
