use anyhow::Result;
use chrono::NaiveDate;
use std::sync::Arc;

use crate::config::LearnlogConfig;
use crate::journal::admission::{self, AdmissionOutcome};

/// Submit one entry through the admission pipeline from the terminal.
///
/// On acceptance the streak is recomputed and achievements are evaluated
/// before printing. Both follow-ups are best-effort: a failure is logged and
/// the accepted entry still counts.
pub async fn submit(
    config: &LearnlogConfig,
    text: &str,
    user: Option<&str>,
    date: Option<NaiveDate>,
) -> Result<()> {
    let db_path = config.resolved_db_path();
    let mut conn = crate::db::open_database(&db_path)?;

    // Stored vectors are only comparable to new ones from the same model.
    if let Some(stored) =
        crate::db::migrations::embedding_model_mismatch(&conn, &config.embedding.model)?
    {
        tracing::warn!(
            stored = %stored,
            configured = %config.embedding.model,
            "embedding model changed — novelty checks against older entries may be unreliable"
        );
    }

    let provider = crate::embedding::create_provider(&config.embedding)?;
    let embedder: Arc<dyn crate::embedding::EmbeddingProvider> = Arc::from(provider);

    let user_id = user.unwrap_or(&config.storage.default_user).to_string();
    let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
    let admission_config = config.admission.clone();
    let text = text.to_string();

    // Embedding and SQLite work are CPU-bound; keep them off the runtime.
    let (outcome, streak, unlocked) = tokio::task::spawn_blocking(move || {
        let outcome = admission::admit_entry(
            &mut conn,
            embedder.as_ref(),
            &admission_config,
            &user_id,
            &text,
            date,
        )?;

        let mut streak = None;
        let mut unlocked = Vec::new();
        if matches!(outcome, AdmissionOutcome::Accepted { .. }) {
            match crate::journal::streak::recompute(&conn, &user_id, date) {
                Ok((current, _)) => streak = Some(current),
                Err(e) => tracing::warn!(user_id, error = %e, "streak update failed"),
            }
            match crate::journal::achievements::evaluate(&conn, &user_id) {
                Ok(names) => unlocked = names,
                Err(e) => tracing::warn!(user_id, error = %e, "achievement evaluation failed"),
            }
        }
        Ok::<_, anyhow::Error>((outcome, streak, unlocked))
    })
    .await??;

    match outcome {
        AdmissionOutcome::Accepted { entry_id } => {
            println!("Entry accepted ({entry_id}).");
            if let Some(current) = streak {
                println!("Current streak: {current} day(s).");
            }
            for name in unlocked {
                println!("Achievement unlocked: {name}");
            }
        }
        AdmissionOutcome::Rejected { reason, feedback } => {
            println!("Entry rejected ({reason}).");
            println!("{feedback}");
        }
    }

    Ok(())
}
