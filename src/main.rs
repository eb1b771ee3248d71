mod cli;
mod config;
mod db;
mod embedding;
mod journal;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "learnlog", version, about = "Daily learning journal with quality-gated entries")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Submit an entry through the admission pipeline
    Submit {
        /// The entry text
        text: String,
        /// User the entry belongs to (defaults to the configured user)
        #[arg(long)]
        user: Option<String>,
        /// Writing day as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List accepted entries
    Entries {
        /// Case-insensitive substring filter on content
        #[arg(long)]
        search: Option<String>,
        /// Earliest entry date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Latest entry date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long)]
        user: Option<String>,
    },
    /// List rejected submissions
    Rejections {
        #[arg(long)]
        user: Option<String>,
    },
    /// Show the current writing streak
    Streak {
        #[arg(long)]
        user: Option<String>,
    },
    /// Show achievements and unlock status
    Achievements {
        #[arg(long)]
        user: Option<String>,
    },
    /// Show writing statistics
    Stats {
        #[arg(long)]
        user: Option<String>,
    },
    /// Manage the embedding model
    Model {
        #[command(subcommand)]
        action: ModelAction,
    },
}

#[derive(Subcommand)]
enum ModelAction {
    /// Download the embedding model to ~/.learnlog/models/
    Download,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for log level)
    let config = config::LearnlogConfig::load()?;

    // Initialize tracing with the configured log level.
    // Log to stderr so stdout stays clean for command output.
    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Submit { text, user, date } => {
            cli::submit::submit(&config, &text, user.as_deref(), date).await?;
        }
        Command::Entries {
            search,
            from,
            to,
            user,
        } => {
            cli::entries::entries(&config, user.as_deref(), search.as_deref(), from, to)?;
        }
        Command::Rejections { user } => {
            cli::entries::rejections(&config, user.as_deref())?;
        }
        Command::Streak { user } => {
            cli::streak::streak(&config, user.as_deref())?;
        }
        Command::Achievements { user } => {
            cli::achievements::achievements(&config, user.as_deref())?;
        }
        Command::Stats { user } => {
            cli::stats::stats(&config, user.as_deref())?;
        }
        Command::Model { action } => match action {
            ModelAction::Download => {
                cli::model_download(&config.embedding).await?;
            }
        },
    }

    Ok(())
}
