use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LearnlogConfig {
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
    pub embedding: EmbeddingConfig,
    pub admission: AdmissionConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
    /// User id used by the CLI when `--user` is not given.
    pub default_user: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub provider: String,
    pub model: String,
    pub cache_dir: String,
}

/// Knobs for the entry admission pipeline.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AdmissionConfig {
    /// Entries with fewer words are rejected as `too_short`.
    pub min_word_count: usize,
    /// Cosine similarity at or above which an entry is a near-duplicate.
    pub similarity_threshold: f64,
}

impl Default for LearnlogConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            storage: StorageConfig::default(),
            embedding: EmbeddingConfig::default(),
            admission: AdmissionConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_learnlog_dir()
            .join("journal.db")
            .to_string_lossy()
            .into_owned();
        Self {
            db_path,
            default_user: "local".into(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        let cache_dir = default_learnlog_dir()
            .join("models")
            .to_string_lossy()
            .into_owned();
        Self {
            provider: "local".into(),
            model: "all-MiniLM-L6-v2".into(),
            cache_dir,
        }
    }
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            min_word_count: 15,
            similarity_threshold: 0.85,
        }
    }
}

/// Returns `~/.learnlog/`
pub fn default_learnlog_dir() -> PathBuf {
    dirs::home_dir()
        .expect("home directory must exist")
        .join(".learnlog")
}

/// Returns the default config file path: `~/.learnlog/config.toml`
pub fn default_config_path() -> PathBuf {
    default_learnlog_dir().join("config.toml")
}

impl LearnlogConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            LearnlogConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (LEARNLOG_DB, LEARNLOG_USER, LEARNLOG_LOG_LEVEL).
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Override fields from a variable lookup. Split out from
    /// [`Self::apply_env_overrides`] so tests don't have to mutate the
    /// process environment.
    fn apply_overrides(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(val) = get("LEARNLOG_DB") {
            self.storage.db_path = val;
        }
        if let Some(val) = get("LEARNLOG_USER") {
            self.storage.default_user = val;
        }
        if let Some(val) = get("LEARNLOG_LOG_LEVEL") {
            self.logging.level = val;
        }
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir()
            .expect("home directory must exist")
            .join(rest)
    } else {
        PathBuf::from(path)
    }
}
