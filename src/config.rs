use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct VowlogConfig {
    pub server: ServerConfig,
    pub embedding: EmbeddingConfig,
    pub retrieval: RetrievalConfig,
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub transport: String,
    pub log_level: String,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub provider: String,
    pub model: String,
    pub endpoint: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub dimensions: usize,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RetrievalConfig {
    pub default_top_k: usize,
    pub default_num_context: usize,
    pub preview_chars: usize,
}

/// Thresholds used by the contradiction, insight, and next-step components.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Spending above `budget * overrun_ratio` is an overrun rather than a concern.
    pub overrun_ratio: f64,
    pub timeline_min_pending: usize,
    pub timeline_window_days: i64,
    pub overload_min_pending: usize,
    /// Share of entries that must be stressed/anxious before alerting.
    pub stress_ratio: f64,
    pub high_priority_alert: usize,
    pub theme_min_entries: usize,
    pub top_themes: usize,
    pub max_task_steps: usize,
    pub max_vendor_steps: usize,
    /// Histories shorter than this get a "keep journaling" nudge.
    pub sparse_history: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: "stdio".into(),
            log_level: "info".into(),
            host: "127.0.0.1".into(),
            port: 8787,
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "openai".into(),
            model: "text-embedding-3-small".into(),
            endpoint: "https://api.openai.com/v1".into(),
            api_key_env: "OPENAI_API_KEY".into(),
            dimensions: 1536,
            timeout_secs: 30,
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_top_k: 5,
            default_num_context: 3,
            preview_chars: 200,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            overrun_ratio: 1.2,
            timeline_min_pending: 5,
            timeline_window_days: 30,
            overload_min_pending: 10,
            stress_ratio: 0.5,
            high_priority_alert: 5,
            theme_min_entries: 3,
            top_themes: 3,
            max_task_steps: 3,
            max_vendor_steps: 2,
            sparse_history: 4,
        }
    }
}

/// Returns `~/.vowlog/`
pub fn default_vowlog_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".vowlog")
}

/// Returns the default config file path: `~/.vowlog/config.toml`
pub fn default_config_path() -> PathBuf {
    default_vowlog_dir().join("config.toml")
}

impl VowlogConfig {
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
            VowlogConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (VOWLOG_LOG_LEVEL, VOWLOG_TRANSPORT,
    /// VOWLOG_EMBEDDING_ENDPOINT, VOWLOG_EMBEDDING_MODEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("VOWLOG_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("VOWLOG_TRANSPORT") {
            self.server.transport = val;
        }
        if let Ok(val) = std::env::var("VOWLOG_EMBEDDING_ENDPOINT") {
            self.embedding.endpoint = val;
        }
        if let Ok(val) = std::env::var("VOWLOG_EMBEDDING_MODEL") {
            self.embedding.model = val;
        }
    }
}
