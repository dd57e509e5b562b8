//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default gap-detection parameters.
    pub detection: DetectionDefaults,

    /// Completion-service settings for the pause judge.
    pub judge: JudgeSettings,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default detection and reconstruction parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionDefaults {
    /// Minimum inter-caption silence to consider (seconds).
    pub min_gap_secs: f64,

    /// Captions of context sent to the judge on each side of a gap.
    pub context_size: usize,

    /// Keep segments closer than this are merged (seconds).
    pub merge_gap_secs: f64,

    /// Keep segments shorter than this are absorbed into a neighbor (seconds).
    pub min_keep_secs: f64,
}

/// Completion-service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeSettings {
    /// Base URL of an OpenAI-compatible completion endpoint.
    pub api_url: String,

    /// Model identifier sent with each request.
    pub model: String,

    /// Candidates per adjudication request.
    pub batch_size: usize,

    /// Additional attempts after a failed batch (total = max_retries + 1).
    pub max_retries: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "stillcut=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            detection: DetectionDefaults::default(),
            judge: JudgeSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DetectionDefaults {
    fn default() -> Self {
        Self {
            min_gap_secs: 0.8,
            context_size: 2,
            merge_gap_secs: 0.1,
            min_keep_secs: 0.25,
        }
    }
}

impl Default for JudgeSettings {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            batch_size: 10,
            max_retries: 2,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    /// Environment overrides are applied on top of whatever was loaded.
    pub fn load() -> Self {
        let config_path = config_file_path();
        let mut config = Self::default();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(parsed) => config = parsed,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        config.apply_env_overrides();
        config
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("STILLCUT_API_URL") {
            if !url.trim().is_empty() {
                self.judge.api_url = url.trim().to_string();
            }
        }
        if let Ok(model) = std::env::var("STILLCUT_MODEL") {
            if !model.trim().is_empty() {
                self.judge.model = model.trim().to_string();
            }
        }
    }
}

/// API key for the completion service, if configured.
///
/// The key is never written to the config file; it is read from the
/// environment on every call.
pub fn api_key_from_env() -> Option<String> {
    std::env::var("STILLCUT_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("stillcut").join("config.json")
}
