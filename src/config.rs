use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::agent::ActionKind;

/// Main finagent configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub log_level: LogLevel,
    pub paths: PathsConfig,
    pub store: StoreConfig,
    pub handlers: HandlersConfig,
    pub journal: JournalConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            "off" => Some(LogLevel::Off),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    pub journal: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Start every run from the demo records instead of an empty store
    pub seed_mock_data: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct HandlersConfig {
    /// Action kinds left without a handler; dispatching them fails
    pub disabled: Vec<ActionKind>,
}

/// Journal sink type
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JournalSink {
    /// Append to JSONL files under the journal path (default)
    File,
    /// Print to stderr
    Stderr,
    /// Send to HTTP endpoint
    Http,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JournalConfig {
    /// Enable the journal
    pub enabled: bool,
    /// Which sinks to send events to
    pub sinks: Vec<JournalSink>,
    /// HTTP endpoint for http sink
    pub http_endpoint: Option<String>,
    /// Include the action payload in each event
    pub include_payload: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            paths: PathsConfig::default(),
            store: StoreConfig::default(),
            handlers: HandlersConfig::default(),
            journal: JournalConfig::default(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            journal: Config::finagent_dir().join("journal"),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { seed_mock_data: true }
    }
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sinks: vec![JournalSink::File],
            http_endpoint: None,
            include_payload: false,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Check FINAGENT_CONFIG env var
        if let Ok(env_path) = std::env::var("FINAGENT_CONFIG") {
            let path = PathBuf::from(env_path);
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from FINAGENT_CONFIG: {}", e);
                    }
                }
            }
        }

        // Try FINAGENT_DIR/finagent.yaml
        if let Ok(dir) = std::env::var("FINAGENT_DIR") {
            let path = PathBuf::from(dir).join("finagent.yaml");
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from FINAGENT_DIR: {}", e);
                    }
                }
            }
        }

        // Try ~/.config/finagent/finagent.yaml
        if let Some(config_dir) = dirs::config_dir() {
            let path = config_dir.join("finagent").join("finagent.yaml");
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        // Try ./finagent.yaml (for development)
        let local_config = PathBuf::from("finagent.yaml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load local config: {}", e);
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Get the finagent directory (config file, journal)
    pub fn finagent_dir() -> PathBuf {
        std::env::var("FINAGENT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("finagent"))
    }

    /// Expand a path that may contain ~ or env vars
    pub fn expand_path(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        let expanded = shellexpand::full(&path_str).unwrap_or_else(|_| path_str.clone());
        PathBuf::from(expanded.as_ref())
    }

    pub fn journal_dir(&self) -> PathBuf {
        Self::expand_path(&self.paths.journal)
    }

    pub fn is_enabled(&self, kind: ActionKind) -> bool {
        !self.handlers.disabled.contains(&kind)
    }
}
