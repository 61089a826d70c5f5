use crate::error::{Result, StudyFlowError};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Application settings injected into the services
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Prefix prepended to every collection key
    pub key_prefix: String,
    /// Root directory for file-backed storage
    pub data_dir: PathBuf,
    /// How many days ahead count as "upcoming" on the dashboard
    pub upcoming_window_days: u32,
    /// Maximum number of upcoming tasks shown
    pub upcoming_limit: usize,
    /// Length of the habit completion history, in days
    pub history_days: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            key_prefix: "studyflow-".to_string(),
            data_dir: PathBuf::from("."),
            upcoming_window_days: 7,
            upcoming_limit: 5,
            history_days: 30,
        }
    }
}

impl AppConfig {
    /// Parses settings from TOML; missing keys take their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| StudyFlowError::ConfigError(format!("Failed to parse TOML: {}", e)))
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = fs::read_to_string(path_ref).map_err(|e| {
        StudyFlowError::ConfigError(format!("Failed to read config file {:?}: {}", path_ref, e))
    })?;
    AppConfig::from_toml_str(&contents)
}
