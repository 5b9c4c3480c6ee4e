// ⚙️ Application configuration
// Defaults work out of the box; an optional hotel.json overrides them

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;

/// Looked up in the working directory
pub const CONFIG_FILE: &str = "hotel.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backing file for reservations
    pub data_file: PathBuf,

    /// Where the TUI writes its log (the terminal is taken by the form)
    pub log_file: PathBuf,

    /// trace, debug, info, warn or error
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_file: PathBuf::from("reservations.txt"),
            log_file: PathBuf::from("hotel-reservations.log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load `hotel.json` if present, defaults otherwise
    pub fn load() -> Result<Self> {
        let path = Path::new(CONFIG_FILE);
        if path.exists() {
            AppConfig::from_file(path)
        } else {
            Ok(AppConfig::default())
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: AppConfig =
            serde_json::from_str(&content).context("Failed to parse config JSON")?;

        // Reject bad levels up front rather than at logger setup
        config.level()?;
        Ok(config)
    }

    pub fn level(&self) -> Result<Level> {
        self.log_level
            .parse::<Level>()
            .map_err(|_| anyhow!("Unknown log level: {}", self.log_level))
    }
}

// ============================================================================
// TESTS
// ============================================================================
