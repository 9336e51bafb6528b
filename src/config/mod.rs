use std::path::{Path, PathBuf};

use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

/// Data file used when neither the environment nor the command line names one.
pub const DEFAULT_DATA_FILE: &str = "handwerk_data.json";

/// Configuration for the application
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Location of the JSON data file (`HANDWERK_DATA_FILE`)
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Log filter used when `RUST_LOG` is unset (`HANDWERK_LOG`)
    #[serde(default = "default_log")]
    pub log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            log: default_log(),
        }
    }
}

impl Config {
    /// Load configuration from `HANDWERK_*` environment variables
    pub fn load() -> Result<Self> {
        let config = envy::prefixed("HANDWERK_").from_env::<Config>()?;

        Ok(config)
    }

    /// Get a direct reference to the data file path
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Replace the data file path, e.g. with a command line override
    pub fn with_data_file(mut self, data_file: Option<PathBuf>) -> Self {
        if let Some(path) = data_file {
            self.data_file = path;
        }
        self
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_log() -> String {
    "warn".to_string()
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config> {
    // Ensure .env file is loaded
    dotenv().ok();

    let config = Config::load()?;

    Ok(config)
}
