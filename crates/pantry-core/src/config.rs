//! Client configuration.
//!
//! Settings are layered, later sources overriding earlier ones:
//!
//! 1. built-in defaults (`http://localhost:8000`, weeks start on Sunday);
//! 2. a JSON config file, by default `$XDG_CONFIG_HOME/pantry/config.json`;
//! 3. the `PANTRY_API_URL` environment variable;
//! 4. explicit overrides on [`crate::PantryBuilder`].
//!
//! ```json
//! { "apiBaseUrl": "https://meals.example.com/api", "firstDayOfWeek": "mon" }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    dates::Day,
    error::{PantryError, Result},
};

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "PANTRY_API_URL";

/// Default backend base URL.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Resolved client settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Base URL prepended to every request path
    pub api_base_url: String,

    /// Day each planner week starts on
    pub first_day_of_week: Day,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            first_day_of_week: Day::Sun,
        }
    }
}

impl Config {
    /// Defaults, overlaid with the config file and the environment.
    ///
    /// When `file` is `None` the XDG default location is used if a file
    /// exists there.
    ///
    /// # Errors
    ///
    /// Returns `PantryError::FileSystem` if an explicitly given file cannot be
    /// read, and `PantryError::Configuration` if a file is not valid JSON.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_file() {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_base_url = url.trim().to_string();
            }
        }

        Ok(config)
    }

    /// Read a JSON config file; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `PantryError::FileSystem` on I/O failure and
    /// `PantryError::Configuration` on malformed JSON.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| PantryError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&text).map_err(|e| PantryError::Configuration {
            message: format!("Invalid config file '{}': {e}", path.display()),
        })
    }

    /// Existing config file in the XDG config directories, if any.
    fn default_file() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix("pantry").find_config_file("config.json")
    }
}
