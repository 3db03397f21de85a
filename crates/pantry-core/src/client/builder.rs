//! Builder for creating and configuring Pantry instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use log::debug;

use super::Pantry;
use crate::{
    cache::QueryCache,
    config::Config,
    dates::Day,
    error::Result,
    gateway::{ApiGateway, ReqwestTransport, Transport},
};

/// Builder for creating and configuring Pantry instances.
#[derive(Default)]
pub struct PantryBuilder {
    base_url: Option<String>,
    first_day_of_week: Option<Day>,
    config_file: Option<PathBuf>,
    transport: Option<Arc<dyn Transport>>,
    cache: Option<Arc<QueryCache>>,
}

impl PantryBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the backend base URL, overriding file and environment.
    pub fn with_base_url<S: Into<String>>(mut self, url: Option<S>) -> Self {
        if let Some(url) = url {
            self.base_url = Some(url.into());
        }
        self
    }

    /// Sets the first day of the planner week.
    pub fn with_first_day_of_week(mut self, day: Option<Day>) -> Self {
        if day.is_some() {
            self.first_day_of_week = day;
        }
        self
    }

    /// Reads settings from this JSON file instead of the XDG default
    /// `$XDG_CONFIG_HOME/pantry/config.json`.
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.config_file = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sends requests through `transport` instead of HTTP.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Shares an existing cache instead of creating a fresh one.
    pub fn with_cache(mut self, cache: Arc<QueryCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Builds the configured client.
    ///
    /// # Errors
    ///
    /// Returns `PantryError::FileSystem` or `PantryError::Configuration` if
    /// the config file cannot be used, and `PantryError::Configuration` if the
    /// base URL is invalid.
    pub fn build(self) -> Result<Pantry> {
        let mut config = Config::load(self.config_file.as_deref())?;
        if let Some(url) = self.base_url {
            config.api_base_url = url;
        }
        if let Some(day) = self.first_day_of_week {
            config.first_day_of_week = day;
        }

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(&config.api_base_url)?),
        };
        debug!(
            "Pantry client for {} (weeks start on {})",
            config.api_base_url,
            config.first_day_of_week.label()
        );

        Ok(Pantry::new(
            ApiGateway::new(transport),
            self.cache.unwrap_or_default(),
            config,
        ))
    }
}
