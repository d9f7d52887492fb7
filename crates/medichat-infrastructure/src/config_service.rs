//! Configuration service implementation.
//!
//! This module provides a ConfigService that loads the root configuration
//! from the configuration file (~/.config/medichat/config.toml).

use crate::paths::MedichatPaths;
use medichat_core::config::RootConfig;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches the root configuration.
///
/// This implementation reads the configuration from config.toml and caches
/// it to avoid repeated file I/O operations. A missing file yields the
/// default configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigService {
    /// Cached configuration loaded from file.
    /// Uses RwLock for thread-safe lazy loading.
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    /// Creates a new ConfigService.
    ///
    /// The configuration is loaded lazily on first access to avoid blocking
    /// during initialization.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the root configuration, loading from file if not cached.
    pub fn get_config(&self) -> RootConfig {
        // Check if already cached
        {
            let read_lock = self.config.read().unwrap();
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = match Self::config_path() {
            Ok(path) => Self::load_config(&path).unwrap_or_else(|e| {
                tracing::warn!("Falling back to default config: {}", e);
                RootConfig::default()
            }),
            Err(e) => {
                tracing::warn!("Cannot resolve config path, using defaults: {}", e);
                RootConfig::default()
            }
        };

        // Cache it
        {
            let mut write_lock = self.config.write().unwrap();
            *write_lock = Some(loaded.clone());
        }

        loaded
    }


    fn config_path() -> medichat_core::Result<PathBuf> {
        MedichatPaths::config_file()
            .map_err(|e| medichat_core::MedichatError::config(e.to_string()))
    }

    /// Loads RootConfig from the given file, defaulting when missing.
    fn load_config(path: &PathBuf) -> medichat_core::Result<RootConfig> {
        if !path.exists() {
            return Ok(RootConfig::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }
}
