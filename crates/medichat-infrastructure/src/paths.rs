//! Unified path management for medichat local files.
//!
//! All medichat configuration and session-snapshot data lives under a
//! single platform config directory so the storage layout stays consistent
//! across Linux, macOS, and Windows.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for medichat.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/medichat/          # Config directory
/// ├── config.toml              # Application configuration
/// └── snapshot.json            # Active conversation snapshot
/// ```
pub struct MedichatPaths;

impl MedichatPaths {
    /// Returns the medichat configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/medichat/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("medichat"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted session snapshot.
    pub fn snapshot_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("snapshot.json"))
    }
}
