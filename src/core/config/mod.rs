//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! patchmate has two configuration scopes:
//! - **Global**: User-level settings
//! - **Repo**: Repository-level overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$PATCHMATE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/patchmate/config.toml`
//! 3. `~/.patchmate/config.toml`
//!
//! # Repo Config Location
//!
//! `<git_dir>/patchmate/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use patchmate::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Some(Path::new("/path/to/repo/.git"))).unwrap();
//!
//! println!("Metadata file: {}", config.metadata_file_name());
//! let markers = config.markers().unwrap();
//! println!("Begin marker: {}", markers.begin());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, MetadataConfig, RepoConfig};

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::core::metadata::{
    Markers, DEFAULT_BEGIN_MARKER, DEFAULT_END_MARKER, DEFAULT_METADATA_FILE_NAME,
};

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Merged configuration from all sources.
///
/// Accessor methods apply precedence rules automatically. Repo config
/// overrides global config.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Repository configuration (if in a repo)
    pub repo: Option<RepoConfig>,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
    /// Path to the repo config file (if loaded)
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `git_dir` is provided, also loads repo-specific config.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed, or if
    /// the merged values are invalid. Missing config files are not an error.
    pub fn load(git_dir: Option<&Path>) -> Result<Config, ConfigError> {
        let (global, global_path) = Self::load_global()?;

        let (repo, repo_path) = match git_dir {
            Some(dir) => Self::load_repo(dir)?,
            None => (None, None),
        };

        global.validate()?;
        if let Some(ref r) = repo {
            r.validate()?;
        }

        let config = Config {
            global,
            repo,
            global_path,
            repo_path,
        };

        // Begin and end may come from different scopes.
        config.markers()?;

        Ok(config)
    }

    /// Load global configuration from standard locations.
    fn load_global() -> Result<(GlobalConfig, Option<PathBuf>), ConfigError> {
        // 1. Check $PATCHMATE_CONFIG
        if let Ok(path) = std::env::var("PATCHMATE_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        // 2. Check $XDG_CONFIG_HOME/patchmate/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("patchmate/config.toml");
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        // 3. Check ~/.patchmate/config.toml
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".patchmate/config.toml");
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        Ok((GlobalConfig::default(), None))
    }

    fn load_repo(git_dir: &Path) -> Result<(Option<RepoConfig>, Option<PathBuf>), ConfigError> {
        let path = Self::repo_config_path(git_dir);
        if !path.exists() {
            return Ok((None, None));
        }
        let config = Self::read_config(&path)?;
        Ok((Some(config), Some(path)))
    }

    fn read_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the canonical path for repo config.
    pub fn repo_config_path(git_dir: &Path) -> PathBuf {
        git_dir.join("patchmate/config.toml")
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    fn metadata_value(&self, pick: impl Fn(&MetadataConfig) -> Option<&String>) -> Option<&str> {
        let from_repo = self
            .repo
            .as_ref()
            .and_then(|r| r.metadata.as_ref())
            .and_then(&pick);
        let from_global = self.global.metadata.as_ref().and_then(&pick);
        from_repo.or(from_global).map(String::as_str)
    }

    /// Get the block markers.
    ///
    /// Defaults to `@REVIEW-METADATA-BEGIN` / `@REVIEW-METADATA-END`.
    pub fn markers(&self) -> Result<Markers, ConfigError> {
        let begin = self
            .metadata_value(|m| m.begin_marker.as_ref())
            .unwrap_or(DEFAULT_BEGIN_MARKER);
        let end = self
            .metadata_value(|m| m.end_marker.as_ref())
            .unwrap_or(DEFAULT_END_MARKER);
        Markers::new(begin, end).map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }

    /// Get the per-directory metadata file name.
    ///
    /// Defaults to `review.metadata`.
    pub fn metadata_file_name(&self) -> &str {
        self.metadata_value(|m| m.file_name.as_ref())
            .unwrap_or(DEFAULT_METADATA_FILE_NAME)
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded repo config file.
    pub fn repo_config_loaded_from(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }
}
