//! core::config::schema
//!
//! Configuration schema types.
//!
//! Both scopes share the same shape; every field is optional so a file only
//! needs to name what it overrides.
//!
//! # Validation
//!
//! Values are validated after parsing: markers must be non-empty and
//! distinct, and the metadata file name must be a bare file name.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::metadata::Markers;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// [metadata]
/// begin_marker = "@REVIEW-METADATA-BEGIN"
/// end_marker = "@REVIEW-METADATA-END"
/// file_name = "review.metadata"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Metadata syntax settings
    pub metadata: Option<MetadataConfig>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(metadata) = &self.metadata {
            metadata.validate()?;
        }
        Ok(())
    }
}

/// Repository configuration.
///
/// Same shape as [`GlobalConfig`]; values here win.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Metadata syntax settings
    pub metadata: Option<MetadataConfig>,
}

impl RepoConfig {
    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(metadata) = &self.metadata {
            metadata.validate()?;
        }
        Ok(())
    }
}

/// Metadata syntax settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MetadataConfig {
    /// Literal opening a metadata block
    pub begin_marker: Option<String>,

    /// Literal closing a metadata block
    pub end_marker: Option<String>,

    /// Name of the per-directory metadata file
    pub file_name: Option<String>,
}

impl MetadataConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for marker in [&self.begin_marker, &self.end_marker].into_iter().flatten() {
            if marker.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "metadata markers cannot be empty".to_string(),
                ));
            }
        }

        if let (Some(begin), Some(end)) = (&self.begin_marker, &self.end_marker) {
            Markers::new(begin.as_str(), end.as_str())
                .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
        }

        if let Some(name) = &self.file_name {
            validate_file_name(name)?;
        }

        Ok(())
    }
}

fn validate_file_name(name: &str) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        return Err(ConfigError::InvalidValue(
            "metadata file name cannot be empty".to_string(),
        ));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(ConfigError::InvalidValue(format!(
            "metadata file name '{}' must not contain a path separator",
            name
        )));
    }
    if name == "." || name == ".." {
        return Err(ConfigError::InvalidValue(format!(
            "metadata file name '{}' is not a file name",
            name
        )));
    }
    Ok(())
}
