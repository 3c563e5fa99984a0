//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`PathPair`] - Filesystem path and change-root-relative path, moved in lockstep
//! - [`Oid`] - Git object identifier (SHA)
//!
//! # Validation
//!
//! These types enforce validity at construction time. A `PathPair` whose
//! relative half escapes the change root cannot be built.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid object id: {0}")]
    InvalidOid(String),

    #[error("invalid relative path '{path}': {reason}")]
    InvalidRelativePath { path: PathBuf, reason: &'static str },
}

/// A location in the changed tree, addressed two ways.
///
/// `absolute` is used for I/O, `relative` (to the change root) for
/// attributing results. [`PathPair::parent`] moves both halves together;
/// the pair has no parent once either half cannot move up.
///
/// # Example
///
/// ```
/// use patchmate::core::types::PathPair;
/// use std::path::Path;
///
/// let file = PathPair::under_root("/repo", "src/a.py").unwrap();
/// assert_eq!(file.absolute(), Path::new("/repo/src/a.py"));
///
/// let dir = file.parent().unwrap();
/// assert_eq!(dir.absolute(), Path::new("/repo/src"));
/// assert_eq!(dir.relative(), Path::new("src"));
///
/// let root = dir.parent().unwrap();
/// assert_eq!(root.relative(), Path::new(""));
/// assert!(root.parent().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathPair {
    absolute: PathBuf,
    relative: PathBuf,
}

impl PathPair {
    /// Pair an absolute path with its change-root-relative form.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRelativePath` if `relative` is absolute or
    /// contains `..` components.
    pub fn new(
        absolute: impl Into<PathBuf>,
        relative: impl Into<PathBuf>,
    ) -> Result<Self, TypeError> {
        let relative = relative.into();
        Self::validate_relative(&relative)?;
        Ok(Self {
            absolute: absolute.into(),
            relative,
        })
    }

    /// Build a pair for `relative` located under `root`.
    pub fn under_root(root: impl AsRef<Path>, relative: impl Into<PathBuf>) -> Result<Self, TypeError> {
        let relative = relative.into();
        Self::validate_relative(&relative)?;
        Ok(Self {
            absolute: root.as_ref().join(&relative),
            relative,
        })
    }

    fn validate_relative(relative: &Path) -> Result<(), TypeError> {
        for component in relative.components() {
            match component {
                Component::RootDir | Component::Prefix(_) => {
                    return Err(TypeError::InvalidRelativePath {
                        path: relative.to_path_buf(),
                        reason: "must not be absolute",
                    })
                }
                Component::ParentDir => {
                    return Err(TypeError::InvalidRelativePath {
                        path: relative.to_path_buf(),
                        reason: "must not contain '..'",
                    })
                }
                Component::CurDir | Component::Normal(_) => {}
            }
        }
        Ok(())
    }

    pub fn absolute(&self) -> &Path {
        &self.absolute
    }

    pub fn relative(&self) -> &Path {
        &self.relative
    }

    /// The containing directory of both halves, or `None` at the top.
    pub fn parent(&self) -> Option<PathPair> {
        let absolute = self.absolute.parent()?;
        let relative = self.relative.parent()?;
        Some(PathPair {
            absolute: absolute.to_path_buf(),
            relative: relative.to_path_buf(),
        })
    }

    /// Absolute path of a file named `name` inside this location.
    pub fn join_absolute(&self, name: &str) -> PathBuf {
        self.absolute.join(name)
    }
}

impl fmt::Display for PathPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.absolute.display())
    }
}

/// A Git object identifier (SHA-1 or SHA-256).
///
/// OIDs are normalized to lowercase for consistency.
///
/// # Example
///
/// ```
/// use patchmate::core::types::Oid;
///
/// let oid = Oid::new("ABC123DEF4567890ABC123DEF4567890ABC12345").unwrap();
/// assert_eq!(oid.as_str(), "abc123def4567890abc123def4567890abc12345");
/// assert_eq!(oid.short(7), "abc123d");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Oid(String);

impl Oid {
    /// Create a new validated object id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidOid` if the string is not a full hex OID.
    pub fn new(oid: impl Into<String>) -> Result<Self, TypeError> {
        let oid = oid.into().to_ascii_lowercase();
        Self::validate(&oid)?;
        Ok(Self(oid))
    }

    /// Get an abbreviated form of the OID.
    ///
    /// If `len` exceeds the OID length, returns the full OID.
    pub fn short(&self, len: usize) -> &str {
        let end = len.min(self.0.len());
        &self.0[..end]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(oid: &str) -> Result<(), TypeError> {
        // SHA-1 is 40 hex chars, SHA-256 is 64
        if oid.len() != 40 && oid.len() != 64 {
            return Err(TypeError::InvalidOid(format!(
                "expected 40 or 64 hex characters, got {}",
                oid.len()
            )));
        }
        if !oid.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidOid(format!(
                "contains non-hex characters: {}",
                oid
            )));
        }
        Ok(())
    }
}

impl TryFrom<String> for Oid {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Oid> for String {
    fn from(oid: Oid) -> Self {
        oid.0
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
