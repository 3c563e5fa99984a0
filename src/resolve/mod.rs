//! resolve
//!
//! The metadata resolution engine.
//!
//! # Algorithm
//!
//! Every level of the walk runs the same steps, whether it is the changed
//! file or one of its ancestor directories:
//!
//! 1. **Read** - locate the level's metadata file and extract the marker
//!    block. A missing file or a file without markers is an empty block.
//! 2. **Parse** - parse the block into a fresh [`ResultsContainer`] scoped to
//!    the level's relative path.
//! 3. **Decide** - continue only if the `recursive` directive asks for it
//!    and the level has a parent.
//! 4. **Recurse or stop** - resolve the parent directory and merge its
//!    result after the local one.
//!
//! # Failure Policy
//!
//! The ancestor step returns a `Result`. On error the resolver records it at
//! [`Level::Error`], stops climbing, and returns what it already has. Only a
//! failed read of the level the caller asked for reaches the caller.
//!
//! # Example
//!
//! ```
//! use patchmate::core::types::PathPair;
//! use patchmate::resolve::{MemoryFileSystem, NullSink, Resolver};
//!
//! let fs = MemoryFileSystem::new()
//!     .with_file(
//!         "/repo/src/a.py",
//!         "# @REVIEW-METADATA-BEGIN\n# owner: alice\n# recursive: 1\n# @REVIEW-METADATA-END\n",
//!     )
//!     .with_file(
//!         "/repo/src/review.metadata",
//!         "@REVIEW-METADATA-BEGIN\nowner: bob\nrecursive: 0\n@REVIEW-METADATA-END\n",
//!     );
//!
//! let resolver = Resolver::new(&fs, &NullSink);
//! let file = PathPair::under_root("/repo", "src/a.py").unwrap();
//! let results = resolver.resolve_file(&file).unwrap();
//!
//! assert_eq!(results.reviewers(), vec!["alice", "bob"]);
//! ```

mod diagnostics;
mod fs;
mod source;

pub use diagnostics::{DiagnosticSink, Level, MemorySink, NullSink, TracingSink};
pub use fs::{Access, FileSystem, MemoryFileSystem, OsFileSystem};
pub use source::MetadataSource;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::config::{Config, ConfigError};
use crate::core::metadata::{parse_block, Markers, ResultsContainer, DEFAULT_METADATA_FILE_NAME};
use crate::core::types::PathPair;

/// Errors from resolving one level.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("failed to read review metadata from '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Metadata syntax the resolver looks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    pub markers: Markers,
    pub metadata_file_name: String,
}

impl ResolverSettings {
    /// Settings from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            markers: config.markers()?,
            metadata_file_name: config.metadata_file_name().to_string(),
        })
    }
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            markers: Markers::default(),
            metadata_file_name: DEFAULT_METADATA_FILE_NAME.to_string(),
        }
    }
}

/// Resolves review metadata for changed files.
///
/// A resolver holds no per-resolution state, so one instance can serve any
/// number of files, from several threads if its filesystem and sink allow.
pub struct Resolver<'a> {
    fs: &'a dyn FileSystem,
    sink: &'a dyn DiagnosticSink,
    settings: ResolverSettings,
}

impl std::fmt::Debug for Resolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("settings", &self.settings)
            .finish()
    }
}

impl<'a> Resolver<'a> {
    /// Create a resolver with default settings.
    pub fn new(fs: &'a dyn FileSystem, sink: &'a dyn DiagnosticSink) -> Self {
        Self::with_settings(fs, sink, ResolverSettings::default())
    }

    pub fn with_settings(
        fs: &'a dyn FileSystem,
        sink: &'a dyn DiagnosticSink,
        settings: ResolverSettings,
    ) -> Self {
        Self { fs, sink, settings }
    }

    /// Resolve ownership for one changed file.
    ///
    /// A file that no longer exists, or a changed path that is not a regular
    /// file (a submodule, say), resolves as if it had no block.
    ///
    /// # Errors
    ///
    /// [`ResolutionError::Read`] if the file exists but cannot be read.
    pub fn resolve_file(&self, file: &PathPair) -> Result<ResultsContainer, ResolutionError> {
        self.resolve(MetadataSource::File(file.clone()))
    }

    /// Resolve ownership contributed by a directory and its ancestors.
    ///
    /// # Errors
    ///
    /// [`ResolutionError::Read`] if the directory's metadata file exists but
    /// cannot be read.
    pub fn resolve_directory(&self, dir: &PathPair) -> Result<ResultsContainer, ResolutionError> {
        self.resolve(MetadataSource::Directory(dir.clone()))
    }

    /// Run the Read, Parse, Decide, Recurse-or-stop walk from `source`.
    pub fn resolve(&self, source: MetadataSource) -> Result<ResultsContainer, ResolutionError> {
        let block = self.read_block(&source)?;
        let local = parse_block(&block, source.location().relative());
        self.report_unrecognized(&source, &local);

        if !local.recursive().requests_ancestors() {
            return Ok(local);
        }

        let Some(parent) = source.parent() else {
            self.sink.record(
                Level::Debug,
                &format!("{} has no parent, stopping", source),
            );
            return Ok(local);
        };

        let parent_label = parent.to_string();
        match self.resolve(parent) {
            Ok(inherited) => Ok(ResultsContainer::merge(local, inherited)),
            Err(err) => {
                self.sink.record(Level::Error, &err.to_string());
                self.sink.record(
                    Level::Error,
                    &format!("problem with review metadata from {}", parent_label),
                );
                Ok(local)
            }
        }
    }

    /// Read and extract the block for one level. Absence is an empty block.
    fn read_block(&self, source: &MetadataSource) -> Result<String, ResolutionError> {
        let path = source.metadata_path(&self.settings.metadata_file_name);

        if !self.fs.exists(&path) {
            self.sink.record(
                Level::Debug,
                &format!("{} has no metadata file at {}", source, path.display()),
            );
            return Ok(String::new());
        }

        let content = self
            .fs
            .read_to_string(&path)
            .map_err(|e| ResolutionError::Read {
                path: path.clone(),
                source: e,
            })?;

        match self.settings.markers.extract(&content) {
            Some(block) => {
                self.sink.record(
                    Level::Info,
                    &format!("metadata found in {}", path.display()),
                );
                Ok(block.to_string())
            }
            None => {
                self.sink.record(
                    Level::Debug,
                    &format!("{} is present but has no metadata markers", path.display()),
                );
                Ok(String::new())
            }
        }
    }

    fn report_unrecognized(&self, source: &MetadataSource, results: &ResultsContainer) {
        for line in results.unrecognized() {
            self.sink.record(
                Level::Warn,
                &format!("ignoring unrecognized metadata line '{}' in {}", line.line, source),
            );
        }
    }
}
