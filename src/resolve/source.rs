//! resolve::source
//!
//! Where a resolution level finds its metadata block, and what level comes
//! next.

use std::fmt;
use std::path::PathBuf;

use crate::core::types::PathPair;

/// One level of the upward walk.
///
/// - `File`: the block is embedded in the changed file itself.
/// - `Directory`: the block lives in the metadata file directly inside the
///   directory.
///
/// Both continue into the `Directory` of their parent location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataSource {
    File(PathPair),
    Directory(PathPair),
}

impl MetadataSource {
    /// The file or directory this level describes.
    pub fn location(&self) -> &PathPair {
        match self {
            MetadataSource::File(pair) | MetadataSource::Directory(pair) => pair,
        }
    }

    /// Path of the file holding this level's block.
    pub fn metadata_path(&self, metadata_file_name: &str) -> PathBuf {
        match self {
            MetadataSource::File(pair) => pair.absolute().to_path_buf(),
            MetadataSource::Directory(pair) => pair.join_absolute(metadata_file_name),
        }
    }

    /// The next level up, or `None` when the top has been reached.
    pub fn parent(&self) -> Option<MetadataSource> {
        self.location().parent().map(MetadataSource::Directory)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            MetadataSource::File(_) => "file",
            MetadataSource::Directory(_) => "directory",
        }
    }
}

impl fmt::Display for MetadataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.location())
    }
}
