//! core::metadata::block
//!
//! Extraction of the marker-delimited metadata block from file content.
//!
//! # Syntax
//!
//! A block is the text between a begin marker and an end marker, anywhere
//! in the scanned content, possibly spanning many lines:
//!
//! ```text
//! # @REVIEW-METADATA-BEGIN
//! # owner: alice
//! # recursive: 1
//! # @REVIEW-METADATA-END
//! ```
//!
//! The search is case-sensitive and runs from the first begin marker to the
//! last end marker that follows it. Content with several blocks therefore
//! yields everything between the outermost markers.

use thiserror::Error;

/// Default begin marker.
pub const DEFAULT_BEGIN_MARKER: &str = "@REVIEW-METADATA-BEGIN";

/// Default end marker.
pub const DEFAULT_END_MARKER: &str = "@REVIEW-METADATA-END";

/// Errors from marker configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarkerError {
    #[error("metadata marker cannot be empty")]
    Empty,

    #[error("begin and end markers must differ, both are '{0}'")]
    Identical(String),
}

/// The pair of literals delimiting a metadata block.
///
/// # Example
///
/// ```
/// use patchmate::core::metadata::block::Markers;
///
/// let markers = Markers::default();
/// let content = "x\n@REVIEW-METADATA-BEGIN\nowner: alice\n@REVIEW-METADATA-END\ny";
/// assert_eq!(markers.extract(content), Some("\nowner: alice\n"));
/// assert_eq!(markers.extract("no markers here"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    begin: String,
    end: String,
}

impl Markers {
    /// Create a validated marker pair.
    ///
    /// # Errors
    ///
    /// - [`MarkerError::Empty`] if either marker is empty or whitespace
    /// - [`MarkerError::Identical`] if both markers are the same
    pub fn new(begin: impl Into<String>, end: impl Into<String>) -> Result<Self, MarkerError> {
        let begin = begin.into();
        let end = end.into();

        if begin.trim().is_empty() || end.trim().is_empty() {
            return Err(MarkerError::Empty);
        }
        if begin == end {
            return Err(MarkerError::Identical(begin));
        }

        Ok(Self { begin, end })
    }

    pub fn begin(&self) -> &str {
        &self.begin
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    /// Return the block text, or `None` if the content has no marker span.
    pub fn extract<'a>(&self, content: &'a str) -> Option<&'a str> {
        let start = content.find(&self.begin)? + self.begin.len();
        let rest = &content[start..];
        let len = rest.rfind(&self.end)?;
        Some(&rest[..len])
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            begin: DEFAULT_BEGIN_MARKER.to_string(),
            end: DEFAULT_END_MARKER.to_string(),
        }
    }
}
