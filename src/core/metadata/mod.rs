//! core::metadata
//!
//! Review metadata: block extraction, line parsing, and the results
//! accumulator.
//!
//! # Modules
//!
//! - [`block`] - Locate the marker-delimited block in file content
//! - [`line`] - Parse metadata lines into owner entries and directives
//! - [`results`] - The mergeable [`ResultsContainer`]
//!
//! # Example
//!
//! ```
//! use patchmate::core::metadata::{parse_block, Markers};
//! use std::path::Path;
//!
//! let content = "\
//! // @REVIEW-METADATA-BEGIN
//! // owner: alice
//! // recursive: 1
//! // @REVIEW-METADATA-END
//! fn main() {}
//! ";
//!
//! let block = Markers::default().extract(content).unwrap_or_default();
//! let results = parse_block(block, Path::new("src/main.rs"));
//!
//! assert_eq!(results.reviewers(), vec!["alice"]);
//! assert!(results.recursive().requests_ancestors());
//! ```

pub mod block;
pub mod line;
pub mod results;

pub use block::{Markers, MarkerError, DEFAULT_BEGIN_MARKER, DEFAULT_END_MARKER};
pub use line::{parse_block, MetadataLine};
pub use results::{OwnerEntry, Recursive, ResultsContainer, Role, UnrecognizedLine};

/// Default name of the per-directory metadata file.
pub const DEFAULT_METADATA_FILE_NAME: &str = "review.metadata";
