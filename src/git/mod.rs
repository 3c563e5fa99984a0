//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to Git. No other module imports
//! `git2`. The resolution engine itself never touches Git: it is handed
//! paths, and this module is how the CLI finds them.
//!
//! # Responsibilities
//!
//! - Repository discovery and opening
//! - Commit ranges and per-commit changed files
//! - Per-file diffs and single-line blame
//! - The [`GitCommand`] catalogue for callers that shell out instead
//!
//! # Example
//!
//! ```ignore
//! use patchmate::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! for oid in git.commits_in_range("main", "HEAD")? {
//!     let files = git.changed_files(oid.as_str())?;
//!     println!("{}: {} files", oid.short(7), files.len());
//! }
//! ```

mod commands;
mod interface;

pub use commands::GitCommand;
pub use interface::{BlameLine, Git, GitError, RepoInfo};
