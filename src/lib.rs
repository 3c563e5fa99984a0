//! patchmate - Resolve reviewers for changed files from in-tree metadata
//!
//! Ownership is declared next to the code: inside a file between
//! `@REVIEW-METADATA-BEGIN` and `@REVIEW-METADATA-END` markers, or in a
//! `review.metadata` file in any directory. Resolving a file collects its
//! own declarations and, while each level sets `recursive`, those of every
//! enclosing directory up to the change root.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to the resolver)
//! - [`resolve`] - The resolution engine: file and directory walk
//! - [`core`] - Domain types, metadata parsing, and configuration
//! - [`git`] - Git queries and the command template catalogue
//! - [`ui`] - Output formatting
//!
//! # Invariants
//!
//! 1. Local declarations always come before inherited ones
//! 2. The walk never leaves the change root
//! 3. A broken ancestor never discards what was already resolved

pub mod cli;
pub mod core;
pub mod git;
pub mod resolve;
pub mod ui;
