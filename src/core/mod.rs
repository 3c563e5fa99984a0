//! core
//!
//! Core domain types and schemas for patchmate.
//!
//! # Modules
//!
//! - [`types`] - Strong types: PathPair, Oid
//! - [`metadata`] - Metadata markers, line grammar, and the results container
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and self-describing
//! - Parsing is pure and never touches the filesystem

pub mod config;
pub mod metadata;
pub mod types;
