//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag.
//! When `--json` is enabled, output is machine-readable JSON.

use std::fmt::Display;
use std::path::Path;

use crate::core::metadata::ResultsContainer;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// One line per resolved file: `path: name, name`.
pub fn format_resolution(path: &Path, results: &ResultsContainer) -> String {
    let reviewers = results.reviewers();
    if reviewers.is_empty() {
        format!("{}: (no reviewers)", path.display())
    } else {
        format!("{}: {}", path.display(), reviewers.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metadata::Role;

    #[test]
    fn verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn resolution_line_lists_unique_reviewers() {
        let mut results = ResultsContainer::new();
        results.push_entry(Role::Owner, "alice", Path::new("src/a.py"));
        results.push_entry(Role::Owner, "bob", Path::new("src"));
        results.push_entry(Role::Reviewer, "alice", Path::new(""));

        assert_eq!(
            format_resolution(Path::new("src/a.py"), &results),
            "src/a.py: alice, bob"
        );
    }

    #[test]
    fn resolution_line_without_reviewers() {
        assert_eq!(
            format_resolution(Path::new("lib/b.py"), &ResultsContainer::new()),
            "lib/b.py: (no reviewers)"
        );
    }
}
