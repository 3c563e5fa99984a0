//! core::metadata::line
//!
//! Parsing of individual metadata lines.
//!
//! # Grammar
//!
//! ```text
//! line  := [comment-leader] key sep value [comment-trailer]
//! sep   := ':' | '='
//! key   := 'recursive' | role key (see [`Role::from_key`])
//! value := item (',' item)*
//! ```
//!
//! Blocks usually live inside source comments, so a leading `#`, `//`,
//! `--`, `;`, `*`, `/*` or `<!--` and a trailing `*/` or `-->` are ignored.
//!
//! A line that does not fit the grammar is kept as an unrecognized line. It
//! never stops the parsing of the lines around it.

use std::path::Path;

use super::results::{ResultsContainer, Role};

/// Checked in order, multi-character leaders first.
const COMMENT_LEADERS: &[&str] = &["<!--", "/*", "//", "--", "#", ";", "*"];
const COMMENT_TRAILERS: &[&str] = &["-->", "*/"];

const RECURSIVE_KEY: &str = "recursive";

/// The meaning of one metadata line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataLine {
    /// `recursive: <value>`
    Recursive(String),
    /// `<role>: name[, name...]`
    Owners { role: Role, names: Vec<String> },
    /// Anything else, with the original text trimmed.
    Unrecognized(String),
}

impl MetadataLine {
    /// Parse one line. Returns `None` for lines that are blank once
    /// comment decoration is removed.
    ///
    /// ```
    /// use patchmate::core::metadata::{MetadataLine, Role};
    ///
    /// assert_eq!(
    ///     MetadataLine::parse("# owner: alice, bob"),
    ///     Some(MetadataLine::Owners {
    ///         role: Role::Owner,
    ///         names: vec!["alice".into(), "bob".into()],
    ///     })
    /// );
    /// assert_eq!(
    ///     MetadataLine::parse("recursive = 0"),
    ///     Some(MetadataLine::Recursive("0".into()))
    /// );
    /// assert_eq!(MetadataLine::parse("   #  "), None);
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let body = strip_comment(raw);
        if body.is_empty() {
            return None;
        }

        let Some(sep) = body.find(|c: char| c == ':' || c == '=') else {
            return Some(MetadataLine::Unrecognized(body.to_string()));
        };
        let key = body[..sep].trim();
        let value = body[sep + 1..].trim();

        if key.eq_ignore_ascii_case(RECURSIVE_KEY) {
            return Some(MetadataLine::Recursive(value.to_string()));
        }

        let Some(role) = Role::from_key(key) else {
            return Some(MetadataLine::Unrecognized(body.to_string()));
        };

        let names: Vec<String> = value
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect();

        if names.is_empty() {
            return Some(MetadataLine::Unrecognized(body.to_string()));
        }

        Some(MetadataLine::Owners { role, names })
    }

    /// Apply this line to an accumulator, attributing entries to `declared_in`.
    pub fn apply(self, results: &mut ResultsContainer, declared_in: &Path) {
        match self {
            MetadataLine::Recursive(value) => results.set_recursive(value),
            MetadataLine::Owners { role, names } => {
                for name in names {
                    results.push_entry(role, name, declared_in);
                }
            }
            MetadataLine::Unrecognized(line) => results.push_unrecognized(line, declared_in),
        }
    }
}

/// Parse a whole metadata block into a fresh accumulator.
///
/// Blank lines are skipped; every other line is parsed independently.
pub fn parse_block(block: &str, declared_in: &Path) -> ResultsContainer {
    let mut results = ResultsContainer::new();
    for line in block.lines().filter_map(MetadataLine::parse) {
        line.apply(&mut results, declared_in);
    }
    results
}

fn strip_comment(raw: &str) -> &str {
    let mut body = raw.trim();

    if let Some(leader) = COMMENT_LEADERS.iter().find(|l| body.starts_with(**l)) {
        body = body[leader.len()..].trim_start();
    }
    if let Some(trailer) = COMMENT_TRAILERS.iter().find(|t| body.ends_with(**t)) {
        body = body[..body.len() - trailer.len()].trim_end();
    }

    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_owner_roles() {
        assert_eq!(
            MetadataLine::parse("reviewers: team-core"),
            Some(MetadataLine::Owners {
                role: Role::Reviewer,
                names: vec!["team-core".into()],
            })
        );
        assert_eq!(
            MetadataLine::parse("MAINTAINER = dave@example.com"),
            Some(MetadataLine::Owners {
                role: Role::Maintainer,
                names: vec!["dave@example.com".into()],
            })
        );
    }

    #[test]
    fn strips_comment_decoration() {
        for raw in [
            "// owner: alice",
            " * owner: alice",
            "-- owner: alice",
            "; owner: alice",
            "/* owner: alice */",
            "<!-- owner: alice -->",
        ] {
            assert_eq!(
                MetadataLine::parse(raw),
                Some(MetadataLine::Owners {
                    role: Role::Owner,
                    names: vec!["alice".into()],
                }),
                "line: {raw}"
            );
        }
    }

    #[test]
    fn recursive_keeps_raw_value() {
        assert_eq!(
            MetadataLine::parse("# Recursive: 1"),
            Some(MetadataLine::Recursive("1".into()))
        );
        assert_eq!(
            MetadataLine::parse("recursive:"),
            Some(MetadataLine::Recursive(String::new()))
        );
    }

    #[test]
    fn malformed_lines_are_unrecognized() {
        assert_eq!(
            MetadataLine::parse("just some words"),
            Some(MetadataLine::Unrecognized("just some words".into()))
        );
        assert_eq!(
            MetadataLine::parse("team: platform"),
            Some(MetadataLine::Unrecognized("team: platform".into()))
        );
        assert_eq!(
            MetadataLine::parse("owner: , ,"),
            Some(MetadataLine::Unrecognized("owner: , ,".into()))
        );
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(MetadataLine::parse(""), None);
        assert_eq!(MetadataLine::parse("   \t"), None);
        assert_eq!(MetadataLine::parse("//"), None);
    }

    #[test]
    fn parse_block_continues_past_bad_lines() {
        let block = "\n# owner: alice\n# ???\n\n# reviewer: bob, carol\n# recursive: 1\n";
        let results = parse_block(block, Path::new("src/a.py"));

        let names: Vec<_> = results.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob", "carol"]);
        assert_eq!(results.unrecognized().len(), 1);
        assert_eq!(results.unrecognized()[0].line, "???");
        assert!(results.recursive().requests_ancestors());
        assert!(results
            .entries()
            .iter()
            .all(|e| e.declared_in == Path::new("src/a.py")));
    }

    #[test]
    fn last_recursive_directive_wins() {
        let results = parse_block("recursive: 1\nrecursive: 0\n", Path::new(""));
        assert_eq!(results.recursive().value(), Some("0"));
        assert!(!results.recursive().requests_ancestors());
    }

    #[test]
    fn empty_block_gives_empty_results() {
        let results = parse_block("", Path::new("x"));
        assert_eq!(results, ResultsContainer::new());
    }
}
