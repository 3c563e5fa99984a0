//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--json`: Machine-readable output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// patchmate - Find the reviewers for changed files from in-tree review metadata
#[derive(Parser, Debug)]
#[command(name = "patchmate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if patchmate was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve reviewers for files in the working tree
    #[command(
        name = "resolve",
        long_about = "Resolve reviewers for files in the working tree.\n\n\
            Each path is resolved from the metadata block in the file itself and, \
            when that block says `recursive: 1`, from the review.metadata files of \
            its parent directories. Paths that no longer exist still resolve \
            through their directories.",
        after_help = "\
EXAMPLES:
    patchmate resolve src/main.rs
    patchmate resolve --json src/a.py src/b.py"
    )]
    Resolve {
        /// Files to resolve, relative to the current directory or absolute
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Resolve reviewers for every file changed by a commit
    #[command(name = "commit")]
    Commit {
        /// Commit to inspect
        #[arg(default_value = "HEAD")]
        rev: String,
    },

    /// Resolve reviewers for every file changed in a commit range
    #[command(
        name = "range",
        after_help = "\
EXAMPLES:
    # Everything on this branch since it left main
    patchmate range main HEAD"
    )]
    Range {
        /// Exclusive start of the range
        since: String,

        /// Inclusive end of the range
        #[arg(default_value = "HEAD")]
        until: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_resolve_with_global_flags() {
        let cli = Cli::try_parse_from(["patchmate", "resolve", "a.rs", "b.rs", "--json", "-q"])
            .unwrap();
        assert!(cli.json);
        assert!(cli.quiet);
        match cli.command {
            Command::Resolve { paths } => {
                assert_eq!(paths, vec![PathBuf::from("a.rs"), PathBuf::from("b.rs")])
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn resolve_requires_a_path() {
        assert!(Cli::try_parse_from(["patchmate", "resolve"]).is_err());
    }

    #[test]
    fn range_defaults_until_to_head() {
        let cli = Cli::try_parse_from(["patchmate", "range", "main"]).unwrap();
        match cli.command {
            Command::Range { since, until } => {
                assert_eq!(since, "main");
                assert_eq!(until, "HEAD");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
