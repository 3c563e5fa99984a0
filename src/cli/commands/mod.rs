//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Opens the repository and loads configuration ([`Session`])
//! 2. Turns its arguments into change-root-relative [`PathPair`]s
//! 3. Resolves each one and hands the results to [`report`]
//!
//! A file whose own metadata cannot be read is reported and skipped; the
//! command still resolves the rest and then fails.

mod changes;
mod resolve;

pub use changes::{commit, range};
pub use resolve::resolve;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use serde::Serialize;

use crate::cli::args::Command;
use crate::cli::Context;
use crate::core::config::Config;
use crate::core::metadata::ResultsContainer;
use crate::core::types::PathPair;
use crate::git::Git;
use crate::resolve::{OsFileSystem, Resolver, ResolverSettings, TracingSink};
use crate::ui::output::{self, Verbosity};

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Resolve { paths } => resolve::resolve(ctx, &paths),
        Command::Commit { rev } => changes::commit(ctx, &rev),
        Command::Range { since, until } => changes::range(ctx, &since, &until),
    }
}

/// An opened repository with its configuration.
struct Session {
    git: Git,
    work_dir: PathBuf,
    settings: ResolverSettings,
}

impl Session {
    fn open(ctx: &Context) -> Result<Self> {
        let cwd = current_dir(ctx)?;
        let git = Git::open(&cwd).context("Failed to open repository")?;
        let info = git.info()?;

        let config = Config::load(Some(&info.git_dir)).context("Failed to load configuration")?;
        tracing::debug!(
            global = ?config.global_config_loaded_from(),
            repo = ?config.repo_config_loaded_from(),
            "configuration loaded"
        );
        let settings = ResolverSettings::from_config(&config)?;

        let work_dir = canonical(&info.work_dir);
        Ok(Self {
            git,
            work_dir,
            settings,
        })
    }

    /// Resolve every pair, in order.
    fn resolve_all(&self, files: Vec<PathPair>, ctx: &Context) -> Result<()> {
        let sink = TracingSink;
        let resolver = Resolver::with_settings(&OsFileSystem, &sink, self.settings.clone());

        let mut resolved = Vec::with_capacity(files.len());
        let mut failures = 0usize;
        for file in files {
            match resolver.resolve_file(&file) {
                Ok(results) => resolved.push((file, results)),
                Err(err) => {
                    failures += 1;
                    output::error(format!("{}: {}", file.relative().display(), err));
                }
            }
        }

        report(&resolved, ctx)?;

        if failures > 0 {
            bail!("{} file(s) could not be resolved", failures);
        }
        Ok(())
    }
}

fn current_dir(ctx: &Context) -> Result<PathBuf> {
    match &ctx.cwd {
        Some(cwd) => Ok(cwd.clone()),
        None => std::env::current_dir().context("Failed to read current directory"),
    }
}

/// Canonical form of an existing directory, or the path unchanged.
fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

#[derive(Serialize)]
struct FileReport<'a> {
    path: &'a Path,
    reviewers: Vec<&'a str>,
    results: &'a ResultsContainer,
}

/// Print resolved files in the format the context asks for.
///
/// - `--json`: an array of `{path, reviewers, results}`
/// - `--quiet`: unique reviewer names across all files, one per line
/// - otherwise: `path: name, name` per file
fn report(resolved: &[(PathPair, ResultsContainer)], ctx: &Context) -> Result<()> {
    if ctx.json {
        let reports: Vec<FileReport<'_>> = resolved
            .iter()
            .map(|(file, results)| FileReport {
                path: file.relative(),
                reviewers: results.reviewers(),
                results,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    match ctx.verbosity() {
        Verbosity::Quiet => {
            let mut names: Vec<&str> = Vec::new();
            for (_, results) in resolved {
                for name in results.reviewers() {
                    if !names.contains(&name) {
                        names.push(name);
                    }
                }
            }
            for name in names {
                println!("{}", name);
            }
        }
        verbosity => {
            for (file, results) in resolved {
                output::print(output::format_resolution(file.relative(), results), verbosity);
            }
        }
    }

    Ok(())
}
