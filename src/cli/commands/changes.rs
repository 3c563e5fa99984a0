//! commit and range commands - Resolve reviewers for files changed in history

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use super::Session;
use crate::cli::Context;
use crate::core::types::PathPair;
use crate::ui::output;

/// Resolve reviewers for every file changed by one commit.
pub fn commit(ctx: &Context, rev: &str) -> Result<()> {
    let session = Session::open(ctx)?;
    let oid = session
        .git
        .resolve_commit(rev)
        .with_context(|| format!("Failed to resolve '{}'", rev))?;
    tracing::debug!("resolving files changed by {} ({})", oid.short(7), rev);

    let changed = session
        .git
        .changed_files(oid.as_str())
        .with_context(|| format!("Failed to list files changed by '{}'", rev))?;

    let files = pairs(&session, changed)?;
    session.resolve_all(files, ctx)
}

/// Resolve reviewers for every file changed by the commits in
/// `since..until`. Each file appears once, in first-seen order.
pub fn range(ctx: &Context, since: &str, until: &str) -> Result<()> {
    let session = Session::open(ctx)?;
    let commits = session
        .git
        .commits_in_range(since, until)
        .with_context(|| format!("Failed to list commits in '{}..{}'", since, until))?;

    if commits.is_empty() {
        output::warn(
            format!("no commits in {}..{}", since, until),
            ctx.verbosity(),
        );
    }

    let mut changed: Vec<PathBuf> = Vec::new();
    for oid in &commits {
        for path in session.git.changed_files(oid.as_str())? {
            if !changed.contains(&path) {
                changed.push(path);
            }
        }
    }

    let files = pairs(&session, changed)?;
    session.resolve_all(files, ctx)
}

fn pairs(session: &Session, relative: Vec<PathBuf>) -> Result<Vec<PathPair>> {
    relative
        .into_iter()
        .map(|rel| Ok(PathPair::under_root(&session.work_dir, rel)?))
        .collect()
}
