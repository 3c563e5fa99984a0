//! resolve command - Resolve reviewers for working-tree paths

use std::path::{Component, Path, PathBuf};

use anyhow::{anyhow, Result};

use super::{canonical, current_dir, Session};
use crate::cli::Context;
use crate::core::types::PathPair;

/// Resolve reviewers for the given paths.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `paths` - Files relative to the working directory, or absolute
pub fn resolve(ctx: &Context, paths: &[PathBuf]) -> Result<()> {
    let session = Session::open(ctx)?;
    let cwd = canonical(&current_dir(ctx)?);

    let files = paths
        .iter()
        .map(|path| to_pair(&session.work_dir, &cwd, path))
        .collect::<Result<Vec<_>>>()?;

    session.resolve_all(files, ctx)
}

/// Turn a user-supplied path into a pair rooted at `work_dir`.
///
/// The file itself may not exist (it may have been deleted), so only its
/// directory is canonicalized.
fn to_pair(work_dir: &Path, cwd: &Path, path: &Path) -> Result<PathPair> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    let absolute = normalize(&joined);

    let absolute = match (absolute.parent(), absolute.file_name()) {
        (Some(dir), Some(name)) => canonical(dir).join(name),
        _ => absolute,
    };

    let relative = absolute.strip_prefix(work_dir).map_err(|_| {
        anyhow!(
            "'{}' is outside the repository at '{}'",
            path.display(),
            work_dir.display()
        )
    })?;

    Ok(PathPair::new(absolute.clone(), relative.to_path_buf())?)
}

/// Lexically drop `.` and fold `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
