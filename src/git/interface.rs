//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module is the single doorway to Git for patchmate. It answers the
//! questions the reviewer tooling asks of a repository (which commits are in
//! a range, which files a commit touched, who wrote a line) and normalizes
//! git2 errors into typed failure categories.
//!
//! # Error Handling
//!
//! - [`GitError::NotARepo`]: Not inside a Git repository
//! - [`GitError::BareRepo`]: No working directory to resolve files in
//! - [`GitError::RevisionNotFound`]: A revision spec did not resolve
//! - [`GitError::LineOutOfRange`]: Blame asked for a line the file lacks
//!
//! # Example
//!
//! ```ignore
//! use patchmate::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! for path in git.changed_files("HEAD")? {
//!     println!("{}", path.display());
//! }
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::types::{Oid, TypeError};

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("bare repository not supported")]
    BareRepo,

    /// A revision spec did not resolve to a commit.
    #[error("revision not found: {spec}")]
    RevisionNotFound {
        /// The revision spec as given
        spec: String,
    },

    /// Invalid object id format.
    #[error("invalid object id: {oid}")]
    InvalidOid {
        /// The invalid OID string
        oid: String,
    },

    /// Blame asked for a line outside the file.
    #[error("line {line} is out of range for {path}")]
    LineOutOfRange {
        /// The file that was blamed
        path: PathBuf,
        /// The 1-indexed line requested
        line: usize,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Create a GitError from a git2::Error with the revision or path that
    /// was being looked up.
    fn from_git2(err: git2::Error, context: &str) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound
            | git2::ErrorCode::Ambiguous
            | git2::ErrorCode::InvalidSpec => GitError::RevisionNotFound {
                spec: context.to_string(),
            },
            _ => GitError::Internal {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }

    fn internal(err: git2::Error) -> Self {
        GitError::Internal {
            message: err.message().to_string(),
        }
    }
}

impl From<TypeError> for GitError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::InvalidOid(msg) => GitError::InvalidOid { oid: msg },
            other => GitError::Internal {
                message: other.to_string(),
            },
        }
    }
}

/// Information about a Git repository.
#[derive(Debug, Clone)]
pub struct RepoInfo {
    /// Path to .git directory
    pub git_dir: PathBuf,
    /// Path to working directory
    pub work_dir: PathBuf,
}

/// Attribution of a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlameLine {
    /// 1-indexed line number
    pub line: usize,
    /// Commit that last changed the line
    pub commit: Oid,
    /// Author name
    pub author_name: String,
    /// Author email
    pub author_email: String,
}

/// The Git interface.
///
/// This is the **single point of interaction** with Git. No other module
/// imports `git2`.
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    // =========================================================================
    // Repository Opening and Info
    // =========================================================================

    /// Open a repository at the given path.
    ///
    /// Uses `git2::Repository::discover` to find the repository root,
    /// so `path` can be any directory within the repository.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    /// - [`GitError::BareRepo`] if the repository has no working directory
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        if repo.is_bare() {
            return Err(GitError::BareRepo);
        }

        Ok(Self { repo })
    }

    /// Get repository information (git_dir and work_dir paths).
    pub fn info(&self) -> Result<RepoInfo, GitError> {
        let git_dir = self.repo.path().to_path_buf();
        let work_dir = self.work_dir()?.to_path_buf();

        Ok(RepoInfo { git_dir, work_dir })
    }

    /// The working directory, which is the change root for resolution.
    pub fn work_dir(&self) -> Result<&Path, GitError> {
        self.repo.workdir().ok_or(GitError::BareRepo)
    }

    // =========================================================================
    // Revisions
    // =========================================================================

    fn find_commit(&self, spec: &str) -> Result<git2::Commit<'_>, GitError> {
        self.repo
            .revparse_single(spec)
            .and_then(|obj| obj.peel_to_commit())
            .map_err(|e| GitError::from_git2(e, spec))
    }

    /// Resolve a revision spec (`HEAD`, a branch, a short hash) to a commit.
    pub fn resolve_commit(&self, spec: &str) -> Result<Oid, GitError> {
        let commit = self.find_commit(spec)?;
        Ok(Oid::new(commit.id().to_string())?)
    }

    /// Whether `hash` names an existing commit.
    pub fn verify_commit(&self, hash: &str) -> bool {
        self.find_commit(hash).is_ok()
    }

    /// Commits reachable from `until` but not from `since`, newest first.
    pub fn commits_in_range(&self, since: &str, until: &str) -> Result<Vec<Oid>, GitError> {
        let since_commit = self.find_commit(since)?;
        let until_commit = self.find_commit(until)?;

        let mut revwalk = self.repo.revwalk().map_err(GitError::internal)?;
        revwalk
            .set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)
            .map_err(GitError::internal)?;
        revwalk.push(until_commit.id()).map_err(GitError::internal)?;
        revwalk.hide(since_commit.id()).map_err(GitError::internal)?;

        let mut commits = Vec::new();
        for oid in revwalk {
            let oid = oid.map_err(GitError::internal)?;
            commits.push(Oid::new(oid.to_string())?);
        }
        Ok(commits)
    }

    /// The first parent of `since`, or `None` for a root commit.
    pub fn commit_before(&self, since: &str) -> Result<Option<Oid>, GitError> {
        let commit = self.find_commit(since)?;
        match commit.parent_ids().next() {
            Some(parent) => Ok(Some(Oid::new(parent.to_string())?)),
            None => Ok(None),
        }
    }

    // =========================================================================
    // Diffs
    // =========================================================================

    fn commit_diff(
        &self,
        commit: &git2::Commit<'_>,
        opts: Option<&mut git2::DiffOptions>,
    ) -> Result<git2::Diff<'_>, GitError> {
        let tree = commit.tree().map_err(GitError::internal)?;
        let parent_tree = match commit.parents().next() {
            Some(parent) => Some(parent.tree().map_err(GitError::internal)?),
            None => None,
        };

        self.repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), opts)
            .map_err(GitError::internal)
    }

    /// Paths changed by a commit, relative to the repository root.
    ///
    /// Deleted files are included under their old path. Root commits list
    /// every file they add.
    pub fn changed_files(&self, commit: &str) -> Result<Vec<PathBuf>, GitError> {
        let commit = self.find_commit(commit)?;
        let diff = self.commit_diff(&commit, None)?;

        let mut paths = Vec::new();
        for delta in diff.deltas() {
            if let Some(path) = delta.new_file().path().or_else(|| delta.old_file().path()) {
                paths.push(path.to_path_buf());
            }
        }
        Ok(paths)
    }

    /// Zero-context patch of one file as changed by a commit.
    ///
    /// Returns an empty string if the commit did not touch the file.
    pub fn file_diff(&self, commit: &str, path: &Path) -> Result<String, GitError> {
        let commit = self.find_commit(commit)?;

        let mut opts = git2::DiffOptions::new();
        opts.context_lines(0).pathspec(path);
        let diff = self.commit_diff(&commit, Some(&mut opts))?;

        let mut patch = String::new();
        diff.print(git2::DiffFormat::Patch, |_delta, _hunk, line| {
            if matches!(line.origin(), '+' | '-' | ' ') {
                patch.push(line.origin());
            }
            patch.push_str(&String::from_utf8_lossy(line.content()));
            true
        })
        .map_err(GitError::internal)?;

        Ok(patch)
    }

    // =========================================================================
    // Attribution
    // =========================================================================

    /// Who last changed `line` (1-indexed) of `path` as of `commit`.
    ///
    /// `path` is relative to the working directory.
    pub fn blame_line(&self, commit: &str, path: &Path, line: usize) -> Result<BlameLine, GitError> {
        let newest = self.find_commit(commit)?.id();

        let mut opts = git2::BlameOptions::new();
        opts.newest_commit(newest).min_line(line).max_line(line);

        let blame = self
            .repo
            .blame_file(path, Some(&mut opts))
            .map_err(|e| GitError::from_git2(e, &path.display().to_string()))?;

        let hunk = blame.get_line(line).ok_or_else(|| GitError::LineOutOfRange {
            path: path.to_path_buf(),
            line,
        })?;
        let signature = hunk.final_signature();

        Ok(BlameLine {
            line,
            commit: Oid::new(hunk.final_commit_id().to_string())?,
            author_name: signature.name().unwrap_or("").to_string(),
            author_email: signature.email().unwrap_or("").to_string(),
        })
    }

    /// The configured `user.email`, if any.
    pub fn user_email(&self) -> Result<Option<String>, GitError> {
        let config = self.repo.config().map_err(GitError::internal)?;
        match config.get_string("user.email") {
            Ok(email) => Ok(Some(email)),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(GitError::internal(e)),
        }
    }
}
