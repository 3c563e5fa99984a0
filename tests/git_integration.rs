//! Integration tests for the Git interface.
//!
//! These tests use real git repositories created via tempfile to verify
//! that the Git queries agree with the git command line.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use patchmate::git::{Git, GitCommand, GitError};

/// Test fixture that creates a real git repository.
struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create a new test repository with an initial commit.
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");

        run_git(dir.path(), &["init"]);
        run_git(dir.path(), &["config", "user.email", "test@example.com"]);
        run_git(dir.path(), &["config", "user.name", "Test User"]);

        let repo = Self { dir };
        repo.commit_file("README.md", "# Test Repo\n", "Initial commit");
        repo
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn git(&self) -> Git {
        Git::open(self.path()).expect("failed to open test repo")
    }

    /// Write a file (creating directories) and commit it, returning the
    /// new HEAD hash.
    fn commit_file(&self, path: &str, content: &str, message: &str) -> String {
        let full = self.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full, content).unwrap();
        run_git(self.path(), &["add", path]);
        run_git(self.path(), &["commit", "-m", message]);
        self.rev_parse("HEAD")
    }

    /// Run a catalogue command and return its trimmed stdout.
    fn run(&self, command: &GitCommand<'_>) -> String {
        let output = Command::new(GitCommand::PROGRAM)
            .args(command.args())
            .current_dir(self.path())
            .output()
            .expect("git command failed");
        assert!(output.status.success(), "{} failed", command);
        String::from_utf8(output.stdout).unwrap().trim().to_string()
    }

    fn rev_parse(&self, rev: &str) -> String {
        let output = Command::new("git")
            .args(["rev-parse", rev])
            .current_dir(self.path())
            .output()
            .expect("git rev-parse failed");
        String::from_utf8(output.stdout).unwrap().trim().to_string()
    }
}

/// Run a git command in the given directory.
fn run_git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git command failed");

    if !output.status.success() {
        panic!(
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

// =============================================================================
// Repository Opening Tests
// =============================================================================

#[test]
fn open_from_subdirectory() {
    let repo = TestRepo::new();
    let subdir = repo.path().join("subdir");
    std::fs::create_dir(&subdir).unwrap();

    let git = Git::open(&subdir).unwrap();
    let info = git.info().unwrap();

    assert_eq!(
        info.work_dir.canonicalize().unwrap(),
        repo.path().canonicalize().unwrap()
    );
}

#[test]
fn open_non_repository_fails() {
    let dir = TempDir::new().unwrap();
    let git = Git::open(dir.path());
    assert!(matches!(git, Err(GitError::NotARepo { .. })));
}

// =============================================================================
// Revision Tests
// =============================================================================

#[test]
fn verify_commit_matches_catalogue() {
    let repo = TestRepo::new();
    let head = repo.rev_parse("HEAD");
    let git = repo.git();

    assert!(git.verify_commit(&head));
    assert!(!git.verify_commit("0000000000000000000000000000000000000000"));

    // `cat-file -e` prints nothing and exits zero for an existing object.
    assert!(repo.run(&GitCommand::VerifyCommit { hash: &head }).is_empty());
}

#[test]
fn resolve_commit_expands_revisions() {
    let repo = TestRepo::new();
    let head = repo.rev_parse("HEAD");
    let git = repo.git();

    let oid = git.resolve_commit("HEAD").unwrap();
    assert_eq!(oid.as_str(), head);
    assert_eq!(git.resolve_commit(&head[..7]).unwrap(), oid);
    assert_eq!(oid.short(7), &head[..7]);
}

#[test]
fn unknown_revision_is_reported() {
    let repo = TestRepo::new();
    let err = repo.git().changed_files("no-such-branch").unwrap_err();
    assert!(matches!(err, GitError::RevisionNotFound { .. }));
}

#[test]
fn commits_in_range_newest_first() {
    let repo = TestRepo::new();
    let base = repo.rev_parse("HEAD");
    let first = repo.commit_file("a.txt", "a\n", "Add a");
    let second = repo.commit_file("b.txt", "b\n", "Add b");

    let commits = repo.git().commits_in_range(&base, "HEAD").unwrap();
    let hashes: Vec<&str> = commits.iter().map(|c| c.as_str()).collect();

    assert_eq!(hashes, vec![second.as_str(), first.as_str()]);

    let logged = repo.run(&GitCommand::LogRange {
        since: &base,
        until: "HEAD",
    });
    let short: Vec<&str> = logged.lines().collect();
    assert_eq!(short.len(), hashes.len());
    for (short, full) in short.iter().zip(&hashes) {
        assert!(full.starts_with(*short));
    }
}

#[test]
fn commit_before_is_first_parent() {
    let repo = TestRepo::new();
    let base = repo.rev_parse("HEAD");
    let next = repo.commit_file("a.txt", "a\n", "Add a");
    let git = repo.git();

    assert_eq!(git.commit_before(&next).unwrap().unwrap().as_str(), base);
    assert!(git.commit_before(&base).unwrap().is_none());
}

// =============================================================================
// Diff Tests
// =============================================================================

#[test]
fn changed_files_lists_paths_relative_to_root() {
    let repo = TestRepo::new();
    std::fs::create_dir_all(repo.path().join("src")).unwrap();
    std::fs::write(repo.path().join("src/a.py"), "a\n").unwrap();
    std::fs::write(repo.path().join("src/b.py"), "b\n").unwrap();
    run_git(repo.path(), &["add", "src"]);
    run_git(repo.path(), &["commit", "-m", "Add src"]);
    let head = repo.rev_parse("HEAD");

    let mut files = repo.git().changed_files(&head).unwrap();
    files.sort();

    assert_eq!(files, vec![Path::new("src/a.py"), Path::new("src/b.py")]);

    let listed = repo.run(&GitCommand::ChangedFiles { commit: &head });
    let mut listed: Vec<&str> = listed.lines().collect();
    listed.sort();
    assert_eq!(listed, vec!["src/a.py", "src/b.py"]);
}

#[test]
fn changed_files_includes_deletions() {
    let repo = TestRepo::new();
    run_git(repo.path(), &["rm", "README.md"]);
    run_git(repo.path(), &["commit", "-m", "Remove readme"]);

    let files = repo.git().changed_files("HEAD").unwrap();

    assert_eq!(files, vec![Path::new("README.md")]);
}

#[test]
fn file_diff_has_no_context() {
    let repo = TestRepo::new();
    repo.commit_file("a.txt", "one\ntwo\nthree\n", "Add a");
    repo.commit_file("a.txt", "one\nTWO\nthree\n", "Change a");

    let diff = repo.git().file_diff("HEAD", Path::new("a.txt")).unwrap();

    assert!(diff.contains("-two\n"));
    assert!(diff.contains("+TWO\n"));
    assert!(!diff.contains(" one\n"));
}

#[test]
fn file_diff_of_untouched_file_is_empty() {
    let repo = TestRepo::new();
    repo.commit_file("a.txt", "a\n", "Add a");

    let diff = repo.git().file_diff("HEAD", Path::new("README.md")).unwrap();

    assert!(diff.is_empty());
}

// =============================================================================
// Attribution Tests
// =============================================================================

#[test]
fn blame_line_reports_author() {
    let repo = TestRepo::new();
    let first = repo.commit_file("a.txt", "one\ntwo\n", "Add a");
    repo.commit_file("a.txt", "one\nTWO\n", "Change a");

    let blame = repo
        .git()
        .blame_line("HEAD", Path::new("a.txt"), 1)
        .unwrap();

    assert_eq!(blame.line, 1);
    assert_eq!(blame.commit.as_str(), first);
    assert_eq!(blame.author_email, "test@example.com");
}

#[test]
fn blame_line_out_of_range() {
    let repo = TestRepo::new();

    let result = repo.git().blame_line("HEAD", Path::new("README.md"), 99);

    assert!(result.is_err());
}

#[test]
fn user_email_from_repo_config() {
    let repo = TestRepo::new();
    assert_eq!(
        repo.git().user_email().unwrap().as_deref(),
        Some("test@example.com")
    );
}
