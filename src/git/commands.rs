//! git::commands
//!
//! Catalogue of the `git` command lines the surrounding tooling runs to
//! discover changes and attribute lines.
//!
//! Nothing in this crate executes these. They exist so callers that shell
//! out (CI scripts, other tools) build exactly the same invocations, and
//! each one has an in-process counterpart on [`crate::git::Git`]:
//!
//! | Template | `Git` method |
//! |---|---|
//! | [`GitCommand::LogRange`] | `commits_in_range` |
//! | [`GitCommand::ChangedFiles`] | `changed_files` |
//! | [`GitCommand::FileDiff`] | `file_diff` |
//! | [`GitCommand::BlameLine`] | `blame_line` |
//! | [`GitCommand::UserEmail`] | `user_email` |
//! | [`GitCommand::CommitBefore`] | `commit_before` |
//! | [`GitCommand::VerifyCommit`] | `verify_commit` |

use std::fmt;

/// A parameterized `git` invocation.
///
/// # Example
///
/// ```
/// use patchmate::git::GitCommand;
///
/// let cmd = GitCommand::LogRange { since: "v1.0", until: "HEAD" };
/// assert_eq!(cmd.to_string(), "git log v1.0..HEAD --format=%h");
/// assert_eq!(cmd.args(), vec!["log", "v1.0..HEAD", "--format=%h"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitCommand<'a> {
    /// Abbreviated hashes of the commits in `since..until`.
    LogRange { since: &'a str, until: &'a str },
    /// Paths touched by one commit.
    ChangedFiles { commit: &'a str },
    /// Zero-context diff of one file at one commit.
    FileDiff { commit: &'a str, path: &'a str },
    /// Blame for a single line, with author email or author name.
    BlameLine {
        commit: &'a str,
        path: &'a str,
        line: usize,
        email: bool,
    },
    /// The configured `user.email`.
    UserEmail,
    /// The commit immediately before `since`.
    CommitBefore { since: &'a str },
    /// Succeeds only if `hash` names an existing object.
    VerifyCommit { hash: &'a str },
}

impl GitCommand<'_> {
    /// Program to run.
    pub const PROGRAM: &'static str = "git";

    /// Arguments after the program name.
    pub fn args(&self) -> Vec<String> {
        match *self {
            GitCommand::LogRange { since, until } => vec![
                "log".into(),
                format!("{}..{}", since, until),
                "--format=%h".into(),
            ],
            GitCommand::ChangedFiles { commit } => vec![
                "show".into(),
                "--no-commit-id".into(),
                "--name-only".into(),
                "-r".into(),
                commit.into(),
            ],
            GitCommand::FileDiff { commit, path } => {
                vec!["show".into(), "-U0".into(), commit.into(), path.into()]
            }
            GitCommand::BlameLine {
                commit,
                path,
                line,
                email,
            } => {
                let mut args = vec![
                    "blame".into(),
                    commit.into(),
                    path.into(),
                    format!("-L{},{}", line, line),
                ];
                if email {
                    args.push("-e".into());
                }
                args
            }
            GitCommand::UserEmail => vec!["config".into(), "user.email".into()],
            GitCommand::CommitBefore { since } => vec![
                "log".into(),
                format!("{}^", since),
                "-n".into(),
                "1".into(),
                "--format=%h".into(),
            ],
            GitCommand::VerifyCommit { hash } => {
                vec!["cat-file".into(), "-e".into(), hash.into()]
            }
        }
    }
}

impl fmt::Display for GitCommand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", Self::PROGRAM, self.args().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_every_template() {
        let cases = [
            (
                GitCommand::LogRange {
                    since: "abc",
                    until: "def",
                },
                "git log abc..def --format=%h",
            ),
            (
                GitCommand::ChangedFiles { commit: "abc" },
                "git show --no-commit-id --name-only -r abc",
            ),
            (
                GitCommand::FileDiff {
                    commit: "abc",
                    path: "src/a.py",
                },
                "git show -U0 abc src/a.py",
            ),
            (
                GitCommand::BlameLine {
                    commit: "abc",
                    path: "src/a.py",
                    line: 12,
                    email: true,
                },
                "git blame abc src/a.py -L12,12 -e",
            ),
            (
                GitCommand::BlameLine {
                    commit: "abc",
                    path: "src/a.py",
                    line: 12,
                    email: false,
                },
                "git blame abc src/a.py -L12,12",
            ),
            (GitCommand::UserEmail, "git config user.email"),
            (
                GitCommand::CommitBefore { since: "abc" },
                "git log abc^ -n 1 --format=%h",
            ),
            (
                GitCommand::VerifyCommit { hash: "abc" },
                "git cat-file -e abc",
            ),
        ];

        for (cmd, expected) in cases {
            assert_eq!(cmd.to_string(), expected);
        }
    }

    #[test]
    fn paths_with_spaces_stay_one_argument() {
        let cmd = GitCommand::FileDiff {
            commit: "abc",
            path: "docs/read me.md",
        };
        assert_eq!(cmd.args().last().map(String::as_str), Some("docs/read me.md"));
    }
}
