//! core::metadata::results
//!
//! The results accumulator for one resolution level.
//!
//! # Merge Contract
//!
//! [`ResultsContainer::merge`] combines the result of the current level
//! (`local`) with the result of the level above it (`inherited`):
//!
//! - every entry of both is kept, nothing is deduplicated
//! - local entries come first, inherited entries are appended in order
//! - the `recursive` directive of the result is the local one
//!
//! Conflicting declarations for the same person survive the merge. Use
//! [`ResultsContainer::reviewers`] for a deduplicated view where the closest
//! declaration wins.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// The kind of responsibility an owner entry declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Reviewer,
    Maintainer,
}

impl Role {
    /// Map a metadata key to a role.
    ///
    /// Keys are matched case-insensitively and accept a plural form.
    ///
    /// ```
    /// use patchmate::core::metadata::Role;
    ///
    /// assert_eq!(Role::from_key("Owners"), Some(Role::Owner));
    /// assert_eq!(Role::from_key("reviewer"), Some(Role::Reviewer));
    /// assert_eq!(Role::from_key("recursive"), None);
    /// ```
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "owner" | "owners" => Some(Role::Owner),
            "reviewer" | "reviewers" => Some(Role::Reviewer),
            "maintainer" | "maintainers" => Some(Role::Maintainer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Reviewer => "reviewer",
            Role::Maintainer => "maintainer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One owner declaration, attributed to the path whose block declared it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerEntry {
    pub role: Role,
    pub name: String,
    /// Path relative to the change root of the file or directory whose
    /// metadata block contained the declaration.
    pub declared_in: PathBuf,
}

/// A metadata line the parser could not interpret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnrecognizedLine {
    pub line: String,
    pub declared_in: PathBuf,
}

/// The `recursive` directive as written in the metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Recursive(Option<String>);

impl Recursive {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Some(value.into()))
    }

    pub fn absent() -> Self {
        Self(None)
    }

    pub fn value(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Whether resolution should continue into the parent directory.
    ///
    /// True only when the directive is present, non-empty and not `"0"`.
    ///
    /// ```
    /// use patchmate::core::metadata::Recursive;
    ///
    /// assert!(Recursive::new("1").requests_ancestors());
    /// assert!(Recursive::new("yes").requests_ancestors());
    /// assert!(!Recursive::new("0").requests_ancestors());
    /// assert!(!Recursive::new("").requests_ancestors());
    /// assert!(!Recursive::absent().requests_ancestors());
    /// ```
    pub fn requests_ancestors(&self) -> bool {
        matches!(self.value(), Some(v) if !v.is_empty() && v != "0")
    }
}

/// Accumulated ownership data for one resolution level and everything it
/// inherited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultsContainer {
    entries: Vec<OwnerEntry>,
    unrecognized: Vec<UnrecognizedLine>,
    recursive: Recursive,
}

impl ResultsContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_entry(&mut self, role: Role, name: impl Into<String>, declared_in: &Path) {
        self.entries.push(OwnerEntry {
            role,
            name: name.into(),
            declared_in: declared_in.to_path_buf(),
        });
    }

    pub fn push_unrecognized(&mut self, line: impl Into<String>, declared_in: &Path) {
        self.unrecognized.push(UnrecognizedLine {
            line: line.into(),
            declared_in: declared_in.to_path_buf(),
        });
    }

    /// Record a `recursive` directive. The most recent one wins.
    pub fn set_recursive(&mut self, value: impl Into<String>) {
        self.recursive = Recursive::new(value);
    }

    pub fn recursive(&self) -> &Recursive {
        &self.recursive
    }

    /// All owner entries, local before inherited.
    pub fn entries(&self) -> &[OwnerEntry] {
        &self.entries
    }

    pub fn unrecognized(&self) -> &[UnrecognizedLine] {
        &self.unrecognized
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries with the given role, in order.
    pub fn with_role(&self, role: Role) -> impl Iterator<Item = &OwnerEntry> {
        self.entries.iter().filter(move |e| e.role == role)
    }

    /// Unique names across all roles in first-seen order.
    ///
    /// The first declaration of a name is the one closest to the changed
    /// file, so file-level entries take precedence over directory-level ones.
    pub fn reviewers(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !seen.contains(&entry.name.as_str()) {
                seen.push(entry.name.as_str());
            }
        }
        seen
    }

    /// Combine a level's own result with the result of the level above it.
    ///
    /// See the module docs for the ordering contract.
    pub fn merge(local: ResultsContainer, inherited: ResultsContainer) -> ResultsContainer {
        let ResultsContainer {
            mut entries,
            mut unrecognized,
            recursive,
        } = local;

        entries.extend(inherited.entries);
        unrecognized.extend(inherited.unrecognized);

        ResultsContainer {
            entries,
            unrecognized,
            recursive,
        }
    }
}
