//! resolve::fs
//!
//! The filesystem capability the resolver reads through.
//!
//! The resolver needs exactly two things: "is path P a regular file" and
//! "read the full text of path P". [`OsFileSystem`] answers them from disk;
//! [`MemoryFileSystem`] answers them from a map, records every access, and
//! can be told to fail reads for chosen paths.

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Read-only filesystem access.
pub trait FileSystem: Send + Sync {
    /// Whether `path` is a regular file. Directories, submodule checkouts
    /// and dangling links are not.
    fn exists(&self, path: &Path) -> bool;

    /// Read the whole file at `path` as text. Bytes that are not UTF-8 are
    /// replaced, never rejected.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let bytes = std::fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// One access made through a [`MemoryFileSystem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Exists(PathBuf),
    Read(PathBuf),
}

impl Access {
    pub fn path(&self) -> &Path {
        match self {
            Access::Exists(p) | Access::Read(p) => p,
        }
    }
}

/// In-memory filesystem that records accesses.
///
/// # Example
///
/// ```
/// use patchmate::resolve::{FileSystem, MemoryFileSystem};
/// use std::path::Path;
///
/// let fs = MemoryFileSystem::new()
///     .with_file("/repo/a.txt", "hello")
///     .with_failing_read("/repo/broken");
///
/// assert_eq!(fs.read_to_string(Path::new("/repo/a.txt")).unwrap(), "hello");
/// assert!(fs.exists(Path::new("/repo/broken")));
/// assert!(fs.read_to_string(Path::new("/repo/broken")).is_err());
/// assert!(fs.was_read(Path::new("/repo/a.txt")));
/// ```
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: HashMap<PathBuf, String>,
    failing: HashSet<PathBuf>,
    accesses: Mutex<Vec<Access>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given content.
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// Add a path that exists but fails to read.
    pub fn with_failing_read(mut self, path: impl Into<PathBuf>) -> Self {
        self.failing.insert(path.into());
        self
    }

    /// Every access so far, in order.
    pub fn accesses(&self) -> Vec<Access> {
        self.lock().clone()
    }

    /// Whether `path` has been read.
    pub fn was_read(&self, path: &Path) -> bool {
        self.lock()
            .iter()
            .any(|a| matches!(a, Access::Read(p) if p == path))
    }

    /// Whether any access touched `path` itself or something directly
    /// inside it.
    pub fn touched_in(&self, dir: &Path) -> bool {
        self.lock()
            .iter()
            .any(|a| a.path() == dir || a.path().parent() == Some(dir))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Access>> {
        self.accesses.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.lock().push(Access::Exists(path.to_path_buf()));
        self.files.contains_key(path) || self.failing.contains(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.lock().push(Access::Read(path.to_path_buf()));
        if self.failing.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("injected read failure: {}", path.display()),
            ));
        }
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )
        })
    }
}
