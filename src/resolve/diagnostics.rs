//! resolve::diagnostics
//!
//! Injected diagnostic sink for the resolver.
//!
//! The resolver never talks to a global logger. It records through a
//! [`DiagnosticSink`] handed to it by the caller:
//!
//! - [`TracingSink`] forwards to `tracing` (what the binary uses)
//! - [`MemorySink`] keeps records for inspection in tests
//! - [`NullSink`] drops everything
//!
//! Sinks are `Send + Sync`; a sink shared by resolvers running on several
//! threads serializes its own writes.

use std::fmt;
use std::sync::Mutex;

/// Severity of a diagnostic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        };
        f.write_str(s)
    }
}

/// Destination for resolver diagnostics.
pub trait DiagnosticSink: Send + Sync {
    /// Record one message at the given level.
    fn record(&self, level: Level, message: &str);
}

/// Forwards records to the `tracing` macros under the `patchmate::resolve`
/// target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, level: Level, message: &str) {
        match level {
            Level::Debug => tracing::debug!(target: "patchmate::resolve", "{}", message),
            Level::Info => tracing::info!(target: "patchmate::resolve", "{}", message),
            Level::Warn => tracing::warn!(target: "patchmate::resolve", "{}", message),
            Level::Error => tracing::error!(target: "patchmate::resolve", "{}", message),
        }
    }
}

/// Discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn record(&self, _level: Level, _message: &str) {}
}

/// Keeps every record in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<(Level, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records so far.
    pub fn records(&self) -> Vec<(Level, String)> {
        self.lock().clone()
    }

    /// Messages recorded at exactly `level`.
    pub fn messages_at(&self, level: Level) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(Level, String)>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&self, level: Level, message: &str) {
        self.lock().push((level, message.to_string()));
    }
}
