//! Injected diagnostics.
//!
//! Components receive a [`Reporter`] instead of reaching for a process-wide
//! logger, so each caller decides where their diagnostics go.

use std::sync::{Arc, Mutex};

/// Severity of a reported message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Warn,
}

/// Sink for diagnostic messages emitted while resolving versions
pub trait Reporter: Send + Sync {
    fn report(&self, level: Level, message: &str);

    fn debug(&self, message: &str) {
        self.report(Level::Debug, message);
    }

    fn info(&self, message: &str) {
        self.report(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.report(Level::Warn, message);
    }
}

/// Forwards messages to `tracing`, tagged with the emitting component
#[derive(Debug, Clone)]
pub struct TracingReporter {
    component: &'static str,
}

impl TracingReporter {
    pub fn new(component: &'static str) -> Self {
        TracingReporter { component }
    }

    pub fn shared(component: &'static str) -> Arc<dyn Reporter> {
        Arc::new(Self::new(component))
    }
}

impl Reporter for TracingReporter {
    fn report(&self, level: Level, message: &str) {
        match level {
            Level::Debug => tracing::debug!(component = self.component, "{}", message),
            Level::Info => tracing::info!(component = self.component, "{}", message),
            Level::Warn => tracing::warn!(component = self.component, "{}", message),
        }
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _level: Level, _message: &str) {}
}

/// Keeps messages in memory for later inspection
#[derive(Debug, Default)]
pub struct MemoryReporter {
    entries: Mutex<Vec<(Level, String)>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Whether any message at `level` contains `needle`
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.entries()
            .iter()
            .any(|(l, message)| *l == level && message.contains(needle))
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, level: Level, message: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push((level, message.to_string()));
        }
    }
}
