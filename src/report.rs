//! Reporter capability for non-fatal diagnostics.
//!
//! The pipeline never inspects what a reporter does with a message; it only
//! hands over human-readable parts (`["Failed to build bundle:", path, msg]`).

use parking_lot::Mutex;

use crate::log;

/// Receiver of human-readable diagnostics.
pub trait Reporter: Send + Sync {
    fn report(&self, parts: &[&str]);
}

/// Prints each report through the `log!` macro.
#[derive(Debug, Clone)]
pub struct LogReporter {
    module: &'static str,
}

impl LogReporter {
    pub const fn new(module: &'static str) -> Self {
        Self { module }
    }
}

impl Default for LogReporter {
    fn default() -> Self {
        Self::new("bunch")
    }
}

impl Reporter for LogReporter {
    fn report(&self, parts: &[&str]) {
        log!(self.module; "{}", parts.join(" "));
    }
}

/// Collects reports in memory, one joined line per call.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    lines: Mutex<Vec<String>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Whether any collected line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.lock().iter().any(|line| line.contains(needle))
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, parts: &[&str]) {
        self.lines.lock().push(parts.join(" "));
    }
}
