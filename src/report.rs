//! Diagnostic output for the pipeline.
//!
//! Every recoverable anomaly (bad numeric field, dropped biome, duplicate
//! body) goes through a [`Report`] so the batch run stays decoupled from
//! stdout. The console implementation prints one line per anomaly; the
//! recording implementation lets tests assert that a diagnostic was emitted.

/// Sink for progress and anomaly messages.
pub trait Report {
    /// Progress message (phase changes, row-count summaries).
    fn info(&mut self, message: impl Into<String>);
    /// Recoverable anomaly. One line per defaulted field, dropped entry,
    /// or skipped duplicate row.
    fn warn(&mut self, message: impl Into<String>);
}

/// Prints every message to standard output.
#[derive(Default)]
pub struct ConsoleReport;

impl ConsoleReport {
    pub fn new() -> Self {
        Self
    }
}

impl Report for ConsoleReport {
    fn info(&mut self, message: impl Into<String>) {
        println!("{}", message.into());
    }

    fn warn(&mut self, message: impl Into<String>) {
        println!("{}", message.into());
    }
}

/// Discards every message. For non-interactive callers that only care
/// about the result.
#[derive(Default)]
pub struct SilentReport;

impl SilentReport {
    pub fn new() -> Self {
        Self
    }
}

impl Report for SilentReport {
    fn info(&mut self, _message: impl Into<String>) {}
    fn warn(&mut self, _message: impl Into<String>) {}
}

/// Records warnings so tests can inspect them.
#[derive(Default)]
pub struct RecordingReport {
    pub warnings: Vec<String>,
}

impl RecordingReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if any recorded warning contains `needle`.
    pub fn warned_about(&self, needle: &str) -> bool {
        self.warnings.iter().any(|w| w.contains(needle))
    }
}

impl Report for RecordingReport {
    fn info(&mut self, _message: impl Into<String>) {}

    fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}
