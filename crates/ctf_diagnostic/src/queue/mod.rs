//! Diagnostic queue for collecting and forwarding diagnostics.
//!
//! Every emitted diagnostic is forwarded to `tracing` at the matching level
//! and kept for later inspection. Debug diagnostics are dropped entirely
//! unless the queue's [`LogConfig`] enables debug output.

use crate::{Diagnostic, LogConfig, Severity};

/// Collects diagnostics emitted by one subsystem.
///
/// # Example
///
/// ```text
/// let mut queue = DiagnosticQueue::new(LogConfig::default());
/// queue.emit(Diagnostic::warning(ErrorCode::E4004).with_message("..."));
/// for diag in queue.flush() { ... }
/// ```
#[derive(Clone, Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    warning_count: usize,
    config: LogConfig,
}

impl DiagnosticQueue {
    /// Create an empty queue.
    pub fn new(config: LogConfig) -> Self {
        DiagnosticQueue {
            diagnostics: Vec::new(),
            error_count: 0,
            warning_count: 0,
            config,
        }
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Record a diagnostic and forward it to `tracing`.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => {
                tracing::error!(code = %diagnostic.code, "{}", diagnostic.message);
                self.error_count += 1;
            }
            Severity::Warning => {
                tracing::warn!(code = %diagnostic.code, "{}", diagnostic.message);
                self.warning_count += 1;
            }
            Severity::Debug => {
                if !self.config.debug {
                    return;
                }
                tracing::debug!(code = %diagnostic.code, "{}", diagnostic.message);
            }
        }
        self.diagnostics.push(diagnostic);
    }

    /// Number of errors emitted.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Number of warnings emitted.
    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Recorded diagnostics in emission order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Take all recorded diagnostics, resetting the counters.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        self.error_count = 0;
        self.warning_count = 0;
        std::mem::take(&mut self.diagnostics)
    }
}

#[cfg(test)]
mod tests;
