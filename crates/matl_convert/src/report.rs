// SPDX-License-Identifier: MIT OR Apache-2.0
//! User-facing report sink.
//!
//! Conversion tells the user about fallbacks and substitutions through a
//! [`ReportSink`]. Sinks are purely observational and cannot fail.

use std::fmt;

/// Report severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Progress information
    Info,
    /// Something was substituted or degraded
    Warning,
    /// A collaborator failed unexpectedly; conversion continued anyway
    Error,
}

impl Severity {
    /// Upper-case name, as shown in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Receiver for `(severity, message)` reports
pub trait ReportSink {
    /// Record one report
    fn report(&mut self, severity: Severity, message: &str);

    /// Record an info report
    fn info(&mut self, message: &str) {
        self.report(Severity::Info, message);
    }

    /// Record a warning report
    fn warning(&mut self, message: &str) {
        self.report(Severity::Warning, message);
    }

    /// Record an error report
    fn error(&mut self, message: &str) {
        self.report(Severity::Error, message);
    }
}

/// Forwards reports to `tracing` at the matching level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn report(&mut self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => tracing::info!("{}", message),
            Severity::Warning => tracing::warn!("{}", message),
            Severity::Error => tracing::error!("{}", message),
        }
    }
}

/// Keeps every report, for callers that present them later
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    /// Reports in arrival order
    pub entries: Vec<(Severity, String)>,
}

impl CollectingSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages reported at the given severity
    pub fn messages(&self, severity: Severity) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(move |(s, _)| *s == severity)
            .map(|(_, m)| m.as_str())
    }

    /// Whether any report has the given severity
    pub fn has(&self, severity: Severity) -> bool {
        self.entries.iter().any(|(s, _)| *s == severity)
    }
}

impl ReportSink for CollectingSink {
    fn report(&mut self, severity: Severity, message: &str) {
        tracing::debug!(%severity, "{}", message);
        self.entries.push((severity, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_sink_filters_by_severity() {
        let mut sink = CollectingSink::new();
        sink.info("one");
        sink.warning("two");
        sink.warning("three");
        assert!(sink.has(Severity::Warning));
        assert!(!sink.has(Severity::Error));
        assert_eq!(sink.messages(Severity::Warning).collect::<Vec<_>>(), ["two", "three"]);
    }

    #[test]
    fn test_severity_order() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert_eq!(Severity::Warning.to_string(), "WARNING");
    }
}
