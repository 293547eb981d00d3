//! Diagnostics reported back to the host
//!
//! The generator never prints; every user-facing error or warning becomes a
//! [`Diagnostic`] handed to the host's [`DiagnosticSink`]. Positions are
//! optional because some diagnostics concern synthesized values with no
//! source location.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// The affected unit is dropped.
    Error,
    /// The unit is still processed.
    Warning,
    /// Informational.
    Notice,
}

/// A position in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePosition {
    /// Source file path as the host reported it.
    pub file: String,
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
}

impl SourcePosition {
    /// Creates a position.
    pub fn new(file: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// One diagnostic addressed to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity.
    pub severity: Severity,
    /// Position of the offending source, when known.
    pub position: Option<SourcePosition>,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// An error diagnostic.
    pub fn error(position: Option<SourcePosition>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            position,
            message: message.into(),
        }
    }

    /// A warning diagnostic.
    pub fn warning(position: Option<SourcePosition>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            position,
            message: message.into(),
        }
    }

    /// A notice diagnostic.
    pub fn notice(position: Option<SourcePosition>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Notice,
            position,
            message: message.into(),
        }
    }
}

/// Destination for diagnostics, implemented by the host.
pub trait DiagnosticSink {
    /// Reports one diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);
}

/// A sink that collects diagnostics in memory, for tests and batch hosts.
#[derive(Debug, Default)]
pub struct CollectingSink {
    /// Everything reported so far, in order.
    pub diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages of all collected errors.
    pub fn error_messages(&self) -> Vec<&str> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| d.message.as_str())
            .collect()
    }

    /// Messages of all collected warnings.
    pub fn warning_messages(&self) -> Vec<&str> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| d.message.as_str())
            .collect()
    }

    /// Whether any error was collected.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
