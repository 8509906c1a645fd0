//! Diagnostics for configuration repair and workbook consistency
//!
//! Shape problems in a configuration are repaired rather than rejected, and
//! every repair is reported as a diagnostic. Codes are stable API: the CLI
//! prints them and tests match on them.

use serde::Serialize;
use std::fmt;

/// Diagnostic severity
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Hint,
    Info,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Hint => "hint",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable diagnostic codes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// Baseline list length disagreed with the declared count or valid range
    W001BaselineCountRepaired,
    /// A baseline period count was outside 2..=12
    W002PeriodCountClamped,
    /// Unknown architecture key
    W003UnknownArchitecture,
    /// Non-positive rate override
    W004InvalidRate,
    /// Rate override for a role outside the fixed set
    W005UnknownRole,
    /// Baseline sheet renamed to a valid, unique sheet name
    I001SheetRenamed,
    /// Detailed rollup and simplified estimate disagree
    I002CostModelDivergence,
    /// An evaluated formula disagrees with the engine figure it displays
    E001FormulaMismatch,
}

impl DiagnosticCode {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticCode::W001BaselineCountRepaired => "W001",
            DiagnosticCode::W002PeriodCountClamped => "W002",
            DiagnosticCode::W003UnknownArchitecture => "W003",
            DiagnosticCode::W004InvalidRate => "W004",
            DiagnosticCode::W005UnknownRole => "W005",
            DiagnosticCode::I001SheetRenamed => "I001",
            DiagnosticCode::I002CostModelDivergence => "I002",
            DiagnosticCode::E001FormulaMismatch => "E001",
        }
    }

    /// Severity a code is emitted with
    pub fn default_severity(self) -> Severity {
        match self {
            DiagnosticCode::W001BaselineCountRepaired
            | DiagnosticCode::W002PeriodCountClamped
            | DiagnosticCode::W003UnknownArchitecture
            | DiagnosticCode::W004InvalidRate
            | DiagnosticCode::W005UnknownRole => Severity::Warning,
            DiagnosticCode::I001SheetRenamed | DiagnosticCode::I002CostModelDivergence => {
                Severity::Info
            }
            DiagnosticCode::E001FormulaMismatch => Severity::Error,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single diagnostic message
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub message: String,
    pub notes: Vec<String>,
    pub hints: Vec<String>,
}

impl Diagnostic {
    /// Create a diagnostic with the code's default severity
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: code.default_severity(),
            message: message.into(),
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Sink for diagnostics
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticEmitter for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}
