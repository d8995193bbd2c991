//! Lint diagnostic and result types.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

/// Diagnostic severity. Only `Error` affects validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// A pure text transform that rewrites the full file content.
///
/// Fixes are applied independently, one at a time, to the original
/// text: a fix must stay valid even when unrelated diagnostics exist.
#[derive(Clone)]
pub struct Fix(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl Fix {
    pub fn new(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Apply the fix to the original file content.
    pub fn apply(&self, content: &str) -> String {
        (self.0)(content)
    }
}

impl fmt::Debug for Fix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Fix(..)")
    }
}

/// A single lint finding. Immutable once created.
#[derive(Debug, Clone, Serialize)]
pub struct LintDiagnostic {
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    pub fixable: bool,
    #[serde(skip)]
    pub fix: Option<Fix>,
}

impl LintDiagnostic {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            field: None,
            line: None,
            column: None,
            suggestion: None,
            fixable: false,
            fix: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach a fix and mark the diagnostic fixable.
    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fixable = true;
        self.fix = Some(fix);
        self
    }
}

/// Result of linting one file. `valid` holds iff `errors` is empty.
#[derive(Debug, Clone, Serialize)]
pub struct LintResult {
    pub valid: bool,
    pub errors: Vec<LintDiagnostic>,
    pub warnings: Vec<LintDiagnostic>,
    pub info: Vec<LintDiagnostic>,
}

impl LintResult {
    /// Bucket diagnostics by severity, preserving emission order
    /// within each bucket.
    pub fn from_diagnostics(diagnostics: Vec<LintDiagnostic>) -> Self {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut info = Vec::new();
        for diag in diagnostics {
            match diag.severity {
                Severity::Error => errors.push(diag),
                Severity::Warning => warnings.push(diag),
                Severity::Info => info.push(diag),
            }
        }
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
            info,
        }
    }

    /// All diagnostics in bucket order (errors, warnings, info).
    pub fn iter(&self) -> impl Iterator<Item = &LintDiagnostic> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .chain(self.info.iter())
    }
}

/// Overall status for a badge display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LintStatus {
    Valid,
    Warnings,
    Errors,
}

/// Badge status plus display text (e.g. `"2 errors"`).
#[derive(Debug, Clone, Serialize)]
pub struct StatusSummary {
    pub status: LintStatus,
    pub text: String,
}
