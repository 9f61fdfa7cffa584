use lsp_types::{NumberOrString, Range};

use crate::ast::{SourceLocation, source_loc_to_range};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Information,
    Hint,
}

impl From<DiagnosticSeverity> for lsp_types::DiagnosticSeverity {
    fn from(severity: DiagnosticSeverity) -> Self {
        match severity {
            DiagnosticSeverity::Error => lsp_types::DiagnosticSeverity::ERROR,
            DiagnosticSeverity::Warning => lsp_types::DiagnosticSeverity::WARNING,
            DiagnosticSeverity::Information => lsp_types::DiagnosticSeverity::INFORMATION,
            DiagnosticSeverity::Hint => lsp_types::DiagnosticSeverity::HINT,
        }
    }
}

/// A rule violation, `range` is already in editor coordinates (0-indexed lines)
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub message: String,
    pub range: Range,
    pub severity: DiagnosticSeverity,
    pub rule_id: String,
}

impl From<Diagnostic> for lsp_types::Diagnostic {
    fn from(diagnostic: Diagnostic) -> Self {
        lsp_types::Diagnostic {
            range: diagnostic.range,
            severity: Some(diagnostic.severity.into()),
            code: Some(NumberOrString::String(diagnostic.rule_id)),
            source: Some("source".to_string()),
            message: diagnostic.message,
            ..Default::default()
        }
    }
}

/// Append-only sink the rules report into, owned by whoever drives the traversal
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self { diagnostics: Vec::new() }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn add_diagnostic(
        &mut self,
        rule_id: &str,
        message: impl Into<String>,
        severity: DiagnosticSeverity,
        loc: &SourceLocation,
    ) {
        self.add(Diagnostic {
            message: message.into(),
            range: source_loc_to_range(loc),
            severity,
            rule_id: rule_id.to_string(),
        });
    }

    pub fn report_error(&mut self, rule_id: &str, message: impl Into<String>, loc: &SourceLocation) {
        self.add_diagnostic(rule_id, message, DiagnosticSeverity::Error, loc);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == DiagnosticSeverity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == DiagnosticSeverity::Error)
            .count()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn into_lsp(self) -> Vec<lsp_types::Diagnostic> {
        self.diagnostics.into_iter().map(Into::into).collect()
    }
}
