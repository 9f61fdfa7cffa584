use crate::analysis::context::Context;
use crate::analysis::diagnostic::{DiagnosticCollector, DiagnosticSeverity};
use crate::ast::{Node, NodeKind, SourceLocation};

pub trait LintRule: Send + Sync {
    // Unique identifier for this rule
    fn id(&self) -> &'static str;

    // Short description of what this rule checks
    fn description(&self) -> &'static str;

    // The only node kind this rule is ever handed
    fn node_kind(&self) -> NodeKind;

    // Severity level of violations (error, warning, info)
    fn severity(&self) -> DiagnosticSeverity {
        DiagnosticSeverity::Error
    }

    // Inspect `child` (its parent is `None` for the root) and append any violations to `diagnostics`
    fn process(
        &self,
        child: &Node,
        parent: Option<&Node>,
        context: &Context,
        diagnostics: &mut DiagnosticCollector,
    );

    // Optional: whether this rule is enabled by default
    fn enabled_by_default(&self) -> bool {
        true
    }

    /// Records a violation under this rule's id and severity
    fn report(&self, diagnostics: &mut DiagnosticCollector, message: impl Into<String>, loc: &SourceLocation)
    where
        Self: Sized,
    {
        diagnostics.add_diagnostic(self.id(), message, self.severity(), loc);
    }
}
