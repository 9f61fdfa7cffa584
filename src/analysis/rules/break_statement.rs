use crate::analysis::context::{Chapter, Context};
use crate::analysis::diagnostic::DiagnosticCollector;
use crate::analysis::rule::LintRule;
use crate::ast::{Node, NodeKind};

// Loops only get `break` from chapter 3 onwards
pub struct BreakStatementRule;

impl LintRule for BreakStatementRule {
    fn id(&self) -> &'static str {
        "break-statement"
    }

    fn description(&self) -> &'static str {
        "Disallows break statements before chapter 3"
    }

    fn node_kind(&self) -> NodeKind {
        NodeKind::BreakStatement
    }

    fn process(
        &self,
        child: &Node,
        _parent: Option<&Node>,
        context: &Context,
        diagnostics: &mut DiagnosticCollector,
    ) {
        let Node::BreakStatement(stmt) = child else {
            return;
        };

        if context.chapter < Chapter::Source3 {
            self.report(diagnostics, "Break statements are not allowed", &stmt.loc);
        }
    }
}
