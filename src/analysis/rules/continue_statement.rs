use crate::analysis::context::{Chapter, Context};
use crate::analysis::diagnostic::DiagnosticCollector;
use crate::analysis::rule::LintRule;
use crate::ast::{Node, NodeKind};

pub struct ContinueStatementRule;

impl LintRule for ContinueStatementRule {
    fn id(&self) -> &'static str {
        "continue-statement"
    }

    fn description(&self) -> &'static str {
        "Disallows continue statements before chapter 3"
    }

    fn node_kind(&self) -> NodeKind {
        NodeKind::ContinueStatement
    }

    fn process(
        &self,
        child: &Node,
        _parent: Option<&Node>,
        context: &Context,
        diagnostics: &mut DiagnosticCollector,
    ) {
        let Node::ContinueStatement(stmt) = child else {
            return;
        };

        if context.chapter < Chapter::Source3 {
            self.report(diagnostics, "Continue statements are not allowed", &stmt.loc);
        }
    }
}
