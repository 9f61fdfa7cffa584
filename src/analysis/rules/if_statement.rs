use crate::analysis::context::{Chapter, Context};
use crate::analysis::diagnostic::DiagnosticCollector;
use crate::analysis::rule::LintRule;
use crate::ast::{Node, NodeKind};

// Checks here are independent, a single if statement can trip all of them
pub struct IfStatementRule;

impl LintRule for IfStatementRule {
    fn id(&self) -> &'static str {
        "if-statement"
    }

    fn description(&self) -> &'static str {
        "Requires an else branch before chapter 3 and braces around both branches"
    }

    fn node_kind(&self) -> NodeKind {
        NodeKind::IfStatement
    }

    fn process(
        &self,
        child: &Node,
        _parent: Option<&Node>,
        context: &Context,
        diagnostics: &mut DiagnosticCollector,
    ) {
        let Node::IfStatement(stmt) = child else {
            return;
        };

        if context.chapter < Chapter::Source3 && stmt.alternate.is_none() {
            let loc = stmt.consequent.loc().unwrap_or(&stmt.loc);
            self.report(diagnostics, r#"Missing "else" in "if-else" statement"#, loc);
        }

        if stmt.consequent.kind() != NodeKind::BlockStatement {
            self.report(diagnostics, "Missing curly braces around if", &stmt.loc);
        }

        if let Some(alternate) = &stmt.alternate {
            if alternate.kind() != NodeKind::BlockStatement {
                self.report(diagnostics, "Missing curly braces around else", &stmt.loc);
            }
        }
    }
}
