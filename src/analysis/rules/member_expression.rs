use crate::analysis::context::{Chapter, Context};
use crate::analysis::diagnostic::DiagnosticCollector;
use crate::analysis::rule::LintRule;
use crate::ast::{Literal, MemberExpression, Node, NodeKind};

/// Largest integer an f64 holds exactly (`Number.MAX_SAFE_INTEGER`)
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

const INDEX_MESSAGE: &str = "Expected non negative integer as array index, got";

/// Validates `object[index]` accesses.
///
/// The checks run in priority order and stop at the first failure, so a member expression
/// produces at most one diagnostic.
pub struct MemberExpressionRule;

impl LintRule for MemberExpressionRule {
    fn id(&self) -> &'static str {
        "member-expression"
    }

    fn description(&self) -> &'static str {
        "Disallows dot access and member access before chapter 3, and checks literal array indices"
    }

    fn node_kind(&self) -> NodeKind {
        NodeKind::MemberExpression
    }

    fn process(
        &self,
        child: &Node,
        _parent: Option<&Node>,
        context: &Context,
        diagnostics: &mut DiagnosticCollector,
    ) {
        let Node::MemberExpression(member) = child else {
            return;
        };

        // computed is false for `a.b`, true for `a[b]`
        if !member.computed {
            self.report(diagnostics, "No dot abbreviations", &member.loc);
        } else if context.chapter < Chapter::Source3 {
            self.report(
                diagnostics,
                "Member access expressions are not allowed",
                &member.loc,
            );
        } else if let Some(got) = invalid_index(member) {
            let loc = member.property.loc().unwrap_or(&member.loc);
            self.report(diagnostics, format!("{INDEX_MESSAGE} {got}."), loc);
        }
    }
}

/// Describes what was found instead of a non negative integer, if the index is a bad constant
fn invalid_index(member: &MemberExpression) -> Option<&'static str> {
    match member.property.as_ref() {
        Node::Identifier(id) if id.name == "undefined" => Some("undefined"),
        Node::Literal(lit) => match lit.as_number() {
            None if lit.value.is_null() => Some("null"),
            None => Some(lit.type_name()),
            Some(n) if !is_safe_integer(n) => Some("float"),
            Some(_) => None,
        },
        Node::UnaryExpression(unary) if unary.operator == "-" => match unary.argument.as_ref() {
            Node::Literal(Literal { value, .. }) if value.is_number() => Some("negative number"),
            _ => None,
        },
        _ => None,
    }
}

fn is_safe_integer(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER
}
