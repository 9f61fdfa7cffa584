pub mod context;
pub mod diagnostic;
pub mod external_api;
pub mod rule;
pub mod rule_registry;
pub mod rules;

use std::ffi::{c_char, c_int};

use log::{debug, trace};

use crate::analysis::context::Context;
use crate::analysis::diagnostic::DiagnosticCollector;
use crate::analysis::external_api::LintConfig;
use crate::analysis::rule_registry::{BUILTIN_RULES, RuleRegistry};
use crate::ast::Node;
use crate::{SlangError, ffi_document_call};

/// Lints an ESTree JSON document for the given chapter (1 to 4).
///
/// Returns a JSON array of LSP diagnostics, or a null pointer on failure (see `slang_get_errors`).
/// The input stays owned by the caller, the returned string has to be freed with `slang_free_string`.
#[unsafe(no_mangle)]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe extern "C" fn slang_lint(ast_json: *const c_char, chapter: c_int) -> *mut c_char {
    ffi_document_call(ast_json, chapter, |program, context| {
        let diagnostics = Linter::new().lint(&program, &context).into_lsp();
        serde_json::to_string(&diagnostics).map_err(|err| SlangError::Serialization(err.to_string()))
    })
}

/// Walks a tree and hands every node to the rules registered for its kind.
pub struct Linter<'r> {
    rule_registry: &'r RuleRegistry,
}

impl Linter<'static> {
    /// A linter running the built-in rules
    pub fn new() -> Self {
        Self {
            rule_registry: &BUILTIN_RULES,
        }
    }
}

impl Default for Linter<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> Linter<'r> {
    pub fn with_registry(rule_registry: &'r RuleRegistry) -> Self {
        Self { rule_registry }
    }

    pub fn lint(&self, program: &Node, context: &Context) -> DiagnosticCollector {
        let mut diagnostics = DiagnosticCollector::new();
        self.apply_rules(program, context, &LintConfig::default(), &mut diagnostics);
        diagnostics
    }

    /// Parses `ast_json` and lints it, the result is ready to be published to an editor
    pub fn lint_json(
        &self,
        ast_json: &str,
        context: &Context,
    ) -> Result<Vec<lsp_types::Diagnostic>, SlangError> {
        let program = Node::from_json(ast_json)?;
        Ok(self.lint(&program, context).into_lsp())
    }

    /// Pre-order walk over the tree, rules for a node run before rules for its children.
    ///
    /// Diagnostics end up in the order the walk meets the nodes, and for one node in rule
    /// registration order.
    fn apply_rules(
        &self,
        program: &Node,
        context: &Context,
        config: &LintConfig,
        diagnostics: &mut DiagnosticCollector,
    ) {
        debug!("linting program for {:?}", context.chapter);

        let mut stack: Vec<(&Node, Option<&Node>)> = vec![(program, None)];
        let mut visited = 0usize;

        while let Some((node, parent)) = stack.pop() {
            visited += 1;

            for rule in self.rule_registry.rules_for(node.kind()) {
                if config.is_rule_enabled(rule) {
                    trace!("applying rule '{}' to {:?}", rule.id(), node.kind());
                    rule.process(node, parent, context, diagnostics);
                }
            }

            stack.extend(node.children().into_iter().rev().map(|child| (child, Some(node))));
        }

        debug!(
            "visited {} nodes, {} diagnostics reported",
            visited,
            diagnostics.len()
        );
    }
}
