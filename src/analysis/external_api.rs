use std::collections::HashSet;

use lsp_types::Range;
use serde::Deserialize;

use crate::analysis::Linter;
use crate::analysis::context::Context;
use crate::analysis::diagnostic::{Diagnostic, DiagnosticCollector, DiagnosticSeverity};
use crate::analysis::rule::LintRule;
use crate::ast::{Node, NodeKind};

/// Host supplied lint settings, usually read from the editor configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LintConfig {
    pub disabled_rules: HashSet<String>,
    pub error_limit: Option<usize>,
}

impl LintConfig {
    pub fn is_rule_enabled(&self, rule: &dyn LintRule) -> bool {
        rule.enabled_by_default() && !self.disabled_rules.contains(rule.id())
    }
}

impl Linter<'_> {
    pub fn lint_with_config(
        &self,
        program: &Node,
        context: &Context,
        config: &LintConfig,
    ) -> DiagnosticCollector {
        let mut diagnostics = DiagnosticCollector::new();
        self.apply_rules(program, context, config, &mut diagnostics);

        if let Some(limit) = config.error_limit {
            let error_count = diagnostics.error_count();
            if error_count > limit {
                diagnostics.add(Diagnostic {
                    message: format!("Too many errors ({}), limit is {}", error_count, limit),
                    range: Range::default(),
                    severity: DiagnosticSeverity::Information,
                    rule_id: "error-limit".to_string(),
                });
            }
        }

        diagnostics
    }

    // Method to get all available rules
    pub fn list_rules(&self) -> Vec<(&'static str, &'static str, DiagnosticSeverity, NodeKind)> {
        self.rule_registry
            .get_all_rules()
            .iter()
            .map(|rule| (rule.id(), rule.description(), rule.severity(), rule.node_kind()))
            .collect()
    }
}
