use std::collections::HashMap;
use std::sync::LazyLock;

use crate::analysis::rule::LintRule;
use crate::analysis::rules::break_statement::BreakStatementRule;
use crate::analysis::rules::continue_statement::ContinueStatementRule;
use crate::analysis::rules::if_statement::IfStatementRule;
use crate::analysis::rules::member_expression::MemberExpressionRule;
use crate::ast::NodeKind;

/// Rules shipped with the crate, built once on first use
pub static BUILTIN_RULES: LazyLock<RuleRegistry> = LazyLock::new(RuleRegistry::builtin);

#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<Box<dyn LintRule>>,
    by_kind: HashMap<NodeKind, Vec<usize>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            by_kind: HashMap::new(),
        }
    }

    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(BreakStatementRule);
        registry.register(ContinueStatementRule);
        registry.register(IfStatementRule);
        registry.register(MemberExpressionRule);
        registry
    }

    /// Adds a rule, registering the same id twice replaces the earlier rule in place
    pub fn register<R: LintRule + 'static>(&mut self, rule: R) {
        if let Some(index) = self.rules.iter().position(|r| r.id() == rule.id()) {
            let previous_kind = self.rules[index].node_kind();
            let kind = rule.node_kind();
            self.rules[index] = Box::new(rule);

            // a replacement keeps the slot of the rule it replaces among the rules for its kind
            if previous_kind != kind {
                if let Some(indices) = self.by_kind.get_mut(&previous_kind) {
                    indices.retain(|&i| i != index);
                }
                let indices = self.by_kind.entry(kind).or_default();
                let position = indices.partition_point(|&i| i < index);
                indices.insert(position, index);
            }
            return;
        }

        self.by_kind
            .entry(rule.node_kind())
            .or_default()
            .push(self.rules.len());
        self.rules.push(Box::new(rule));
    }

    pub fn get_rule(&self, rule_id: &str) -> Option<&dyn LintRule> {
        self.rules
            .iter()
            .find(|r| r.id() == rule_id)
            .map(|r| r.as_ref())
    }

    /// Rules bound to `kind`, in registration order
    pub fn rules_for(&self, kind: NodeKind) -> impl Iterator<Item = &dyn LintRule> {
        self.by_kind
            .get(&kind)
            .into_iter()
            .flatten()
            .map(|&index| self.rules[index].as_ref() as &dyn LintRule)
    }

    pub fn get_all_rules(&self) -> Vec<&dyn LintRule> {
        self.rules.iter().map(|r| r.as_ref()).collect()
    }
}
