//! Language definitions: named rules plus designated start rules.

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use smol_str::SmolStr;

use super::error::GrammarError;
use super::rule::Rule;
use super::symbol::Symbol;

/// A validated grammar.
///
/// Every start rule and every name referenced by a rule reference or
/// alternation option is guaranteed to exist. The definition is read-only
/// and can be shared by any number of concurrent parses.
#[derive(Debug, Clone)]
pub struct LanguageDefinition {
    start_rules: IndexSet<SmolStr>,
    rules: IndexMap<SmolStr, Arc<Rule>>,
}

impl LanguageDefinition {
    /// Create a builder for a language definition.
    pub fn builder() -> LanguageDefinitionBuilder {
        LanguageDefinitionBuilder::default()
    }

    /// Build and validate a definition from start rule names and rules.
    pub fn new<S, N, R>(start_rules: S, rules: R) -> Result<Self, GrammarError>
    where
        S: IntoIterator<Item = N>,
        N: Into<SmolStr>,
        R: IntoIterator<Item = Rule>,
    {
        let mut builder = Self::builder();
        for name in start_rules {
            builder = builder.start(name);
        }
        builder.rules(rules).build()
    }

    /// Start rule names in declared order.
    pub fn start_rules(&self) -> impl Iterator<Item = &SmolStr> {
        self.start_rules.iter()
    }

    /// Look up a rule by name.
    pub fn rule(&self, name: &str) -> Option<&Arc<Rule>> {
        self.rules.get(name)
    }

    /// All rules in declared order.
    pub fn rules(&self) -> impl Iterator<Item = &Arc<Rule>> {
        self.rules.values()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Check whether any rule contains an action symbol.
    ///
    /// Actions fail the parse when reached; hosts that cannot tolerate that
    /// can reject such grammars up front.
    pub fn contains_actions(&self) -> bool {
        self.rules
            .values()
            .flat_map(|rule| rule.symbols())
            .any(|symbol| matches!(symbol, Symbol::Action(_)))
    }
}

/// Builder for [`LanguageDefinition`].
#[derive(Debug, Default, Clone)]
pub struct LanguageDefinitionBuilder {
    start_rules: Vec<SmolStr>,
    rules: Vec<Rule>,
}

impl LanguageDefinitionBuilder {
    /// Add a start rule name. Repeated names are kept once.
    pub fn start(mut self, name: impl Into<SmolStr>) -> Self {
        self.start_rules.push(name.into());
        self
    }

    /// Add a rule.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Add several rules.
    pub fn rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Collect every configuration problem, in declaration order.
    pub fn validate(&self) -> Vec<GrammarError> {
        let mut errors = Vec::new();

        if self.start_rules.is_empty() {
            errors.push(GrammarError::NoStartRules);
        }

        let mut names = IndexSet::with_capacity(self.rules.len());
        for rule in &self.rules {
            if !names.insert(rule.name().clone()) {
                errors.push(GrammarError::DuplicateRule {
                    name: rule.name().clone(),
                });
            }
        }

        for start in &self.start_rules {
            if !names.contains(start) {
                errors.push(GrammarError::unknown_start(start.clone()));
            }
        }

        for rule in &self.rules {
            for referenced in rule.symbols().iter().flat_map(|symbol| symbol.referenced_rules()) {
                if !names.contains(referenced) {
                    errors.push(GrammarError::unknown_reference(
                        rule.name().clone(),
                        referenced.clone(),
                    ));
                }
            }
        }

        errors
    }

    /// Validate and build the definition, failing on the first problem.
    pub fn build(self) -> Result<LanguageDefinition, GrammarError> {
        if let Some(error) = self.validate().into_iter().next() {
            return Err(error);
        }

        let rules = self
            .rules
            .into_iter()
            .map(|rule| (rule.name().clone(), Arc::new(rule)))
            .collect();

        Ok(LanguageDefinition {
            start_rules: self.start_rules.into_iter().collect(),
            rules,
        })
    }
}
