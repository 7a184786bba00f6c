//! Error types for grammar construction.

use smol_str::SmolStr;
use thiserror::Error;

/// Configuration errors in a language definition.
///
/// These are reported when the definition is built, before any input is
/// parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// The definition names no start rule.
    #[error("language definition has no start rules")]
    NoStartRules,

    /// A start rule is not defined.
    #[error("start rule `{name}` is not defined")]
    UnknownStartRule { name: SmolStr },

    /// A rule reference or alternation option names an undefined rule.
    #[error("rule `{rule}` references undefined rule `{referenced}`")]
    UnknownRuleReference { rule: SmolStr, referenced: SmolStr },

    /// Two rules share a name.
    #[error("rule `{name}` is defined more than once")]
    DuplicateRule { name: SmolStr },
}

impl GrammarError {
    /// Create an unknown start rule error.
    pub fn unknown_start(name: impl Into<SmolStr>) -> Self {
        Self::UnknownStartRule { name: name.into() }
    }

    /// Create an unknown rule reference error.
    pub fn unknown_reference(rule: impl Into<SmolStr>, referenced: impl Into<SmolStr>) -> Self {
        Self::UnknownRuleReference {
            rule: rule.into(),
            referenced: referenced.into(),
        }
    }
}
