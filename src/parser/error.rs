//! Error types for parse operations.
//!
//! A parse that simply does not match its input is not an error; it
//! completes with `finished_successfully == false`. The variants here abort
//! the whole parse.

use smol_str::SmolStr;
use thiserror::Error;

use crate::base::Position;
use crate::grammar::GrammarError;

/// Errors that abort a parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The language definition failed validation.
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    /// A rule name could not be resolved while parsing.
    #[error("rule `{name}` is not defined")]
    UnknownRule { name: SmolStr },

    /// An action symbol was reached; actions have no parse semantics yet.
    #[error("action `{action}` in rule `{rule}` is not supported")]
    UnsupportedAction { rule: SmolStr, action: SmolStr },

    /// A rule state with no remaining symbols was dispatched.
    #[error("rule state in `{rule}` has no current symbol")]
    ExhaustedState { rule: SmolStr },

    /// Too many rule entries at one position, usually left recursion.
    #[error("more than {limit} rule entries at one position while descending into `{rule}`")]
    DescentLimit { rule: SmolStr, limit: usize },

    /// The active frontier grew past the configured limit.
    #[error("frontier of {size} rule states at {position} exceeds limit of {limit}")]
    FrontierOverflow {
        size: usize,
        limit: usize,
        position: Position,
    },

    /// The parse was cancelled between synchronization steps.
    #[error("parse cancelled at {position}")]
    Cancelled { position: Position },
}

impl ParseError {
    /// Create an unknown rule error.
    pub fn unknown_rule(name: impl Into<SmolStr>) -> Self {
        Self::UnknownRule { name: name.into() }
    }

    /// Create an unsupported action error.
    pub fn unsupported_action(rule: impl Into<SmolStr>, action: impl Into<SmolStr>) -> Self {
        Self::UnsupportedAction {
            rule: rule.into(),
            action: action.into(),
        }
    }

    /// Check if this error comes from the grammar rather than the input.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::Grammar(_) | Self::UnknownRule { .. } | Self::UnsupportedAction { .. }
        )
    }
}
