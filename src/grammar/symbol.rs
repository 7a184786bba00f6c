//! Grammar symbol model.
//!
//! The set of symbol kinds is closed: every rule is a sequence of [`Symbol`]s
//! and the scheduler dispatches on the variant with an exhaustive `match`.

use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;

/// Matching capability supplied by a terminal-definition subsystem.
///
/// A terminal always examines a window of exactly [`Terminal::minimum_width`]
/// characters (shorter only at the end of input) and, when it matches,
/// consumes exactly that many.
pub trait Terminal: fmt::Debug + Send + Sync {
    /// Number of characters examined and consumed on success.
    fn minimum_width(&self) -> usize;

    /// Check whether `window` is accepted by this terminal.
    fn try_match(&self, window: &str) -> bool;
}

/// Alternation over named rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneOf {
    /// Rules tried as independent branches, in declared order.
    pub options: Vec<SmolStr>,
    /// Whether skipping the alternation entirely is a valid branch.
    pub allow_none: bool,
}

impl OneOf {
    pub fn new<I, S>(allow_none: bool, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            allow_none,
        }
    }
}

/// A named semantic hook.
///
/// Actions are reserved for side effects on a rule state's value store. The
/// scheduler does not implement them yet and rejects any action it reaches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSymbol {
    pub name: SmolStr,
}

impl ActionSymbol {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self { name: name.into() }
    }
}

/// A grammar symbol.
#[derive(Debug, Clone)]
pub enum Symbol {
    /// Consumes a fixed-width window of input.
    Terminal(Arc<dyn Terminal>),
    /// Descends into another rule without consuming input.
    RuleReference(SmolStr),
    /// Semantic hook without consumption semantics.
    Action(ActionSymbol),
    /// Alternation over rule names, optionally with an empty branch.
    OneOf(OneOf),
}

impl Symbol {
    pub fn terminal(terminal: impl Terminal + 'static) -> Self {
        Self::Terminal(Arc::new(terminal))
    }

    pub fn rule(name: impl Into<SmolStr>) -> Self {
        Self::RuleReference(name.into())
    }

    pub fn action(name: impl Into<SmolStr>) -> Self {
        Self::Action(ActionSymbol::new(name))
    }

    pub fn one_of<I, S>(allow_none: bool, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Self::OneOf(OneOf::new(allow_none, options))
    }

    /// Short name of the symbol kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Symbol::Terminal(_) => "terminal",
            Symbol::RuleReference(_) => "rule reference",
            Symbol::Action(_) => "action",
            Symbol::OneOf(_) => "one-of",
        }
    }

    /// Names of the rules this symbol can descend into.
    pub fn referenced_rules(&self) -> impl Iterator<Item = &SmolStr> {
        let names: &[SmolStr] = match self {
            Symbol::RuleReference(name) => std::slice::from_ref(name),
            Symbol::OneOf(one_of) => &one_of.options,
            Symbol::Terminal(_) | Symbol::Action(_) => &[],
        };
        names.iter()
    }
}

impl From<OneOf> for Symbol {
    fn from(one_of: OneOf) -> Self {
        Self::OneOf(one_of)
    }
}

impl From<ActionSymbol> for Symbol {
    fn from(action: ActionSymbol) -> Self {
        Self::Action(action)
    }
}
