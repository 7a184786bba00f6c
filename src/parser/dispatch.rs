//! Symbol dispatch: what a rule state can become at the current position.
//!
//! Dispatching a state inspects its current symbol and returns every state it
//! may continue as, keyed by how many characters that continuation consumed.
//! Descent into rules consumes nothing and is resolved synchronously here;
//! only terminals move a branch forward through the input.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::sync::Arc;

use crate::base::{Document, Position};
use crate::grammar::{ActionSymbol, LanguageDefinition, OneOf, Symbol, Terminal};

use super::error::ParseError;
use super::rule_state::RuleState;

/// Continuations of a dispatch, keyed by consumed width.
///
/// Empty means the branch died. Merging is a multi-map union: states that
/// land on the same offset are appended, never replaced.
#[derive(Debug, Default, Clone)]
pub struct NextStates {
    entries: BTreeMap<usize, Vec<RuleState>>,
}

impl NextStates {
    /// No continuation.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn single(delta: usize, state: RuleState) -> Self {
        let mut next = Self::none();
        next.insert(delta, state);
        next
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of states over all offsets.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn insert(&mut self, delta: usize, state: RuleState) {
        self.entries.entry(delta).or_default().push(state);
    }

    /// Union `other` into `self`, keeping `self`'s states first.
    pub fn merge(&mut self, other: NextStates) {
        for (delta, mut states) in other.entries {
            self.entries.entry(delta).or_default().append(&mut states);
        }
    }

    /// States scheduled at `delta`.
    pub fn at(&self, delta: usize) -> &[RuleState] {
        self.entries.get(&delta).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn deltas(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.keys().copied()
    }
}

impl IntoIterator for NextStates {
    type Item = (usize, Vec<RuleState>);
    type IntoIter = btree_map::IntoIter<usize, Vec<RuleState>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Dispatches rule states at one position of one document.
///
/// Holds only shared references, so a dispatcher can be used from several
/// threads at once.
pub struct Dispatcher<'a> {
    definition: &'a LanguageDefinition,
    document: &'a Document,
    position: Position,
    max_depth: usize,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        definition: &'a LanguageDefinition,
        document: &'a Document,
        position: Position,
        max_depth: usize,
    ) -> Self {
        Self {
            definition,
            document,
            position,
            max_depth,
        }
    }

    /// Every continuation of `state` at this position.
    ///
    /// The completed sentinel continues as itself without consuming input.
    pub fn dispatch(&self, state: &RuleState) -> Result<NextStates, ParseError> {
        self.dispatch_at(state, 0)
    }

    /// `descents` counts rule entries since the last terminal. Nesting that
    /// consumes input between entries is unbounded; only a chain of entries
    /// at one position (left recursion, reference cycles) hits the limit.
    fn dispatch_at(&self, state: &RuleState, descents: usize) -> Result<NextStates, ParseError> {
        if state.is_completed() {
            return Ok(NextStates::single(0, state.clone()));
        }

        let Some(symbol) = state.current_symbol() else {
            return Err(ParseError::ExhaustedState {
                rule: rule_name(state),
            });
        };

        match symbol {
            Symbol::Terminal(terminal) => Ok(self.terminal(state, terminal)),
            Symbol::RuleReference(name) => self.rule_reference(state, name, descents),
            Symbol::Action(action) => Err(self.action(state, action)),
            Symbol::OneOf(one_of) => self.one_of(state, one_of, descents),
        }
    }

    fn terminal(&self, state: &RuleState, terminal: &Arc<dyn Terminal>) -> NextStates {
        let width = terminal.minimum_width();

        // Nothing is left to consume; only zero-width terminals can still match.
        if width > 0 && self.document.is_at_end(self.position) {
            return NextStates::none();
        }

        let window = self.document.window(self.position, width);
        if !terminal.try_match(&window) {
            tracing::trace!(
                "terminal in `{}` rejected {:?} at {}",
                rule_name(state),
                window,
                self.position
            );
            return NextStates::none();
        }

        tracing::trace!(
            "terminal in `{}` matched {:?} at {}",
            rule_name(state),
            window,
            self.position
        );
        NextStates::single(width, state.advance_or_complete())
    }

    fn rule_reference(
        &self,
        state: &RuleState,
        name: &str,
        descents: usize,
    ) -> Result<NextStates, ParseError> {
        let pushed = self.descend(state, name, descents)?;
        self.dispatch_at(&pushed, descents + 1)
    }

    fn action(&self, state: &RuleState, action: &ActionSymbol) -> ParseError {
        tracing::warn!(
            "action `{}` reached in rule `{}`; actions are not supported",
            action.name,
            rule_name(state)
        );
        ParseError::unsupported_action(rule_name(state), action.name.clone())
    }

    fn one_of(
        &self,
        state: &RuleState,
        one_of: &OneOf,
        descents: usize,
    ) -> Result<NextStates, ParseError> {
        let mut branches = Vec::with_capacity(one_of.options.len() + 1);
        for option in &one_of.options {
            branches.push(self.descend(state, option, descents)?);
        }
        if one_of.allow_none {
            branches.push(state.advance_or_complete());
        }

        tracing::trace!(
            "one-of in `{}` forks into {} branches at {}",
            rule_name(state),
            branches.len(),
            self.position
        );

        let mut merged = NextStates::none();
        for branch in &branches {
            merged.merge(self.dispatch_at(branch, descents + 1)?);
        }
        Ok(merged)
    }

    fn descend(
        &self,
        state: &RuleState,
        name: &str,
        descents: usize,
    ) -> Result<RuleState, ParseError> {
        let rule = self
            .definition
            .rule(name)
            .ok_or_else(|| ParseError::unknown_rule(name))?;

        if descents >= self.max_depth {
            return Err(ParseError::DescentLimit {
                rule: rule.name().clone(),
                limit: self.max_depth,
            });
        }
        Ok(state.push_frame(rule.clone()))
    }
}

fn rule_name(state: &RuleState) -> smol_str::SmolStr {
    state
        .rule()
        .map(|rule| rule.name().clone())
        .unwrap_or_default()
}
