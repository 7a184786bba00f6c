//! Parse state: the position-synchronized scheduler.
//!
//! Holds the active frontier at the current position and every rule state
//! waiting for a later position. Each [`ParseState::step`] promotes the
//! nearest pending offset to become the new frontier.

use std::collections::BTreeMap;

use crate::base::{Document, Position};

use super::rule_state::RuleState;
use super::state_set::StateSet;

/// Scheduler state owned by exactly one parse.
#[derive(Debug)]
pub struct ParseState<'d> {
    document: &'d Document,
    position: Position,
    frontier: Vec<RuleState>,
    /// Rule states keyed by distance (in characters) from `position`.
    scheduled: BTreeMap<usize, StateSet>,
    /// Completed sentinels reached at `position`.
    settled: StateSet,
    deduplicate: bool,
    failed: bool,
    at_end: bool,
    steps: usize,
}

impl<'d> ParseState<'d> {
    /// Start at the first character of `document` with `frontier` active.
    pub fn new(document: &'d Document, frontier: Vec<RuleState>, deduplicate: bool) -> Self {
        let position = document.start();
        Self {
            document,
            position,
            frontier,
            scheduled: BTreeMap::new(),
            settled: StateSet::new(deduplicate),
            deduplicate,
            failed: false,
            at_end: document.is_at_end(position),
            steps: 0,
        }
    }

    pub fn document(&self) -> &'d Document {
        self.document
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// True once a step left the frontier empty before the end of input.
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn is_at_end(&self) -> bool {
        self.at_end
    }

    /// Rule states active at the current position.
    pub fn frontier(&self) -> &[RuleState] {
        &self.frontier
    }

    /// Completed sentinels reached at the current position.
    pub fn settled(&self) -> &[RuleState] {
        self.settled.as_slice()
    }

    /// Number of rule states waiting for a later position.
    pub fn pending(&self) -> usize {
        self.scheduled.values().map(StateSet::len).sum()
    }

    /// Number of synchronization steps taken so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Hand the active frontier to the caller, leaving it empty.
    pub fn take_frontier(&mut self) -> Vec<RuleState> {
        std::mem::take(&mut self.frontier)
    }

    /// Add rule states that become active `delta` characters ahead.
    ///
    /// States are appended to those already waiting at that offset.
    pub fn schedule(&mut self, delta: usize, states: impl IntoIterator<Item = RuleState>) {
        let deduplicate = self.deduplicate;
        self.scheduled
            .entry(delta)
            .or_insert_with(|| StateSet::new(deduplicate))
            .extend(states);
    }

    /// Record a completed sentinel at the current position.
    pub fn settle(&mut self, state: RuleState) {
        self.settled.insert(state);
    }

    /// Advance to the nearest pending offset.
    ///
    /// The current frontier and settled states are discarded. The position
    /// jumps by the smallest scheduled delta and every other pending delta is
    /// rebased, which is the same as single-character steps carrying later
    /// states forward until the position catches up. Offsets past the end of
    /// input all land on the end, so reaching it promotes every pending state.
    pub fn step(&mut self) {
        self.frontier.clear();
        self.settled.clear();
        self.steps += 1;

        if let Some((delta, mut promoted)) = self.scheduled.pop_first() {
            self.position = self.document.advance(self.position, delta);
            let pending = std::mem::take(&mut self.scheduled);
            if self.document.is_at_end(self.position) {
                for (_, states) in pending {
                    promoted.extend(states.into_vec());
                }
            } else {
                self.scheduled = pending
                    .into_iter()
                    .map(|(offset, states)| (offset - delta, states))
                    .collect();
            }
            self.frontier = promoted.into_vec();
        }

        self.at_end = self.document.is_at_end(self.position);
        if self.frontier.is_empty() && !self.at_end {
            self.failed = true;
        }

        tracing::trace!(
            "step {} at {}: {} active, {} pending",
            self.steps,
            self.position,
            self.frontier.len(),
            self.pending()
        );
    }
}
