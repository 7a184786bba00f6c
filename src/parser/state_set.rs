//! Insertion-ordered collection of rule states with optional merging.

use rustc_hash::FxHashMap;

use super::rule_state::RuleState;

/// Rule states in insertion order.
///
/// With deduplication on, a state equivalent to one already held (see
/// [`RuleState::same_position`]) is not added again. Candidates are found
/// through [`RuleState::position_hash`], so an insert costs one hash lookup.
#[derive(Debug, Default)]
pub struct StateSet {
    states: Vec<RuleState>,
    index: FxHashMap<u64, Vec<usize>>,
    deduplicate: bool,
}

impl StateSet {
    pub fn new(deduplicate: bool) -> Self {
        Self {
            states: Vec::new(),
            index: FxHashMap::default(),
            deduplicate,
        }
    }

    /// Add `state`. Returns false if an equivalent state was already held.
    pub fn insert(&mut self, state: RuleState) -> bool {
        if self.deduplicate {
            let slots = self.index.entry(state.position_hash()).or_default();
            if slots.iter().any(|&slot| self.states[slot].same_position(&state)) {
                return false;
            }
            slots.push(self.states.len());
        }
        self.states.push(state);
        true
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn as_slice(&self) -> &[RuleState] {
        &self.states
    }

    pub fn clear(&mut self) {
        self.states.clear();
        self.index.clear();
    }

    pub fn into_vec(self) -> Vec<RuleState> {
        self.states
    }
}

impl Extend<RuleState> for StateSet {
    fn extend<I: IntoIterator<Item = RuleState>>(&mut self, states: I) {
        for state in states {
            self.insert(state);
        }
    }
}
