//! Rule states: pushdown cursors into grammar rules.
//!
//! A [`RuleState`] points at one symbol of one rule and remembers, through a
//! persistent linked list of caller frames, where to resume once that rule is
//! done. Frames are shared between forks and never mutated, so cloning a
//! state is O(1) and a fork can never disturb its siblings.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rustc_hash::FxHasher;
use smol_str::SmolStr;

use crate::grammar::{Rule, Symbol};

use super::values::ValueStore;

/// One rule invocation: the rule, the next symbol to dispatch and the frame
/// to resume afterwards.
///
/// Frames are only built through [`Frame::resume`], which never produces an
/// exhausted frame, so `index < rule.len()` always holds.
struct Frame {
    rule: Arc<Rule>,
    index: usize,
    caller: Option<Arc<Frame>>,
    depth: usize,
    /// Hash of (rule identity, index) over the whole chain.
    chain_hash: u64,
}

impl Frame {
    /// Position a frame at `index`, popping to `caller` if the rule is done.
    fn resume(rule: Arc<Rule>, index: usize, caller: Option<Arc<Frame>>) -> Option<Arc<Frame>> {
        if index >= rule.len() {
            return caller;
        }
        let depth = caller.as_ref().map_or(1, |caller| caller.depth + 1);

        let mut hasher = FxHasher::default();
        (Arc::as_ptr(&rule) as usize).hash(&mut hasher);
        index.hash(&mut hasher);
        caller.as_ref().map(|caller| caller.chain_hash).hash(&mut hasher);

        Some(Arc::new(Frame {
            rule,
            index,
            caller,
            depth,
            chain_hash: hasher.finish(),
        }))
    }

    fn next(&self) -> Option<Arc<Frame>> {
        Self::resume(self.rule.clone(), self.index + 1, self.caller.clone())
    }
}

// Unlink uniquely owned callers one by one so a long chain does not drop
// recursively.
impl Drop for Frame {
    fn drop(&mut self) {
        let mut caller = self.caller.take();
        while let Some(frame) = caller {
            match Arc::try_unwrap(frame) {
                Ok(mut frame) => caller = frame.caller.take(),
                Err(_) => break,
            }
        }
    }
}

/// A cursor into a grammar rule with its return stack and value store.
///
/// A state without frames is the completed sentinel: a start rule was fully
/// reduced and no caller is left to resume.
#[derive(Clone)]
pub struct RuleState {
    frame: Option<Arc<Frame>>,
    values: ValueStore,
}

impl RuleState {
    /// Top-level state at the first symbol of `rule`.
    ///
    /// An empty rule is complete from the start.
    pub fn start(rule: Arc<Rule>) -> Self {
        Self {
            frame: Frame::resume(rule, 0, None),
            values: ValueStore::new(),
        }
    }

    /// The completed sentinel.
    pub fn completed() -> Self {
        Self {
            frame: None,
            values: ValueStore::new(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.frame.is_none()
    }

    /// The rule of the innermost frame.
    pub fn rule(&self) -> Option<&Arc<Rule>> {
        self.frame.as_ref().map(|frame| &frame.rule)
    }

    /// Index of the current symbol within [`RuleState::rule`].
    pub fn symbol_index(&self) -> Option<usize> {
        self.frame.as_ref().map(|frame| frame.index)
    }

    /// The symbol to dispatch next, or `None` for the completed sentinel.
    pub fn current_symbol(&self) -> Option<&Symbol> {
        self.frame
            .as_ref()
            .and_then(|frame| frame.rule.symbol(frame.index))
    }

    /// Number of active rule frames.
    pub fn depth(&self) -> usize {
        self.frame.as_ref().map_or(0, |frame| frame.depth)
    }

    /// The state that resumes when the innermost rule completes.
    pub fn caller(&self) -> Option<RuleState> {
        let caller = self.frame.as_ref()?.caller.clone()?;
        Some(Self {
            frame: Some(caller),
            values: self.values.clone(),
        })
    }

    /// Rule names and symbol indices from the innermost frame outwards.
    pub fn frames(&self) -> impl Iterator<Item = (&SmolStr, usize)> {
        std::iter::successors(self.frame.as_deref(), |frame| frame.caller.as_deref())
            .map(|frame| (frame.rule.name(), frame.index))
    }

    /// Move past the current symbol.
    ///
    /// Exhausted frames are popped to their callers. Returns `None` when no
    /// frame is left, i.e. the derivation is complete.
    pub fn advance(&self) -> Option<RuleState> {
        let next = self.frame.as_ref()?.next()?;
        Some(Self {
            frame: Some(next),
            values: self.values.clone(),
        })
    }

    /// Like [`RuleState::advance`], substituting the completed sentinel.
    ///
    /// The sentinel keeps this state's values.
    pub fn advance_or_complete(&self) -> RuleState {
        Self {
            frame: self.frame.as_ref().and_then(|frame| frame.next()),
            values: self.values.clone(),
        }
    }

    /// Descend into `rule`.
    ///
    /// The new frame's caller is this state already advanced past the
    /// referencing symbol, so completing `rule` resumes at the next symbol.
    /// When the reference was the last symbol, the caller's own caller is
    /// resumed directly.
    pub fn push_frame(&self, rule: Arc<Rule>) -> RuleState {
        let caller = self.frame.as_ref().and_then(|frame| frame.next());
        Self {
            frame: Frame::resume(rule, 0, caller),
            values: self.values.clone(),
        }
    }

    pub fn values(&self) -> &ValueStore {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut ValueStore {
        &mut self.values
    }

    pub fn with_values(mut self, values: ValueStore) -> Self {
        self.values = values;
        self
    }

    /// Hash consistent with [`RuleState::same_position`].
    pub fn position_hash(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.frame
            .as_ref()
            .map(|frame| frame.chain_hash)
            .hash(&mut hasher);
        self.values.identity_hash().hash(&mut hasher);
        hasher.finish()
    }

    /// Check whether two states would behave identically from here on.
    pub fn same_position(&self, other: &RuleState) -> bool {
        let mut left = self.frame.as_ref();
        let mut right = other.frame.as_ref();
        loop {
            match (left, right) {
                (None, None) => break,
                (Some(a), Some(b)) if Arc::ptr_eq(a, b) => break,
                (Some(a), Some(b)) if Arc::ptr_eq(&a.rule, &b.rule) && a.index == b.index => {
                    left = a.caller.as_ref();
                    right = b.caller.as_ref();
                }
                _ => return false,
            }
        }
        self.values.same_contents(&other.values)
    }
}

impl fmt::Debug for RuleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_completed() {
            return f
                .debug_struct("RuleState::Completed")
                .field("values", &self.values)
                .finish();
        }
        let frames: Vec<String> = self
            .frames()
            .map(|(name, index)| format!("{name}@{index}"))
            .collect();
        f.debug_struct("RuleState")
            .field("frames", &frames)
            .field("values", &self.values)
            .finish()
    }
}
