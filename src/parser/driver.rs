//! Parser driver
//!
//! Runs the synchronization loop: dispatch every rule state in the frontier,
//! schedule the continuations, step to the next offset, and repeat until the
//! input is exhausted or no derivation is left.

use rayon::prelude::*;
use tokio_util::sync::CancellationToken;

use crate::base::{Document, Position};
use crate::grammar::LanguageDefinition;

use super::dispatch::{Dispatcher, NextStates};
use super::error::ParseError;
use super::options::ParseOptions;
use super::parse_state::ParseState;
use super::rule_state::RuleState;
use super::state_set::StateSet;

/// Outcome of a parse
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// No step ran out of derivations before the end of input
    pub finished_successfully: bool,
    /// At least one start rule was fully reduced at the end of input
    pub accepted: bool,
    /// Where the parse stopped
    pub position: Position,
    /// Number of synchronization steps taken
    pub steps: usize,
    /// Rule states still alive where the parse stopped
    pub frontier: Vec<RuleState>,
    /// Completed derivations at the end of input, with their values
    pub completed: Vec<RuleState>,
}

impl ParseResult {
    /// Check if the input is a viable prefix of the language
    pub fn is_ok(&self) -> bool {
        self.finished_successfully
    }

    /// Check if the input is a complete sentence of the language
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Surviving derivations that still expect more input
    pub fn incomplete(&self) -> impl Iterator<Item = &RuleState> {
        self.frontier.iter().filter(|state| !state.is_completed())
    }
}

/// Parse `document` with default options.
pub fn parse(
    definition: &LanguageDefinition,
    document: &Document,
) -> Result<ParseResult, ParseError> {
    Parser::new(definition).parse(document)
}

/// Parse `document` with explicit options and cancellation support.
///
/// Cancellation is checked once per synchronization step.
pub fn parse_with(
    definition: &LanguageDefinition,
    document: &Document,
    options: &ParseOptions,
    cancel: &CancellationToken,
) -> Result<ParseResult, ParseError> {
    Parser::new(definition)
        .with_options(options.clone())
        .parse_cancellable(document, cancel)
}

/// Frontier parser over a shared language definition
///
/// The definition is only read; each call to [`Parser::parse`] owns a fresh
/// [`ParseState`], so one parser can serve many documents and threads.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    definition: &'a LanguageDefinition,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    pub fn new(definition: &'a LanguageDefinition) -> Self {
        Self {
            definition,
            options: ParseOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn parse(&self, document: &Document) -> Result<ParseResult, ParseError> {
        self.run(document, None)
    }

    pub fn parse_cancellable(
        &self,
        document: &Document,
        cancel: &CancellationToken,
    ) -> Result<ParseResult, ParseError> {
        self.run(document, Some(cancel))
    }

    fn run(
        &self,
        document: &Document,
        cancel: Option<&CancellationToken>,
    ) -> Result<ParseResult, ParseError> {
        let mut state = self.initialize(document)?;

        tracing::debug!(
            "parsing {} characters from {} start rules",
            document.char_len(),
            state.frontier().len()
        );

        while !state.is_failed() && !state.is_at_end() {
            if cancel.is_some_and(CancellationToken::is_cancelled) {
                tracing::warn!("parse cancelled at {}", state.position());
                return Err(ParseError::Cancelled {
                    position: state.position(),
                });
            }

            let batch = state.take_frontier();
            self.process(&mut state, batch)?;
            state.step();
            self.check_frontier(&state)?;
        }

        if state.is_at_end() {
            // Settle derivations that can finish without consuming input.
            let batch = state.frontier().to_vec();
            self.process(&mut state, batch)?;
        }

        let result = ParseResult {
            finished_successfully: !state.is_failed(),
            accepted: state.is_at_end() && !state.settled().is_empty(),
            position: state.position(),
            steps: state.steps(),
            frontier: state.frontier().to_vec(),
            completed: state.settled().to_vec(),
        };

        tracing::debug!(
            "parse finished at {} after {} steps: success={}, accepted={}",
            result.position,
            result.steps,
            result.finished_successfully,
            result.accepted
        );

        Ok(result)
    }

    /// One top-level rule state per start rule.
    fn initialize<'d>(&self, document: &'d Document) -> Result<ParseState<'d>, ParseError> {
        let frontier = self
            .definition
            .start_rules()
            .map(|name| {
                self.definition
                    .rule(name)
                    .map(|rule| RuleState::start(rule.clone()))
                    .ok_or_else(|| ParseError::unknown_rule(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ParseState::new(document, frontier, self.options.deduplicate))
    }

    /// Dispatch `batch` at the current position and route the results.
    ///
    /// Continuations that consumed input are scheduled; those that did not
    /// are dispatched again at the same position until none are left.
    fn process(
        &self,
        state: &mut ParseState<'_>,
        mut batch: Vec<RuleState>,
    ) -> Result<(), ParseError> {
        let dispatcher = Dispatcher::new(
            self.definition,
            state.document(),
            state.position(),
            self.options.max_depth,
        );
        // States dispatched at this offset; a repeat would yield nothing new.
        let mut seen = StateSet::new(true);
        seen.extend(batch.iter().cloned());

        while !batch.is_empty() {
            let results = self.dispatch_batch(&dispatcher, &batch)?;
            batch.clear();

            for next in results {
                for (delta, states) in next {
                    if delta > 0 {
                        state.schedule(delta, states);
                        continue;
                    }
                    for rule_state in states {
                        if rule_state.is_completed() {
                            state.settle(rule_state);
                        } else if seen.insert(rule_state.clone()) {
                            batch.push(rule_state);
                        }
                    }
                }
            }
        }

        Ok(())
    }

    fn dispatch_batch(
        &self,
        dispatcher: &Dispatcher<'_>,
        batch: &[RuleState],
    ) -> Result<Vec<NextStates>, ParseError> {
        if self.options.parallel {
            batch
                .par_iter()
                .map(|rule_state| dispatcher.dispatch(rule_state))
                .collect()
        } else {
            batch
                .iter()
                .map(|rule_state| dispatcher.dispatch(rule_state))
                .collect()
        }
    }

    fn check_frontier(&self, state: &ParseState<'_>) -> Result<(), ParseError> {
        let Some(limit) = self.options.max_frontier else {
            return Ok(());
        };
        let size = state.frontier().len();
        if size > limit {
            tracing::warn!(
                "frontier of {} rule states at {} exceeds limit of {}",
                size,
                state.position(),
                limit
            );
            return Err(ParseError::FrontierOverflow {
                size,
                limit,
                position: state.position(),
            });
        }
        Ok(())
    }
}
