//! Frontier parser
//!
//! Parses a [`Document`](crate::base::Document) against a
//! [`LanguageDefinition`](crate::grammar::LanguageDefinition) by keeping every
//! live derivation at once instead of committing to one.
//!
//! ## Architecture
//!
//! ```text
//! ParseState   → frontier at the current position, pending offsets
//!     ↓
//! Dispatcher   → every continuation of one RuleState, keyed by width
//!     ↓
//! RuleState    → persistent pushdown cursor + ValueStore
//! ```
//!
//! Each synchronization step dispatches the whole frontier, schedules the
//! continuations by consumed width, and promotes the nearest offset. Branches
//! that fail to match simply drop out; the parse fails when none are left
//! before the end of input.

mod dispatch;
mod driver;
mod error;
mod options;
mod parse_state;
mod rule_state;
mod state_set;
pub mod values;

pub use dispatch::{Dispatcher, NextStates};
pub use driver::{ParseResult, Parser, parse, parse_with};
pub use error::ParseError;
pub use options::ParseOptions;
pub use parse_state::ParseState;
pub use rule_state::RuleState;
pub use values::{ValueKey, ValueStore, ValueStoreError, keys};
