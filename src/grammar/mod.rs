//! Grammar model: symbols, rules and language definitions.
//!
//! A grammar author supplies rules once; the parser explores every derivation
//! the rules allow. This module only describes grammars; it never reads input.
//!
//! - [`Symbol`] - Closed set of symbol kinds (terminal, rule reference, action, one-of)
//! - [`Terminal`] - Matching capability supplied by terminal-definition code
//! - [`Rule`] - Named symbol sequence
//! - [`LanguageDefinition`] - Validated rule map with start rules

mod definition;
mod error;
mod rule;
mod symbol;

pub use definition::{LanguageDefinition, LanguageDefinitionBuilder};
pub use error::GrammarError;
pub use rule::Rule;
pub use symbol::{ActionSymbol, OneOf, Symbol, Terminal};
