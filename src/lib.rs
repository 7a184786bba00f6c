//! # autosupport-base
//!
//! Core library for grammar-driven editing assistance: a frontier parser that
//! tracks every viable derivation of a document against a grammar.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! parser    → RuleState, ParseState, dispatch, Parser driver
//!   ↓
//! grammar   → Symbols, Rules, LanguageDefinition
//!   ↓
//! base      → Primitives (Position, Document)
//! ```

// ============================================================================
// MODULES (dependency order: base → grammar → parser)
// ============================================================================

/// Foundation types: Position, Document
pub mod base;

/// Grammar model: terminals, rule references, one-of sets, actions
pub mod grammar;

/// Frontier parser over a language definition
pub mod parser;

// Re-export foundation types
pub use base::{Document, Position};

// Re-export the grammar model
pub use grammar::{
    ActionSymbol, GrammarError, LanguageDefinition, LanguageDefinitionBuilder, OneOf, Rule,
    Symbol, Terminal,
};

// Re-export the parser entry points
pub use parser::{
    ParseError, ParseOptions, ParseResult, Parser, RuleState, ValueKey, ValueStore,
    ValueStoreError, parse, parse_with,
};
