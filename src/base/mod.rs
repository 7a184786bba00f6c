//! Foundation types for the autosupport parser.
//!
//! This module provides the input side of a parse:
//! - [`Position`] - Token/character positions inside a document
//! - [`Document`] - Tokenized input read as one contiguous character stream
//!
//! This module has NO dependencies on other autosupport modules.

mod document;
mod position;

pub use document::Document;
pub use position::Position;
