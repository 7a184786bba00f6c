//! Position tracking for the parse frontier
//!
//! Locates a character inside a tokenized document so the scheduler can
//! report where a parse stopped and the document can cut input windows.

/// A position in a tokenized document (0-indexed)
///
/// `token` indexes the document's token list, `column` counts characters
/// (not bytes) inside that token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub token: usize,
    pub column: usize,
}

impl Position {
    pub fn new(token: usize, column: usize) -> Self {
        Self { token, column }
    }

    /// Check if this position lies before another one
    pub fn is_before(&self, other: Position) -> bool {
        *self < other
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.token, self.column)
    }
}
