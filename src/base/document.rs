//! Tokenized input for the frontier parser.
//!
//! A [`Document`] is an ordered list of text tokens (usually one per line)
//! that the parser reads as one contiguous character stream. Terminals see the
//! input through fixed-width windows cut at a [`Position`].

use super::position::Position;

/// Ordered text tokens read as contiguous input.
///
/// Characters are stored pre-split so windows and advances cost
/// O(width) instead of rescanning UTF-8 from the start of a token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    tokens: Vec<Box<[char]>>,
}

impl Document {
    /// Create a document from a sequence of tokens.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tokens: tokens
                .into_iter()
                .map(|token| token.as_ref().chars().collect())
                .collect(),
        }
    }

    /// Create a document with one token per line.
    ///
    /// Line terminators stay attached to their line so that the tokens
    /// concatenate back to `text`.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.split_inclusive('\n'))
    }

    /// Number of tokens, including empty ones.
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Total number of characters across all tokens.
    pub fn char_len(&self) -> usize {
        self.tokens.iter().map(|token| token.len()).sum()
    }

    /// Returns true if the document holds no characters at all.
    pub fn is_empty(&self) -> bool {
        self.tokens.iter().all(|token| token.is_empty())
    }

    /// The position of the first character.
    ///
    /// Leading empty tokens are skipped; an empty document starts at its end.
    pub fn start(&self) -> Position {
        self.advance(Position::default(), 0)
    }

    /// The position just past the last character.
    pub fn end(&self) -> Position {
        Position::new(self.tokens.len(), 0)
    }

    /// Check if no characters remain at `position`.
    pub fn is_at_end(&self, position: Position) -> bool {
        position.token >= self.tokens.len()
    }

    /// Move `count` characters forward from `position`.
    ///
    /// The result never rests on the end of a token: it is moved to the first
    /// character of the next non-empty token, or clamped to [`Document::end`].
    pub fn advance(&self, position: Position, count: usize) -> Position {
        let mut token = position.token;
        let mut column = position.column;
        let mut remaining = count;

        while let Some(chars) = self.tokens.get(token) {
            let available = chars.len().saturating_sub(column);
            if remaining < available {
                return Position::new(token, column + remaining);
            }
            remaining -= available;
            token += 1;
            column = 0;
        }

        self.end()
    }

    /// Read up to `width` characters starting at `position`.
    ///
    /// The window crosses token boundaries and is shorter than `width` only
    /// when the document ends first.
    pub fn window(&self, position: Position, width: usize) -> String {
        let mut window = String::with_capacity(width);
        let mut taken = 0;
        let mut column = position.column;

        for chars in self.tokens.iter().skip(position.token) {
            for &c in chars.iter().skip(column) {
                if taken == width {
                    return window;
                }
                window.push(c);
                taken += 1;
            }
            column = 0;
        }

        window
    }
}
