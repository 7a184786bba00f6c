//! Grammar rules.

use smol_str::SmolStr;

use super::symbol::Symbol;

/// An ordered sequence of symbols under a name.
///
/// Rules point at each other by name only, so self- and mutually-recursive
/// rules need no ownership links. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct Rule {
    name: SmolStr,
    symbols: Vec<Symbol>,
}

impl Rule {
    pub fn new(name: impl Into<SmolStr>, symbols: impl IntoIterator<Item = Symbol>) -> Self {
        Self {
            name: name.into(),
            symbols: symbols.into_iter().collect(),
        }
    }

    pub fn name(&self) -> &SmolStr {
        &self.name
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// The symbol at `index`, or `None` past the end of the rule.
    pub fn symbol(&self, index: usize) -> Option<&Symbol> {
        self.symbols.get(index)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
