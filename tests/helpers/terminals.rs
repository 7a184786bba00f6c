//! Terminals for tests.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use autosupport::{Symbol, Terminal};

/// Terminal with a fixed answer that records every window it sees.
#[derive(Debug)]
pub struct MockTerminal {
    width: usize,
    should_match: bool,
    calls: AtomicUsize,
    windows: Mutex<Vec<String>>,
}

impl MockTerminal {
    pub fn new(width: usize, should_match: bool) -> Arc<Self> {
        Arc::new(Self {
            width,
            should_match,
            calls: AtomicUsize::new(0),
            windows: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn windows(&self) -> Vec<String> {
        self.windows.lock().unwrap().clone()
    }
}

impl Terminal for MockTerminal {
    fn minimum_width(&self) -> usize {
        self.width
    }

    fn try_match(&self, window: &str) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.windows.lock().unwrap().push(window.to_string());
        self.should_match
    }
}

/// Matches one exact string.
#[derive(Debug)]
pub struct Literal(pub &'static str);

impl Terminal for Literal {
    fn minimum_width(&self) -> usize {
        self.0.chars().count()
    }

    fn try_match(&self, window: &str) -> bool {
        window == self.0
    }
}

/// Matches any single ASCII digit.
#[derive(Debug)]
pub struct Digit;

impl Terminal for Digit {
    fn minimum_width(&self) -> usize {
        1
    }

    fn try_match(&self, window: &str) -> bool {
        window.len() == 1 && window.chars().all(|c| c.is_ascii_digit())
    }
}

/// Matches any single character.
#[derive(Debug)]
pub struct AnyChar;

impl Terminal for AnyChar {
    fn minimum_width(&self) -> usize {
        1
    }

    fn try_match(&self, window: &str) -> bool {
        window.chars().count() == 1
    }
}

/// Zero-width terminal that always matches.
#[derive(Debug)]
pub struct Empty;

impl Terminal for Empty {
    fn minimum_width(&self) -> usize {
        0
    }

    fn try_match(&self, _window: &str) -> bool {
        true
    }
}

pub fn literal(text: &'static str) -> Symbol {
    Symbol::terminal(Literal(text))
}

pub fn mock(terminal: &Arc<MockTerminal>) -> Symbol {
    Symbol::Terminal(terminal.clone())
}
