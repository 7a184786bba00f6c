//! Parse options

/// Options controlling a single parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Drop rule states scheduled twice for the same offset
    pub deduplicate: bool,
    /// Dispatch each frontier batch on the rayon thread pool
    pub parallel: bool,
    /// Abort when a promoted frontier holds more rule states than this
    pub max_frontier: Option<usize>,
    /// Maximum number of rule entries at one position without consuming input
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            deduplicate: true,
            parallel: false,
            max_frontier: None,
            max_depth: 512,
        }
    }
}

impl ParseOptions {
    pub fn with_deduplicate(mut self, deduplicate: bool) -> Self {
        self.deduplicate = deduplicate;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_max_frontier(mut self, limit: usize) -> Self {
        self.max_frontier = Some(limit);
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}
