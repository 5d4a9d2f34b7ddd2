//! Reader configuration.

/// Default nesting limit for both encodings.
pub const DEFAULT_MAX_DEPTH: usize = 4096;

/// Options shared by the text and binary readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Maximum number of simultaneously open blocks, counting the root.
    /// Deeper input fails with `VdfError::DepthLimitExceeded`.
    pub max_depth: usize,
}

impl ReadOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
