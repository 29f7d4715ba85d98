//! Interpreter limits.

/// Default nesting limit for pattern paint procedures.
pub const DEFAULT_MAX_PATTERN_DEPTH: usize = 16;

/// Default nesting limit for `[ ]` and `<< >>` literals.
pub const DEFAULT_MAX_LITERAL_DEPTH: usize = 256;

/// Bounds on work done by one interpretation.
///
/// Unbounded by default, except pattern nesting and literal nesting, which
/// would otherwise grow native recursion without limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterOptions {
    /// Stop after this many tokens have been executed
    pub max_operations: Option<usize>,
    /// Maximum number of nested procedure bodies in flight
    pub max_expansion_depth: Option<usize>,
    /// Maximum nesting of `makepattern` paint procedures
    pub max_pattern_depth: usize,
    /// Maximum nesting of array and dictionary literals; deeper content is
    /// skipped up to its matching closer
    pub max_literal_depth: usize,
}

impl Default for InterpreterOptions {
    fn default() -> Self {
        Self {
            max_operations: None,
            max_expansion_depth: None,
            max_pattern_depth: DEFAULT_MAX_PATTERN_DEPTH,
            max_literal_depth: DEFAULT_MAX_LITERAL_DEPTH,
        }
    }
}

impl InterpreterOptions {
    pub fn with_max_operations(mut self, limit: usize) -> Self {
        self.max_operations = Some(limit);
        self
    }

    pub fn with_max_expansion_depth(mut self, limit: usize) -> Self {
        self.max_expansion_depth = Some(limit);
        self
    }

    pub fn with_max_literal_depth(mut self, limit: usize) -> Self {
        self.max_literal_depth = limit;
        self
    }
}
