//! Resource bounds applied while decoding untrusted input.

/// Default bound on nested constructed values.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default bound on the size of a single input buffer, 1 MiB.
pub const DEFAULT_MAX_BYTES: usize = 1 << 20;

/// Limits enforced by [`crate::DerReader`].
///
/// Depth counts constructed values entered below the top-level buffer, so it
/// bounds recursion in any decoder built on the reader.  The byte budget is
/// checked once against the whole input, since a reader never touches bytes
/// outside of it.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DecodeLimits {
    max_depth: usize,
    max_bytes: usize,
}

impl DecodeLimits {
    /// Constructs a new instance.
    pub const fn new(max_depth: usize, max_bytes: usize) -> Self {
        Self {
            max_depth,
            max_bytes,
        }
    }

    /// Returns a copy with a different depth bound.
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns a copy with a different byte budget.
    pub const fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Gets the maximum nesting depth.
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Gets the maximum input length.
    pub const fn max_bytes(&self) -> usize {
        self.max_bytes
    }
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH, DEFAULT_MAX_BYTES)
    }
}
