//! Runtime configuration of the parser
//!
//! Compile-time configuration is done through cargo features:
//!
//!   - `serde_impls`: implements `serde::Serialize` for the parse outputs
//!     ([`ParseResult`](crate::parse::ParseResult), [`Element`](crate::parse::Element),
//!     [`Dtype`](crate::dtype::Dtype) and [`Shape`](crate::shape::Shape))
//!   - `smallvec_shape`: stores shape dimensions in a `smallvec::SmallVec`
//!     rather than a `Vec`

/// Default limit on the nesting depth of `{...}` groups
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Options governing a single parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum nesting depth of `{...}` groups. The top level is depth 0, so
    /// a limit of 0 skips every group.
    pub max_depth: usize,
}

impl ParseOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    #[must_use]
    pub const fn with_max_depth(self, max_depth: usize) -> Self {
        Self { max_depth }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}
