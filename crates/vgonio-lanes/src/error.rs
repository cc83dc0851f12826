//! Error types.

use crate::color::FormatError;

/// Errors raised at the runtime boundaries of the crate.
///
/// Most contract violations are caught at compile time (unsupported lane
/// counts, malformed type-level color formats); this type covers the
/// remaining entry points that receive their inputs at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A vector of the given number of lanes can't be represented.
    #[error("Invalid lane count {0}, a vector needs at least one lane")]
    InvalidLength(usize),
    /// The number of elements supplied doesn't match the vector length.
    #[error("Expected {expected} elements, got {actual}")]
    LengthMismatch {
        /// Number of lanes of the target vector.
        expected: usize,
        /// Number of elements supplied.
        actual: usize,
    },
    /// The color format descriptor is malformed.
    #[error("Invalid color format: {0}")]
    InvalidFormat(#[from] FormatError),
}
