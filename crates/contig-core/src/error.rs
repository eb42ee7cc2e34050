//! Array error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during array operations.
///
/// Every failure an array reports is local and recoverable: the array is
/// left valid (possibly emptied, never half-built) and the caller decides
/// what to do next. Nothing is retried internally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// The allocator could not provide the requested buffer.
    AllocationFailure {
        /// Number of element slots requested.
        requested: usize,
        /// Size of one element in bytes.
        elem_size: usize,
    },
    /// The requested capacity cannot be described as a single allocation
    /// (its byte size would exceed `isize::MAX`).
    CapacityOverflow {
        /// Number of element slots requested.
        requested: usize,
    },
    /// Checked indexed access past the live range.
    OutOfRange {
        /// The rejected index.
        index: usize,
        /// The array length at the time of the access.
        len: usize,
    },
    /// An operation that needs at least one live element ran on an empty array.
    EmptyContainer {
        /// Name of the operation that was attempted.
        operation: &'static str,
    },
    /// A byte-reinterpreting conversion whose source does not split into a
    /// whole number of target elements.
    ByteLengthMismatch {
        /// Byte length of the source range.
        bytes: usize,
        /// Size of one target element in bytes.
        elem_size: usize,
    },
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailure {
                requested,
                elem_size,
            } => {
                write!(
                    f,
                    "allocation failed: requested {requested} slots of {elem_size} bytes"
                )
            }
            Self::CapacityOverflow { requested } => {
                write!(f, "capacity overflow: {requested} slots exceed the maximum layout size")
            }
            Self::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
            Self::EmptyContainer { operation } => {
                write!(f, "{operation} called on an empty array")
            }
            Self::ByteLengthMismatch { bytes, elem_size } => {
                write!(
                    f,
                    "byte length {bytes} is not a whole number of {elem_size}-byte elements"
                )
            }
        }
    }
}

impl Error for ArrayError {}
