//! Contig: a growable contiguous-storage array with value semantics.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the contig sub-crates. For most users, adding `contig` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use contig::prelude::*;
//!
//! # fn main() -> Result<(), ArrayError> {
//! let mut scores = DynArray::with_growth(ScaledGrowth::default());
//! for score in [90u32, 72, 85] {
//!     scores.push(score)?;
//! }
//! scores.resize(5, 0)?;
//! assert_eq!(scores, [90, 72, 85, 0, 0]);
//!
//! assert_eq!(scores.remove_last()?, 0);
//! assert!(matches!(scores.at(9), Err(ArrayError::OutOfRange { index: 9, len: 4 })));
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`array`] | `contig-array` | [`DynArray`](array::DynArray), its iterator, and the `dynarr!` macro |
//! | [`types`] | `contig-core` | Errors and growth policies |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// The array container and its iterator (`contig-array`).
pub use contig_array as array;

/// Errors and growth policies (`contig-core`).
///
/// Implement [`types::GrowthPolicy`] to control how far the array grows
/// when an append finds it full.
pub use contig_core as types;

pub use contig_array::dynarr;

/// Common imports for typical contig usage.
///
/// ```rust
/// use contig::prelude::*;
/// ```
pub mod prelude {
    pub use contig_array::{dynarr, DynArray, IntoIter};
    pub use contig_core::{ArrayError, Doubling, GrowthFn, GrowthPolicy, ScaledGrowth};
}
