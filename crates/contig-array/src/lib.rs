//! Growable contiguous-storage array with value semantics.
//!
//! [`DynArray`] owns one contiguous buffer and reports allocation failure
//! through [`ArrayError`] instead of aborting. This crate is the only one
//! in the workspace that contains `unsafe` code.
//!
//! # Architecture
//!
//! ```text
//! DynArray<T, G>           container layer: element lifecycle, copy/assign,
//! │                        capacity control, access (array.rs, iter.rs, cast.rs)
//! └── RawBuffer<T>         storage layer: allocate, deallocate,
//!                          suggest growth (raw.rs)
//! ```
//!
//! Control flows one way: the container calls down into storage for
//! allocations and growth suggestions; storage never looks at elements.
//!
//! # Example
//!
//! ```
//! use contig_array::{dynarr, ArrayError, DynArray};
//!
//! # fn main() -> Result<(), ArrayError> {
//! let mut a = dynarr![1, 2, 3]?;
//! a.push(4)?;
//! assert_eq!(a.len(), 4);
//! assert_eq!(a.at(3)?, &4);
//!
//! let b = a.try_clone()?;
//! a.clear();
//! assert_eq!(b, [1, 2, 3, 4]);
//! assert!(a.back().is_err());
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod array;
mod cast;
pub mod iter;
mod raw;

// Public re-exports for the primary API surface.
pub use array::DynArray;
pub use contig_core::{ArrayError, Doubling, GrowthFn, GrowthPolicy, ScaledGrowth};
pub use iter::IntoIter;

/// Build a [`DynArray`] from a literal list, or from a value and a count.
///
/// Unlike `vec!`, allocation failure is returned rather than aborting, so
/// the macro evaluates to `Result<DynArray<T>, ArrayError>`.
///
/// ```
/// use contig_array::dynarr;
///
/// let listed = dynarr![1, 2, 3].unwrap();
/// let filled = dynarr![7u8; 4].unwrap();
/// assert_eq!(listed, [1, 2, 3]);
/// assert_eq!(filled, [7, 7, 7, 7]);
/// ```
#[macro_export]
macro_rules! dynarr {
    () => {
        $crate::DynArray::from_list([])
    };
    ($value:expr; $len:expr) => {
        $crate::DynArray::from_elem($len, &$value)
    };
    ($($value:expr),+ $(,)?) => {
        $crate::DynArray::from_list([$($value),+])
    };
}
