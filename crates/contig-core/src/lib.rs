//! Core types for the contig dynamic array.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! pieces the container crate builds on but that carry no raw memory of
//! their own: the error taxonomy and the growth policies that decide how
//! far an append grows a full buffer.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod growth;

pub use error::ArrayError;
pub use growth::{Doubling, GrowthConfigError, GrowthFn, GrowthPolicy, ScaledGrowth};
