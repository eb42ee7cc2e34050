//! Test fixtures for contig development.
//!
//! Provides [`Tracked`], an element type that reports every construction,
//! clone, and drop to a shared [`Ledger`], so tests can assert that a
//! container destroys exactly what it created. A ledger can also be given
//! a clone budget, after which cloning panics, to exercise panic paths.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{Ledger, Tracked};
