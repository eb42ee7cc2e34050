//! Seeded workloads and a reference model for the contig array.
//!
//! - [`op_script`]: deterministic random operation sequence via seed
//! - [`apply_to_array`]: replay one operation on a [`DynArray`]
//! - [`apply_to_model`]: replay the same operation on a `Vec` reference model
//!
//! The same scripts drive the criterion benchmarks and the differential
//! tests in `contig-array`.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use contig_array::DynArray;
use contig_core::ArrayError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Upper bound (exclusive) on lengths chosen by `Resize` and `Assign`.
pub const MAX_SCRIPT_LEN: usize = 64;

/// One mutating operation on an array of `u32`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    /// Append a value.
    Push(u32),
    /// Append a default (zero) value.
    PushDefault,
    /// Remove the last element; a no-op when empty.
    RemoveLast,
    /// Resize, filling new slots with `value`.
    Resize {
        /// Target length.
        len: usize,
        /// Fill value for new slots.
        value: u32,
    },
    /// Ensure a total capacity.
    Reserve(usize),
    /// Destroy all elements, keeping capacity.
    Clear,
    /// Replace the contents with `count` copies of `value`.
    Assign {
        /// Number of copies.
        count: usize,
        /// The repeated value.
        value: u32,
    },
}

/// Generate `len` operations from `seed`.
///
/// Appends dominate so arrays keep growing through several reallocations;
/// removals and resizes keep them from growing without bound.
pub fn op_script(seed: u64, len: usize) -> Vec<Op> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| match rng.random_range(0..100u32) {
            0..=54 => Op::Push(rng.random()),
            55..=59 => Op::PushDefault,
            60..=79 => Op::RemoveLast,
            80..=86 => Op::Resize {
                len: rng.random_range(0..MAX_SCRIPT_LEN),
                value: rng.random(),
            },
            87..=92 => Op::Reserve(rng.random_range(0..2 * MAX_SCRIPT_LEN)),
            93..=95 => Op::Clear,
            _ => Op::Assign {
                count: rng.random_range(0..MAX_SCRIPT_LEN),
                value: rng.random(),
            },
        })
        .collect()
}

/// Apply `op` to `array`.
///
/// `RemoveLast` on an empty array is treated as a no-op, matching the model.
pub fn apply_to_array(array: &mut DynArray<u32>, op: Op) -> Result<(), ArrayError> {
    match op {
        Op::Push(value) => array.push(value),
        Op::PushDefault => array.push_default().map(|_| ()),
        Op::RemoveLast => match array.remove_last() {
            Ok(_) | Err(ArrayError::EmptyContainer { .. }) => Ok(()),
            Err(err) => Err(err),
        },
        Op::Resize { len, value } => array.resize(len, value),
        Op::Reserve(capacity) => array.reserve(capacity),
        Op::Clear => {
            array.clear();
            Ok(())
        }
        Op::Assign { count, value } => array.assign(count, &value),
    }
}

/// Apply `op` to the `Vec` reference model.
pub fn apply_to_model(model: &mut Vec<u32>, op: Op) {
    match op {
        Op::Push(value) => model.push(value),
        Op::PushDefault => model.push(0),
        Op::RemoveLast => {
            model.pop();
        }
        Op::Resize { len, value } => model.resize(len, value),
        Op::Reserve(capacity) => model.reserve(capacity.saturating_sub(model.len())),
        Op::Clear => model.clear(),
        Op::Assign { count, value } => {
            model.clear();
            model.resize(count, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripts_are_deterministic() {
        assert_eq!(op_script(7, 200), op_script(7, 200));
        assert_ne!(op_script(7, 200), op_script(8, 200));
    }

    #[test]
    fn script_covers_every_operation() {
        let script = op_script(42, 2_000);
        assert!(script.iter().any(|op| matches!(op, Op::Push(_))));
        assert!(script.iter().any(|op| matches!(op, Op::PushDefault)));
        assert!(script.iter().any(|op| matches!(op, Op::RemoveLast)));
        assert!(script.iter().any(|op| matches!(op, Op::Resize { .. })));
        assert!(script.iter().any(|op| matches!(op, Op::Reserve(_))));
        assert!(script.iter().any(|op| matches!(op, Op::Clear)));
        assert!(script.iter().any(|op| matches!(op, Op::Assign { .. })));
    }

    #[test]
    fn remove_last_on_empty_is_noop_for_both() {
        let mut array = DynArray::new();
        let mut model = Vec::new();
        apply_to_array(&mut array, Op::RemoveLast).unwrap();
        apply_to_model(&mut model, Op::RemoveLast);
        assert!(array.is_empty());
        assert!(model.is_empty());
    }
}
