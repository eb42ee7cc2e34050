//! Integration test: seeded operation scripts replayed against `Vec`.
//!
//! After every operation the array must hold exactly the model's values,
//! with `len <= capacity`, and with at least the capacity last reserved.

use contig_array::DynArray;
use contig_bench::{apply_to_array, apply_to_model, op_script, Op};

const SEEDS: u64 = 64;
const SCRIPT_LEN: usize = 500;

fn replay(seed: u64) {
    let mut array = DynArray::new();
    let mut model = Vec::new();

    for (step, op) in op_script(seed, SCRIPT_LEN).into_iter().enumerate() {
        let capacity_before = array.capacity();
        apply_to_array(&mut array, op)
            .unwrap_or_else(|err| panic!("seed {seed} step {step}: {op:?} failed: {err}"));
        apply_to_model(&mut model, op);

        assert_eq!(
            array.as_slice(),
            model.as_slice(),
            "seed {seed} step {step}: contents diverged after {op:?}"
        );
        assert!(array.len() <= array.capacity());
        match op {
            Op::Reserve(n) => assert!(array.capacity() >= n),
            Op::Clear | Op::RemoveLast => assert_eq!(array.capacity(), capacity_before),
            _ => {}
        }
    }
}

#[test]
fn scripts_match_vec_model() {
    for seed in 0..SEEDS {
        replay(seed);
    }
}

#[test]
fn copies_match_after_script() {
    let mut array = DynArray::new();
    for op in op_script(0xC0FFEE, SCRIPT_LEN) {
        apply_to_array(&mut array, op).unwrap();
    }
    let copy = array.try_clone().unwrap();
    assert_eq!(copy, array);
    assert_eq!(copy.capacity(), array.len());
}
