use crate::BasecaseTable;
use hydra_core::{high_bits, low_bits, BigUint};
use num_traits::ToPrimitive;

/// The rightmost block of rank 0, advanced by `2^e` H-iterations with
/// table acceleration. `add` is the undercarry from the
/// (nonexistent) block to the right, i.e. always zero in practice since
/// this is the very last block in the whole integer; kept as a parameter
/// for symmetry with `recursive_burn`'s calling convention and so the
/// carry-idempotence property can be tested directly.
///
/// Mutates `stored` in place and returns the overcarry destined for the
/// block to this one's left.
pub fn basecase_burn(table: &BasecaseTable, stored: &mut BigUint, add: &BigUint, e: u64, l: u64) -> BigUint {
    let t = 1u64 << e;
    let bits = table.tb() as u64;

    let mut i = 0u64;
    while i + bits <= t {
        let index = low_bits(stored, bits)
            .to_u32()
            .expect("index is bounded by 2^tb <= 2^32");
        let high = high_bits(stored, bits);
        *stored = high * table.p3base() + BigUint::from(table.lookup(index));
        i += bits;
    }

    // Tail: one classical H-step per remaining iteration.
    for _ in i..t {
        let half = &*stored >> 1u32;
        *stored += half;
    }

    *stored += add;

    let shift = 1u64 << l;
    let rop = high_bits(stored, shift);
    *stored = low_bits(stored, shift);
    rop
}

/// Reference implementation: `2^e` individual classical H-steps, no table.
/// Used to check the tabled fast path's equivalence.
pub fn basecase_burn_reference(stored: &mut BigUint, add: &BigUint, e: u64, l: u64) -> BigUint {
    let t = 1u64 << e;
    for _ in 0..t {
        let half = &*stored >> 1u32;
        *stored += half;
    }
    *stored += add;
    let shift = 1u64 << l;
    let rop = high_bits(stored, shift);
    *stored = low_bits(stored, shift);
    rop
}
