//! Small bignum helpers shared by the recursive-burn, basecase and
//! signature crates. The heavy lifting (add/mul/shift/mod) is `num-bigint`;
//! this module only adds the handful of block-arithmetic idioms named
//! throughout (mod 2^bits, limb import/export).

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// `2^bits - 1`, used as a mask for `x mod 2^bits`.
pub fn mask(bits: u64) -> BigUint {
    (BigUint::one() << bits) - BigUint::one()
}

/// `x mod 2^bits`, i.e. the low `bits` bits of `x`.
pub fn low_bits(x: &BigUint, bits: u64) -> BigUint {
    x & mask(bits)
}

/// `x >> bits`, i.e. everything above the low `bits` bits.
pub fn high_bits(x: &BigUint, bits: u64) -> BigUint {
    x >> bits
}

/// `2^exp mod modulus`, used by the signature gather to weight a block's
/// residue by its global bit offset without materializing `2^offset`.
pub fn pow2_mod(exp: u64, modulus: &BigUint) -> BigUint {
    let two = BigUint::from(2u32);
    two.modpow(&BigUint::from(exp), modulus)
}

/// Exports `x` as little-endian 64-bit limbs, matching the wire format used
/// throughout.
pub fn export_limbs_le(x: &BigUint) -> Vec<u64> {
    if x.is_zero() {
        return Vec::new();
    }
    x.to_u64_digits()
}

/// Reconstructs a `BigUint` from little-endian 64-bit limbs.
pub fn import_limbs_le(limbs: &[u64]) -> BigUint {
    if limbs.is_empty() {
        return BigUint::zero();
    }
    BigUint::from_slice(
        &limbs
            .iter()
            .flat_map(|limb| [(*limb & 0xFFFF_FFFF) as u32, (*limb >> 32) as u32])
            .collect::<Vec<u32>>(),
    )
}
