use hydra_core::{abort_invariant, BigUint};
use num_traits::{One, Pow, ToPrimitive, Zero};

/// `tb=17` is the documented sweet spot: one fewer multiplication than
/// `tb=16`, at the cost of one additional addition.
pub const DEFAULT_TB: u32 = 17;

/// Precomputed `floor(i * 3^tb / 2^tb)` for `0 <= i < 2^tb`, truncated to
/// 32 bits, plus `3^tb` itself (used to re-scale the high part of `stored`
/// on every tabled step).
pub struct BasecaseTable {
    table: Vec<u32>,
    tb: u32,
    p3base: BigUint,
}

impl BasecaseTable {
    pub fn new(tb: u32) -> Self {
        let p3base = BigUint::from(3u32).pow(tb);
        let modulus = BigUint::one() << tb;
        let size = 1usize << tb;
        let mut table = Vec::with_capacity(size);
        for i in 0..size as u64 {
            let scaled = (BigUint::from(i) * &p3base) / &modulus;
            let truncated = scaled
                .to_u32()
                .unwrap_or_else(|| abort_invariant("basecase table entry overflowed 32 bits"));
            table.push(truncated);
        }
        BasecaseTable { table, tb, p3base }
    }

    pub fn tb(&self) -> u32 {
        self.tb
    }

    pub fn p3base(&self) -> &BigUint {
        &self.p3base
    }

    pub fn lookup(&self, index: u32) -> u32 {
        self.table[index as usize]
    }
}

impl Default for BasecaseTable {
    fn default() -> Self {
        BasecaseTable::new(DEFAULT_TB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_direct_formula() {
        let t = BasecaseTable::new(6);
        let modulus = BigUint::from(1u32 << 6);
        for i in 0..(1u32 << 6) {
            let expected = (BigUint::from(i) * t.p3base()) / &modulus;
            assert_eq!(BigUint::from(t.lookup(i)), expected);
        }
    }

    #[test]
    fn p3base_is_three_to_the_tb() {
        let t = BasecaseTable::new(5);
        assert_eq!(*t.p3base(), BigUint::from(3u32).pow(5u32));
    }

    #[test]
    fn zero_index_is_always_zero() {
        let t = BasecaseTable::new(8);
        assert_eq!(t.lookup(0), 0);
        assert!(BigUint::zero() == BigUint::zero());
    }
}
