use num_bigint::BigUint;
use num_traits::Zero;

/// Per-rank segment state.
///
/// Block `0` is this rank's leftmost (largest-offset) block; block
/// `len() - 1` is the rightmost. The basecase lookup table lives on the
/// driver that owns rank 0's state, not here, to avoid `hydra-core`
/// depending on `hydra-basecase` (see DESIGN.md).
pub struct SegmentState {
    /// log2 size of each block, index 0 = leftmost.
    pub block_size: Vec<u64>,
    /// Global bit offset of the start of each block.
    pub global_offset: Vec<u64>,
    /// Block contents; `stored[i] < 2^(2^block_size[i])` at quiescence.
    pub stored: Vec<BigUint>,
    /// Per-block scratch, reused across big steps.
    pub tmp: Vec<BigUint>,
    /// Pending leftward overflow awaiting exchange with the left neighbour.
    pub update: BigUint,
    /// `p3[k] = 3^(2^k)` for `k` in `0..=leftmost_block_size`.
    pub p3: Vec<BigUint>,
}

impl SegmentState {
    pub fn new(block_size: Vec<u64>, global_offset: Vec<u64>) -> Self {
        assert_eq!(block_size.len(), global_offset.len());
        let n = block_size.len();
        let max_size = *block_size.first().expect("rank must own at least one block");
        let mut p3 = Vec::with_capacity(max_size as usize + 1);
        let mut r = BigUint::from(3u32);
        for k in 0..=max_size {
            p3.push(r.clone());
            if k < max_size {
                r = &r * &r;
            }
        }
        SegmentState {
            stored: vec![BigUint::zero(); n],
            tmp: vec![BigUint::zero(); n],
            update: BigUint::zero(),
            block_size,
            global_offset,
            p3,
        }
    }

    pub fn num_blocks(&self) -> usize {
        self.block_size.len()
    }

    pub fn rightmost(&self) -> usize {
        self.num_blocks() - 1
    }

    /// Checks the between-big-steps invariants: every block fits its
    /// nominal bound and `update` is zero at quiescence. Debug-only: this
    /// runs on every rank after every big step in tests, but is not on the
    /// hot path in release builds.
    pub fn check_invariants(&self) {
        debug_assert!(self.update.is_zero(), "update must be zero at quiescence");
        for i in 0..self.num_blocks() {
            let bound = num_bigint::BigUint::from(1u32) << (1u64 << self.block_size[i]);
            debug_assert!(
                self.stored[i] < bound,
                "block {i} exceeds its 2^(2^block_size) bound"
            );
        }
        for i in 1..self.global_offset.len() {
            debug_assert!(
                self.global_offset[i] < self.global_offset[i - 1],
                "global_offset must be strictly decreasing (index 0 is this rank's leftmost/largest-offset block)"
            );
        }
    }
}
