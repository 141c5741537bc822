use crate::grammar::SegmentShape;
use hydra_core::{HydraError, HydraResult};

/// The raw block-size list a rank owns, in offset-increasing order (the
/// order it appears in the config string): `list[0]` is the rank's
/// smallest/rightmost block, `list[last]` is its largest/leftmost block.
pub fn list_for_rank(shape: &SegmentShape, rank: u32) -> HydraResult<&[u64]> {
    let funnel_ranks = shape.funnel.len();
    if (rank as usize) < funnel_ranks {
        Ok(&shape.funnel[rank as usize])
    } else if shape.chain.is_empty() {
        Err(HydraError::ConfigInvalid(format!(
            "rank {rank} has no funnel entry and the chain is empty"
        )))
    } else {
        let idx = (rank as usize - funnel_ranks) % shape.chain.len();
        Ok(&shape.chain[idx])
    }
}

/// Computes this rank's `(block_size, global_offset)`, with index 0 the
/// rank's leftmost (largest-offset) block, matching `SegmentState`'s
/// convention. Builds by inserting at the front as sizes are walked in
/// config order, so the last-seen size ends up at index 0.
pub fn build_block_layout(
    shape: &SegmentShape,
    rank: u32,
    world_size: u32,
) -> HydraResult<(Vec<u64>, Vec<u64>)> {
    let mut offset: u64 = 0;
    for r in 0..rank {
        for &size in list_for_rank(shape, r)? {
            offset += 1u64 << size;
        }
    }
    let _ = world_size;

    let list = list_for_rank(shape, rank)?;
    let mut block_size = Vec::with_capacity(list.len());
    let mut global_offset = Vec::with_capacity(list.len());
    for &size in list {
        block_size.insert(0, size);
        global_offset.insert(0, offset);
        offset += 1u64 << size;
    }
    Ok((block_size, global_offset))
}

/// Validates non-decreasing block sizes across the global chain, equal
/// sizes at rank boundaries, and an iteration count that is a multiple of
/// `2^L_max`.
pub fn validate_invariants(shape: &SegmentShape, world_size: u32, iterations: i64) -> HydraResult<()> {
    if world_size == 0 {
        return Err(HydraError::ConfigInvalid("world_size must be positive".into()));
    }
    if (world_size as usize) > shape.funnel.len() && shape.chain.is_empty() {
        return Err(HydraError::ConfigInvalid(
            "more ranks than funnel entries, and chain is empty".into(),
        ));
    }

    let mut previous_last: Option<u64> = None;
    for rank in 0..world_size {
        let list = list_for_rank(shape, rank)?;
        if list.is_empty() {
            return Err(HydraError::ConfigInvalid(format!("rank {rank} owns no blocks")));
        }
        for window in list.windows(2) {
            if window[1] < window[0] {
                return Err(HydraError::ConfigInvalid(format!(
                    "block sizes must be non-decreasing within rank {rank}"
                )));
            }
        }
        if let Some(previous_last) = previous_last {
            if list[0] != previous_last {
                return Err(HydraError::ConfigInvalid(format!(
                    "rank {rank} boundary size {} does not match previous rank's boundary size {previous_last}",
                    list[0]
                )));
            }
        }
        previous_last = list.last().copied();
    }

    if shape.global_block_max == 0 {
        return Err(HydraError::ConfigInvalid("global_block_max must be positive".into()));
    }
    let modulus = 1i64 << shape.global_block_max;
    if iterations % modulus != 0 {
        return Err(HydraError::ConfigInvalid(format!(
            "iterations ({iterations}) must be a multiple of 2^{} ({modulus})",
            shape.global_block_max
        )));
    }

    Ok(())
}
