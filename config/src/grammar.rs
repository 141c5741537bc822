use hydra_core::{HydraError, HydraResult};

/// The block-shape configuration: a funnel prefix (one list of block
/// log-sizes per rank, sizes growing to the left) followed by a chain
/// suffix (a repeating list of equal-sized blocks) that fills any
/// remaining ranks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SegmentShape {
    pub funnel: Vec<Vec<u64>>,
    pub chain: Vec<Vec<u64>>,
    pub prune_bits: bool,
    pub checkpoint_interval: i64,
    pub global_block_max: u64,
}

/// Parses `"SEG(,SEG)*(/SEG(,SEG)*)?"` with `SEG := SIZE(-SIZE)*`, e.g.
/// `"9-27,3-4/5-6"` -> funnel `[[9,27],[3,4]]`, chain `[[5,6]]`.
pub fn parse_config(spec: &str) -> HydraResult<SegmentShape> {
    let mut shape = SegmentShape::default();
    let (funnel_part, chain_part) = match spec.split_once('/') {
        Some((f, c)) => (f, Some(c)),
        None => (spec, None),
    };

    shape.funnel = parse_segment_list(funnel_part, &mut shape.global_block_max)?;
    if let Some(chain_part) = chain_part {
        shape.chain = parse_segment_list(chain_part, &mut shape.global_block_max)?;
    }
    Ok(shape)
}

fn parse_segment_list(part: &str, global_block_max: &mut u64) -> HydraResult<Vec<Vec<u64>>> {
    part.split(',')
        .map(|segment| parse_segment(segment, global_block_max))
        .collect()
}

fn parse_segment(segment: &str, global_block_max: &mut u64) -> HydraResult<Vec<u64>> {
    segment
        .split('-')
        .map(|size| {
            let size: u64 = size
                .trim()
                .parse()
                .map_err(|_| HydraError::ConfigInvalid(format!("not an integer: {size:?}")))?;
            if size > *global_block_max {
                *global_block_max = size;
            }
            Ok(size)
        })
        .collect()
}
