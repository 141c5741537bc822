use hydra_basecase::BasecaseTable;
use hydra_core::{BigUint, HydraResult, Problem, SegmentState};
use hydra_config::SegmentShape;
use hydra_metrics::{Metrics, TimerClass};
use hydra_transport::Transport;

use crate::driver::SegmentDriver;

/// Builds this rank's `SegmentDriver`: computes its block layout from the
/// shape, seeds the rightmost block of rank 0 with the problem's initial
/// value, and attaches the basecase table on rank 0 only.
pub fn segment_init<T: Transport>(
    problem: &Problem,
    shape: &SegmentShape,
    rank: u32,
    world_size: u32,
    transport: T,
    full_logs: bool,
    basecase_tb: u32,
) -> HydraResult<SegmentDriver<T>> {
    let mut metrics = Metrics::new(rank, full_logs);
    metrics.timer_start(TimerClass::Initializing);

    let (block_size, global_offset) = hydra_config::build_block_layout(shape, rank, world_size)?;
    let mut state = SegmentState::new(block_size, global_offset);

    let is_base = rank == 0;
    let is_top = rank == world_size - 1;

    if is_base {
        let last = state.rightmost();
        state.stored[last] = BigUint::from(problem.initial);
    }

    let basecase_table = is_base.then(|| BasecaseTable::new(basecase_tb));

    let last = state.rightmost();
    tracing::info!(rank, value = %state.stored[last], "rank init");
    println!("rank {rank} init to {}", state.stored[last]);

    metrics.timer_stop(TimerClass::Initializing);

    Ok(SegmentDriver::new(state, transport, metrics, basecase_table, is_top))
}
