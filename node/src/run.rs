use hydra_core::Problem;
use hydra_metrics::TimerClass;
use hydra_segment::SegmentDriver;
use hydra_transport::Transport;

/// One rank's main loop: alternates big steps with the
/// special-exponent print and the (stubbed) checkpoint, clamping every
/// step so it lands exactly on the next such boundary. Every rank must
/// call this in lock-step, since `print_special_2exp` and
/// `segment_burn`'s `send_left`/`recv_left` exchange are collective.
pub fn run_rank<T: Transport>(
    mut driver: SegmentDriver<T>,
    problem: Problem,
    checkpoint_interval: i64,
    rank: u32,
    world_size: u32,
) {
    println!("Rank {rank} of {world_size} processes. Pid {}.", std::process::id());

    driver.metrics.timer_start(TimerClass::Active);

    let total = problem.iterations;
    let l_max = driver.state.block_size[0];

    // The first big step always advances by exactly 2^l_max (clamped in
    // segment_burn), so that is the first exponent at which `iterations`
    // can land on a power of two.
    let mut next_special: u32 = l_max as u32;
    let mut next_checkpoint: i64 = checkpoint_interval;
    let mut iterations: i64 = 0;

    while iterations < total {
        if checkpoint_interval > 0 && iterations == next_checkpoint {
            checkpoint_stub(rank, iterations);
            next_checkpoint += checkpoint_interval;
        }

        if next_special < 63 && iterations == (1i64 << next_special) {
            hydra_signature::print_special_2exp(
                &driver.state,
                &mut driver.transport,
                &mut driver.metrics,
                rank,
                problem.initial,
                next_special,
            );
            next_special += 1;
        }

        let mut limit = if next_special < 63 { 1i64 << next_special } else { total };
        if checkpoint_interval > 0 {
            limit = limit.min(next_checkpoint);
        }
        let step_limit = (limit - iterations).min(total - iterations);

        let done = driver.segment_burn(step_limit);
        iterations += done as i64;
    }

    driver.segment_finalize();
    driver.state.check_invariants();

    hydra_signature::print_special_2exp(
        &driver.state,
        &mut driver.transport,
        &mut driver.metrics,
        rank,
        problem.initial,
        next_special,
    );

    driver.metrics.timer_stop(TimerClass::Active);
    driver.metrics.dump();

    if rank == 0 {
        println!("Done.");
    }
}

/// Checkpoint format is deliberately unspecified: this advances the
/// bookkeeping correctly without persisting anything.
fn checkpoint_stub(rank: u32, iterations: i64) {
    tracing::debug!(rank, iterations, "checkpoint reached (persistence intentionally unimplemented)");
}
