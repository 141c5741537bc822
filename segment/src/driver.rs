use hydra_basecase::BasecaseTable;
use hydra_burn::{recursive_burn, BurnContext};
use hydra_core::{BigUint, SegmentState};
use hydra_metrics::{Metrics, TimerClass};
use hydra_transport::Transport;

/// Largest power of two `<= x`. `x == 0` yields `0`.
pub fn nearest2pow(x: u64) -> u64 {
    if x == 0 {
        return 0;
    }
    1u64 << (63 - x.leading_zeros())
}

/// One rank's driver: owns its segment state, its end of the transport, its
/// metrics, and (on rank 0 only) the basecase table.
pub struct SegmentDriver<T: Transport> {
    pub state: SegmentState,
    pub transport: T,
    pub metrics: Metrics,
    pub basecase_table: Option<BasecaseTable>,
    is_top: bool,
}

impl<T: Transport> SegmentDriver<T> {
    pub fn new(
        state: SegmentState,
        transport: T,
        metrics: Metrics,
        basecase_table: Option<BasecaseTable>,
        is_top: bool,
    ) -> Self {
        SegmentDriver { state, transport, metrics, basecase_table, is_top }
    }

    fn ctx(&mut self) -> BurnContext<'_, T> {
        BurnContext {
            state: &mut self.state,
            transport: &mut self.transport,
            metrics: &mut self.metrics,
            basecase_table: self.basecase_table.as_ref(),
        }
    }

    /// Runs one big step of up to `max_iterations` H-iterations, clamped to
    /// this rank's leftmost block size, and returns the number of
    /// iterations actually completed.
    pub fn segment_burn(&mut self, max_iterations: i64) -> u64 {
        let l_max = self.state.block_size[0];
        let capped = max_iterations.max(0) as u64;
        if capped == 0 {
            return 0;
        }
        // `nearest2pow` rounds down to a power-of-two *value*; `e` is its
        // log2, clamped so the step never splits wider than this rank's
        // biggest block.
        let value = nearest2pow(capped);
        let e = value.trailing_zeros() as u64;
        let e = e.min(l_max);

        let pending = std::mem::take(&mut self.state.update);

        // Paused at the leaf cases (case B/C in recursive_burn).
        self.metrics.timer_start(TimerClass::GrindingChain);
        let mut ctx = self.ctx();
        let output = recursive_burn(&mut ctx, &pending, e, 0);
        self.metrics.timer_stop(TimerClass::GrindingChain);

        let l = self.state.block_size[0];
        if self.is_top {
            self.state.update = output << (1u64 << l);
        } else {
            self.transport.send_left(&mut self.metrics, &output);
            self.state.update = self.transport.recv_left(&mut self.metrics);
        }

        let carry = std::mem::take(&mut self.state.update);
        self.state.stored[0] += &carry;

        1u64 << e
    }

    /// Re-inflates and folds in any `update` left unshipped at the end of
    /// the run: the last big step's overcarry was produced but never had a
    /// following step to hand it off within.
    pub fn segment_finalize(&mut self) {
        let l = self.state.block_size[0];
        let mut carry = std::mem::take(&mut self.state.update);
        if !self.is_top {
            carry <<= 1u64 << l;
        }
        self.state.stored[0] += &carry;
    }
}
