use crate::BurnContext;
use hydra_basecase::basecase_burn;
use hydra_core::{abort_invariant, high_bits, low_bits, BigUint};
use hydra_metrics::{CounterClass, TimerClass};
use hydra_transport::Transport;
use num_traits::Zero;

/// Advances this rank's block `i` by `2^e` H-iterations, consuming the
/// undercarry `add` from the block immediately to the right and returning
/// the overcarry destined for the block immediately to the left. Mutates
/// `ctx.state.stored[i]` (and `tmp[i]`) in place.
///
/// Three cases, closed over `(is_last_block, is_base_rank)`:
/// - not the last block on this rank: funnel the step through the blocks
///   to the right, then run the common tail below;
/// - last block, not rank 0: multiply into the next rank's share, hand it
///   off over the wire, then run the common tail;
/// - last block, rank 0: delegate to the basecase engine, which folds the
///   common tail into itself and returns immediately.
pub fn recursive_burn<T: Transport>(ctx: &mut BurnContext<T>, add: &BigUint, e: u64, i: usize) -> BigUint {
    let l = ctx.state.block_size[i];
    let last = i == ctx.state.rightmost();

    if last {
        if ctx.is_base_rank() {
            let table = ctx
                .basecase_table
                .unwrap_or_else(|| abort_invariant("rank 0 reached its last block without a basecase table"));
            ctx.metrics.timer_stop(TimerClass::GrindingChain);
            ctx.metrics.timer_start(TimerClass::GrindingBasecase);
            let rop = basecase_burn(table, &mut ctx.state.stored[i], add, e, l);
            ctx.metrics.timer_stop(TimerClass::GrindingBasecase);
            ctx.metrics.timer_start(TimerClass::GrindingChain);
            // Case C: basecase_burn already folded in the undercarry and
            // split off the overcarry. The common tail below does not run.
            return rop;
        }

        let t = 1u64 << e;
        ctx.state.stored[i] *= &ctx.state.p3[e as usize];
        ctx.state.tmp[i] = low_bits(&ctx.state.stored[i], t);
        ctx.state.stored[i] = high_bits(&ctx.state.stored[i], t);

        ctx.metrics.timer_stop(TimerClass::GrindingChain);
        let ret = ctx.transport.recv_right(ctx.metrics);
        ctx.transport.send_right(ctx.metrics, &ctx.state.tmp[i]);
        ctx.metrics.counter_inc(CounterClass::MessagesReceivedRight);
        if !ret.is_zero() {
            ctx.metrics.counter_inc(CounterClass::MessagesReceivedRightNonempty);
        }
        ctx.metrics.timer_start(TimerClass::GrindingChain);

        ctx.state.stored[i] += &ret;
    } else {
        let mut x = std::mem::take(&mut ctx.state.stored[i]);
        funnel_until(&mut x, ctx, e, i + 1);
        ctx.state.stored[i] = x;
    }

    ctx.state.stored[i] += add;
    let shift = 1u64 << l;
    let rop = high_bits(&ctx.state.stored[i], shift);
    ctx.state.stored[i] = low_bits(&ctx.state.stored[i], shift);
    rop
}

/// Funnels `x` (the carry-content of the block that called `recursive_burn`)
/// through blocks `i, i+1, ...` until a block whose size equals `e` is
/// reached, at which point `recursive_burn` takes over. `e >= block_size[i]`
/// on entry.
///
/// When `e` is larger than the target block, halve it and apply the
/// halving twice in sequence: each pass splits `x` into a high part (kept
/// in `x`) and a low part (recursed on), then re-inflates `x` by `p3[e-1]`
/// and folds the low part's result back in. Two passes realize
/// `(3/2)^(2^e)` as two nested `(3/2)^(2^(e-1))` applications.
pub fn funnel_until<T: Transport>(x: &mut BigUint, ctx: &mut BurnContext<T>, e: u64, i: usize) {
    let end_size = ctx.state.block_size[i];
    debug_assert!(e >= end_size, "funnel_until called below its target block's size");

    if e == end_size {
        *x *= &ctx.state.p3[e as usize];
        let t = 1u64 << e;
        let low = low_bits(x, t);
        *x = high_bits(x, t);
        let res = recursive_burn(ctx, &low, e, i);
        *x += res;
        return;
    }

    let t = 1u64 << (e - 1);
    for _ in 0..2 {
        let mut low = low_bits(x, t);
        *x = high_bits(x, t);
        funnel_until(&mut low, ctx, e - 1, i);
        *x = &*x * &ctx.state.p3[(e - 1) as usize] + &low;
    }
}
