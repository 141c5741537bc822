use hydra_core::{pow2_mod, BigUint, SegmentState};
use hydra_metrics::Metrics;
use hydra_transport::Transport;
use num_traits::{Pow, Zero};

/// This rank's contribution to the residue mod `modulus`: the sum over
/// this rank's blocks of `(stored[i] mod modulus) * 2^global_offset[i]`,
/// reduced mod `modulus`. The shift is computed with modular
/// exponentiation rather than materializing `2^global_offset[i]`, since
/// offsets run into the billions of bits for large jobs.
pub fn block_contribution(state: &SegmentState, modulus: &BigUint) -> BigUint {
    let mut res = BigUint::zero();
    for i in 0..state.num_blocks() {
        let block_residue = &state.stored[i] % modulus;
        let weight = pow2_mod(state.global_offset[i], modulus);
        res = (res + block_residue * weight) % modulus;
    }
    res
}

/// Gathers this rank's contribution to rank `root` and sums mod `modulus`.
/// Every rank must call this (it is a collective operation); only `root`
/// gets `Some(total)` back.
fn gather_sum<T: Transport>(
    transport: &mut T,
    metrics: &mut Metrics,
    contribution: &BigUint,
    modulus: &BigUint,
    root: u32,
) -> Option<BigUint> {
    let buf = transport.gather(metrics, contribution, root)?;
    let mut total = BigUint::zero();
    for v in buf {
        total = (total + v) % modulus;
    }
    Some(total)
}

/// `print_signature(base, exp)`: gathers each rank's residue
/// mod `base^exp` to rank 0, sums, and prints `≡ r (mod base^exp)` there.
/// Must be called on every rank (it is a collective operation).
pub fn print_signature<T: Transport>(
    state: &SegmentState,
    transport: &mut T,
    metrics: &mut Metrics,
    rank: u32,
    base: u32,
    exp: u32,
) {
    let modulus = BigUint::from(base).pow(exp);
    let contribution = block_contribution(state, &modulus);
    if let Some(total) = gather_sum(transport, metrics, &contribution, &modulus, 0) {
        debug_assert_eq!(rank, 0, "only rank 0 receives the gathered total");
        println!("\u{2261} {total} (mod {base}^{exp})");
    }
}

/// `print_special_2exp(e)`: prints the pair of
/// mod-2^128 / mod-3^128 residues for `H^2^e(x0)`. Must be called on every
/// rank; only rank 0 prints.
pub fn print_special_2exp<T: Transport>(
    state: &SegmentState,
    transport: &mut T,
    metrics: &mut Metrics,
    rank: u32,
    initial: u64,
    e: u32,
) {
    let mod2 = BigUint::from(2u32).pow(128);
    let mod3 = BigUint::from(3u32).pow(128);

    let c2 = block_contribution(state, &mod2);
    let r2 = gather_sum(transport, metrics, &c2, &mod2, 0);

    let c3 = block_contribution(state, &mod3);
    let r3 = gather_sum(transport, metrics, &c3, &mod3, 0);

    if let (Some(r2), Some(r3)) = (r2, r3) {
        debug_assert_eq!(rank, 0, "only rank 0 receives the gathered totals");
        println!("H^2^{e}({initial}) \u{2261} {r2} (mod 2^128) \u{2261} {r3} (mod 3^128)");
    }

    tracing::debug!(rank, e, "printed special exponent signature");
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydra_transport::build_chain;

    #[test]
    fn single_rank_contribution_matches_direct_residue() {
        let mut state = SegmentState::new(vec![4], vec![0]);
        state.stored[0] = BigUint::from(123u32);
        let modulus = BigUint::from(1000u32);
        let got = block_contribution(&state, &modulus);
        assert_eq!(got, BigUint::from(123u32) % &modulus);
    }

    #[test]
    fn two_blocks_weight_by_global_offset() {
        // block 0 at offset 4 (value 3), block 1 at offset 0 (value 5):
        // residue = 3*2^4 + 5 = 53.
        let mut state = SegmentState::new(vec![4, 4], vec![4, 0]);
        state.stored[0] = BigUint::from(3u32);
        state.stored[1] = BigUint::from(5u32);
        let modulus = BigUint::from(1_000_000u32);
        assert_eq!(block_contribution(&state, &modulus), BigUint::from(53u32));
    }

    #[test]
    fn gather_sum_combines_all_ranks_on_root() {
        let transports = build_chain(3);
        let modulus = BigUint::from(97u32);
        let handles: Vec<_> = transports
            .into_iter()
            .enumerate()
            .map(|(r, mut t)| {
                std::thread::spawn(move || {
                    let mut metrics = Metrics::new(r as u32, false);
                    gather_sum(&mut t, &mut metrics, &BigUint::from((r as u32 + 1) * 10), &modulus, 0)
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results[0], Some(BigUint::from(60u32 % 97)));
        assert_eq!(results[1], None);
        assert_eq!(results[2], None);
    }
}
