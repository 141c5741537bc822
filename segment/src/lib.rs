//! Per-rank segment lifecycle: layout-seeded init, the big-step driver loop,
//! and end-of-run finalization.

mod driver;
mod init;

pub use driver::{nearest2pow, SegmentDriver};
pub use init::segment_init;

#[cfg(test)]
mod tests {
    use super::*;
    use hydra_config::parse_config;
    use hydra_core::Problem;
    use hydra_transport::build_chain;

    #[test]
    fn nearest2pow_matches_known_values() {
        assert_eq!(nearest2pow(0), 0);
        assert_eq!(nearest2pow(1), 1);
        assert_eq!(nearest2pow(4), 4);
        assert_eq!(nearest2pow(5), 4);
        assert_eq!(nearest2pow(1023), 512);
        assert_eq!(nearest2pow(1024), 1024);
    }

    #[test]
    fn single_rank_runs_several_big_steps() {
        // Block capacity is 2^(2^block_size) bits, so "6" (64 bits) would be
        // blown through by 256 H-steps of growth (~150 bits); "10" (1024
        // bits) leaves headroom since this rank is also the top rank and
        // `check_invariants` holds it to its nominal bound.
        let shape = parse_config("10").unwrap();
        let mut transports = build_chain(1);
        let transport = transports.remove(0);
        let problem = Problem { initial: 27, iterations: 1 << 8 };

        let mut driver = segment_init(&problem, &shape, 0, 1, transport, false, 4).unwrap();
        let mut done = 0u64;
        while done < 1 << 8 {
            done += driver.segment_burn((1 << 8) - done as i64);
        }
        driver.segment_finalize();
        driver.state.check_invariants();
    }

    #[test]
    fn two_rank_chain_advances_both_ranks_one_big_step() {
        let shape = parse_config("4/4").unwrap();
        let mut transports = build_chain(2);
        let transport1 = transports.pop().unwrap();
        let transport0 = transports.pop().unwrap();
        let problem = Problem { initial: 5, iterations: 1 << 4 };

        let handle = std::thread::spawn(move || {
            let mut driver1 = segment_init(&problem, &shape, 1, 2, transport1, false, 3).unwrap();
            driver1.segment_burn(1 << 4);
            driver1.segment_finalize();
            driver1.state.check_invariants();
        });

        let mut driver0 = segment_init(&problem, &shape, 0, 2, transport0, false, 3).unwrap();
        driver0.segment_burn(1 << 4);
        driver0.segment_finalize();
        driver0.state.check_invariants();

        handle.join().unwrap();
    }
}
