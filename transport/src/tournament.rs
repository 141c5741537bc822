/// Berger round-robin scheduler: the rank a given rank is paired with at a
/// given step of an all-pairs tournament (used to schedule the all-pairs
/// latency sweep so every pair of ranks exchanges exactly once per rotation
/// of the wheel). `None` once `step` runs past the schedule (the bye round
/// for even `size`, or the end of the rotation for odd `size`).
///
/// A wheel is built with an odd number of spokes: `size - 1` if `size` is
/// even (the odd spoke out plays a fixed "center" player), `size` if `size`
/// is already odd. Each step rotates the wheel by one and pairs opposite
/// spokes; the center (even case only) plays whichever spoke is left alone.
pub fn get_opponent(rank: u32, size: u32, step: u32) -> Option<u32> {
    let even = size % 2 == 0;
    let base: i64 = if even { size as i64 - 1 } else { size as i64 };

    if step as i64 > size as i64 - 1 || (even && step == size - 1) {
        return None;
    }

    let rank = rank as i64;
    let step = step as i64;

    if rank == base {
        let center_opponent = ((-step).rem_euclid(base)) as u32;
        Some(center_opponent)
    } else {
        let self_location = (rank + step).rem_euclid(base);
        let other_location = (base - rank - step).rem_euclid(base);
        if other_location == self_location {
            // Alone this rotation: plays the center (even) or sits out
            // against itself, a degenerate case only reachable at size 1.
            if even {
                Some(base as u32)
            } else {
                Some(rank as u32)
            }
        } else {
            let other_rank = (-rank - 2 * step).rem_euclid(base) as u32;
            Some(other_rank)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_reference_cases_size_four() {
        assert_eq!(get_opponent(0, 4, 0), Some(3));
        assert_eq!(get_opponent(0, 4, 1), Some(1));
        assert_eq!(get_opponent(0, 4, 2), Some(2));
        assert_eq!(get_opponent(0, 4, 3), None);

        assert_eq!(get_opponent(3, 4, 0), Some(0));
        assert_eq!(get_opponent(3, 4, 1), Some(2));
        assert_eq!(get_opponent(3, 4, 2), Some(1));
        assert_eq!(get_opponent(3, 4, 3), None);

        assert_eq!(get_opponent(1, 4, 0), Some(2));
        assert_eq!(get_opponent(1, 4, 1), Some(0));
        assert_eq!(get_opponent(1, 4, 2), Some(3));
        assert_eq!(get_opponent(1, 4, 3), None);
    }

    #[test]
    fn matches_reference_cases_size_five() {
        assert_eq!(get_opponent(0, 5, 0), Some(0));
        assert_eq!(get_opponent(0, 5, 1), Some(3));
        assert_eq!(get_opponent(0, 5, 2), Some(1));
        assert_eq!(get_opponent(0, 5, 3), Some(4));
        assert_eq!(get_opponent(0, 5, 4), Some(2));
        assert_eq!(get_opponent(0, 5, 5), None);

        assert_eq!(get_opponent(2, 5, 0), Some(3));
        assert_eq!(get_opponent(2, 5, 1), Some(1));
        assert_eq!(get_opponent(2, 5, 2), Some(4));
        assert_eq!(get_opponent(2, 5, 3), Some(2));
        assert_eq!(get_opponent(2, 5, 4), Some(0));
        assert_eq!(get_opponent(2, 5, 5), None);
    }

    /// Property: for any legal `(r, P, s)`, pairing is symmetric
    /// (`get_opponent` is an involution).
    #[test]
    fn is_an_involution_for_legal_steps() {
        for size in 1u32..=9 {
            let last_step = if size % 2 == 0 { size - 1 } else { size };
            for step in 0..last_step {
                for rank in 0..size {
                    if let Some(opp) = get_opponent(rank, size, step) {
                        assert_eq!(
                            get_opponent(opp, size, step),
                            Some(rank),
                            "size={size} step={step} rank={rank} opp={opp} not an involution"
                        );
                    }
                }
            }
        }
    }

    /// Property: across the legal step range, every rank sees every other
    /// rank exactly once (a complete round-robin schedule).
    #[test]
    fn every_opponent_appears_exactly_once() {
        for size in 1u32..=9 {
            let last_step = if size % 2 == 0 { size - 1 } else { size };
            for rank in 0..size {
                let mut seen: Vec<u32> = (0..last_step)
                    .filter_map(|step| get_opponent(rank, size, step))
                    .collect();
                seen.sort_unstable();
                seen.dedup();
                assert_eq!(
                    seen.len() as u32,
                    last_step,
                    "size={size} rank={rank} did not see a distinct opponent every step"
                );
            }
        }
    }
}
