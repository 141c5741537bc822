/// The problem being evolved: apply H = x -> x + floor(x/2) to `initial`,
/// `iterations` times in total.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Problem {
    pub initial: u64,
    pub iterations: i64,
}

impl Default for Problem {
    fn default() -> Self {
        Problem {
            initial: 3,
            iterations: 0,
        }
    }
}
