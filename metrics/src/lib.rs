//! Named timers and counters the burn algorithm hooks into.
//!
//! A timer must be started before it is stopped; double-start or an
//! unmatched stop is a program bug and aborts, matching the reference
//! implementation's `assert(false)` rather than returning a `Result`.

mod classes;
mod dump;

pub use classes::{CounterClass, TimerClass, COUNTER_CLASS_COUNT, TIMER_CLASS_COUNT};

use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug)]
pub struct Interval {
    pub start: f64,
    pub stop: f64,
}

pub struct Metrics {
    totals: [Duration; TIMER_CLASS_COUNT],
    last_start: [Option<Instant>; TIMER_CLASS_COUNT],
    intervals: [Option<Vec<Interval>>; TIMER_CLASS_COUNT],
    first_start: Option<Instant>,
    counters: [u64; COUNTER_CLASS_COUNT],
    rank: u32,
}

impl Metrics {
    /// `initializing`, `waiting_send_left` and `waiting_recv_left` always
    /// record intervals; `waiting_send_right`, `waiting_recv_right` and
    /// `grinding_chain` only do when `full_logs` is set (it's a lot more
    /// data on long runs).
    pub fn new(rank: u32, full_logs: bool) -> Self {
        const NONE_INTERVAL: Option<Vec<Interval>> = None;
        let mut intervals = [NONE_INTERVAL; TIMER_CLASS_COUNT];
        intervals[TimerClass::Initializing.index()] = Some(Vec::new());
        intervals[TimerClass::WaitingSendLeft.index()] = Some(Vec::new());
        intervals[TimerClass::WaitingRecvLeft.index()] = Some(Vec::new());
        if full_logs {
            intervals[TimerClass::WaitingSendRight.index()] = Some(Vec::new());
            intervals[TimerClass::WaitingRecvRight.index()] = Some(Vec::new());
            intervals[TimerClass::GrindingChain.index()] = Some(Vec::new());
        }
        Metrics {
            totals: [Duration::ZERO; TIMER_CLASS_COUNT],
            last_start: [None; TIMER_CLASS_COUNT],
            intervals,
            first_start: None,
            counters: [0; COUNTER_CLASS_COUNT],
            rank,
        }
    }

    pub fn timer_start(&mut self, class: TimerClass) {
        let i = class.index();
        if self.last_start[i].is_some() {
            hydra_core::abort_invariant(&format!("timer '{}' was started twice", class.name()));
        }
        let now = Instant::now();
        self.first_start.get_or_insert(now);
        self.last_start[i] = Some(now);
        tracing::trace!(class = class.name(), rank = self.rank, "timer start");
    }

    pub fn timer_stop(&mut self, class: TimerClass) {
        let i = class.index();
        let Some(start) = self.last_start[i].take() else {
            hydra_core::abort_invariant(&format!("timer '{}' was stopped twice", class.name()));
        };
        let stop = Instant::now();
        if stop < start {
            tracing::warn!(class = class.name(), "experienced time travel");
        } else {
            self.totals[i] += stop - start;
        }
        if let Some(buf) = &mut self.intervals[i] {
            let first = self.first_start.expect("first_start set by timer_start");
            buf.push(Interval {
                start: (start - first).as_secs_f64(),
                stop: (stop.max(start) - first).as_secs_f64(),
            });
        }
        tracing::trace!(class = class.name(), rank = self.rank, "timer stop");
    }

    /// Runs `f` between a start/stop pair for `class`.
    pub fn timed<T>(&mut self, class: TimerClass, f: impl FnOnce() -> T) -> T {
        self.timer_start(class);
        let result = f();
        self.timer_stop(class);
        result
    }

    pub fn counter_inc(&mut self, class: CounterClass) {
        self.counters[class.index()] += 1;
    }

    pub fn counter(&self, class: CounterClass) -> u64 {
        self.counters[class.index()]
    }

    pub fn total(&self, class: TimerClass) -> Duration {
        self.totals[class.index()]
    }

    pub fn rank(&self) -> u32 {
        self.rank
    }

    /// Prints the human-readable table and, if any interval recording was
    /// enabled, writes `rank{R}.json`.
    pub fn dump(&self) {
        dump::dump(self);
    }
}
