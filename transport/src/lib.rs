//! Point-to-point and collective transport for segment ranks.
//!
//! The real system speaks this protocol over MPI; here each peer process is
//! an OS thread and the wire is a `std::sync::mpsc` rendezvous channel,
//! which gives the same synchronous send/recv semantics the burn algorithm
//! assumes without pulling in an actual network stack. Bignums are still
//! serialized to little-endian 64-bit limbs for the trip across the
//! channel, matching the documented wire format.
//!
//! Also carries the Berger round-robin scheduler (`get_opponent`), which
//! decides which two ranks exchange at a given step of an all-pairs
//! latency sweep; unrelated to the burn algorithm itself but exercised as
//! a standalone property (see `tournament`).

mod channel;
mod tournament;

use hydra_core::BigUint;
use hydra_metrics::Metrics;

pub use channel::{build_chain, ChannelTransport};
pub use tournament::get_opponent;

/// Synchronous point-to-point + collective transport for one rank.
pub trait Transport {
    /// Blocks until the rank to this rank's right (rank - 1) has posted a
    /// matching `recv_left`.
    fn send_left(&mut self, metrics: &mut Metrics, x: &BigUint);
    /// Blocks (probe + receive) until the rank to this rank's left
    /// (rank + 1) sends.
    fn recv_left(&mut self, metrics: &mut Metrics) -> BigUint;
    fn send_right(&mut self, metrics: &mut Metrics, x: &BigUint);
    fn recv_right(&mut self, metrics: &mut Metrics) -> BigUint;

    /// Collective gather of one bignum per rank to `root`. Returns
    /// `Some(buf)` with `buf[r]` the value contributed by rank `r`, on the
    /// root rank only; `None` everywhere else.
    fn gather(&mut self, metrics: &mut Metrics, item: &BigUint, root: u32) -> Option<Vec<BigUint>>;
}
