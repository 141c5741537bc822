//! Shared types and helpers for the burn-hydra workspace: the problem
//! definition, per-rank segment state, bignum block-arithmetic idioms, and
//! the error/abort boundary.

mod bignum;
mod error;
mod problem;
mod state;

pub use bignum::{export_limbs_le, high_bits, import_limbs_le, low_bits, mask, pow2_mod};
pub use error::{abort_invariant, abort_transport, HydraError, HydraResult};
pub use problem::Problem;
pub use state::SegmentState;

pub use num_bigint::BigUint;
