//! The recursive carry-propagating burn: one rank's contribution to a
//! single big step, walking its own blocks left to right and handing off
//! to its right neighbour (or the basecase engine, on rank 0) when it runs
//! out of blocks.

mod context;
mod recursive;

pub use context::BurnContext;
pub use recursive::{funnel_until, recursive_burn};
