//! The rank-0 basecase engine: a table-accelerated scalar H-iterator over
//! the rightmost (smallest) block.

mod burn;
mod table;

pub use burn::{basecase_burn, basecase_burn_reference};
pub use table::{BasecaseTable, DEFAULT_TB};
