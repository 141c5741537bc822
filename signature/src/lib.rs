//! Per-rank residue computation plus the gather/sum that turns it into a
//! single printable signature.

mod gather;

pub use gather::{block_contribution, print_signature, print_special_2exp};
