//! Config string grammar, per-rank block layout, invariant validation, and
//! the CLI surface.

mod cli;
mod grammar;
mod layout;

pub use cli::Cli;
pub use grammar::{parse_config, SegmentShape};
pub use layout::{build_block_layout, list_for_rank, validate_invariants};
