//! Library half of `hydra-node`: the per-rank main loop, split out of the
//! binary so integration tests can drive full scenarios without going
//! through the CLI.

pub mod run;
