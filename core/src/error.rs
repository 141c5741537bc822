use thiserror::Error;

/// Recoverable errors surfaced to the CLI boundary.
///
/// Internal invariant violations and transport failures are deliberately
/// *not* variants here: they are program bugs or unrecoverable peer
/// failures, and are raised as panics rather than threaded through
/// `Result` (see `hydra_core::abort_invariant`).
#[derive(Debug, Error)]
pub enum HydraError {
    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),
}

pub type HydraResult<T> = Result<T, HydraError>;

/// Aborts the process for a violated internal invariant (double-started
/// timer, mismatched gather counts, basecase table overflow, ...): these
/// are bugs, not recoverable runtime errors, so there is no `Result` path.
#[track_caller]
pub fn abort_invariant(what: &str) -> ! {
    panic!("internal invariant violated: {what}");
}

/// Aborts the process for a transport failure (nonzero send/recv result).
#[track_caller]
pub fn abort_transport(what: &str) -> ! {
    panic!("transport error: {what}");
}
