use clap::Parser;

/// `burn-hydra` computes very long trajectories of `H(x) = x + floor(x/2)`
/// and reports only modular residues, since the trajectory itself is far
/// too large to print.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Block-shape config string: "SEG(,SEG)*(/SEG(,SEG)*)?", SEG := SIZE(-SIZE)*.
    /// Left of '/' assigns one list per rank (the funnel); right of '/'
    /// repeats to fill any remaining ranks (the chain).
    #[arg(short = 'c', long = "config")]
    pub config: String,

    /// Reserved: prune bits that have left the light cone. Currently a
    /// no-op flag.
    #[arg(short = 'p', long = "prune")]
    pub prune: bool,

    /// Total number of H iterations to run; must be a multiple of 2^L_max.
    #[arg(short = 'n', long = "iterations")]
    pub iterations: i64,

    /// Checkpoint every this many iterations; 0 disables checkpointing.
    #[arg(short = 'i', long = "checkpoint-interval", default_value_t = 0)]
    pub checkpoint_interval: i64,

    /// Initial value x0.
    #[arg(short = 'x', long = "x", default_value_t = 3)]
    pub x: u64,

    /// Number of ranks (peer threads) to simulate. Since this workspace
    /// simulates ranks as threads in one process rather than launching
    /// separate MPI processes, it must be told P explicitly.
    #[arg(short = 'r', long = "ranks", default_value_t = 1)]
    pub ranks: u32,

    /// Raise the log level from info to debug.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    pub fn validate(&self) -> Result<(), String> {
        if self.config.trim().is_empty() {
            return Err("config string must not be empty".to_string());
        }
        if self.ranks == 0 {
            return Err("ranks must be at least 1".to_string());
        }
        if self.iterations < 0 {
            return Err("iterations must be non-negative".to_string());
        }
        if self.checkpoint_interval < 0 {
            return Err("checkpoint-interval must be non-negative".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Cli {
        Cli {
            config: "9-27,3-4/5-6".to_string(),
            prune: false,
            iterations: 1 << 27,
            checkpoint_interval: 0,
            x: 3,
            ranks: 4,
            verbose: false,
        }
    }

    #[test]
    fn valid_cli_passes() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn empty_config_is_rejected() {
        let mut cli = base();
        cli.config = "  ".to_string();
        assert!(cli.validate().is_err());
    }

    #[test]
    fn zero_ranks_is_rejected() {
        let mut cli = base();
        cli.ranks = 0;
        assert!(cli.validate().is_err());
    }

    #[test]
    fn parses_long_flags() {
        let cli = Cli::parse_from([
            "burn-hydra",
            "--config",
            "9-27,3-4/5-6",
            "--prune",
            "--iterations",
            "420",
            "--checkpoint-interval",
            "39",
            "--x",
            "5",
            "--ranks",
            "4",
        ]);
        assert_eq!(cli.x, 5);
        assert_eq!(cli.iterations, 420);
        assert!(cli.prune);
        assert_eq!(cli.checkpoint_interval, 39);
        assert_eq!(cli.ranks, 4);
    }
}
