//! CLI entrypoint and thread orchestration for `burn-hydra`. Each peer
//! process is one OS thread here; this binary owns only the glue of
//! parsing the CLI, building the segment shape, spawning one thread per
//! rank, and joining them. All of the interesting behavior lives in the
//! library crates.

use anyhow::Context;
use clap::Parser;
use hydra_config::{parse_config, validate_invariants, Cli};
use hydra_core::Problem;
use hydra_transport::build_chain;
use std::thread;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.validate().map_err(|e| anyhow::anyhow!(e))?;

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(level))
        .init();

    let mut shape = parse_config(&cli.config).context("failed to parse --config")?;
    shape.prune_bits = cli.prune;
    shape.checkpoint_interval = cli.checkpoint_interval;

    validate_invariants(&shape, cli.ranks, cli.iterations).map_err(|e| anyhow::anyhow!("{e}"))?;

    let problem = Problem { initial: cli.x, iterations: cli.iterations };
    let transports = build_chain(cli.ranks);
    let world_size = cli.ranks;
    let full_logs = cli.verbose;

    let handles: Vec<_> = transports
        .into_iter()
        .enumerate()
        .map(|(r, transport)| {
            let shape = shape.clone();
            let rank = r as u32;
            thread::spawn(move || -> anyhow::Result<()> {
                let driver = hydra_segment::segment_init(
                    &problem,
                    &shape,
                    rank,
                    world_size,
                    transport,
                    full_logs,
                    hydra_basecase::DEFAULT_TB,
                )?;
                hydra_node::run::run_rank(driver, problem, shape.checkpoint_interval, rank, world_size);
                Ok(())
            })
        })
        .collect();

    for handle in handles {
        handle
            .join()
            .map_err(|_| anyhow::anyhow!("a rank thread panicked"))??;
    }

    Ok(())
}
