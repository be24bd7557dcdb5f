//! lanepi CLI - scalar vs 8-lane Monte Carlo π benchmark
//!
//! Takes no arguments. Results go to stdout, diagnostics to stderr
//! (filter with `RUST_LOG`, default `warn`).

use std::process::ExitCode;

use lanepi::config::BenchConfig;
use lanepi::lanes::capability::LaneBackend;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::info!(
        version = lanepi::VERSION,
        backend = %LaneBackend::compiled(),
        "lanepi starting"
    );

    let config = BenchConfig::default();
    let stdout = std::io::stdout();
    match lanepi::demo::run(&config, &mut stdout.lock()) {
        Ok(outcome) => {
            tracing::info!(seed = outcome.seed, "benchmark complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
