//! Concurrent prime sieve - Main Entry Point
//!
//! Prints the first ten primes, one per line. Logs go to stderr and are
//! silent unless `RUST_LOG` asks for them.

use anyhow::Context;
use sieve_rs::{LineSink, Sieve, SieveConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = SieveConfig::default();
    let mut sieve = Sieve::new(config).context("Failed to start sieve")?;

    let stdout = std::io::stdout();
    sieve
        .run(LineSink::new(stdout.lock()))
        .context("Failed to report primes")?;

    // Outstanding stages are abandoned and reclaimed when the process exits.
    let report = sieve.finish()?;
    tracing::debug!("Exiting with {} abandoned stages", report.abandoned);

    Ok(())
}
