//! `guavahash` - print the bucket for a pre-hashed key.
//!
//! ```text
//! guavahash 1 10           # prints 6
//! guavahash -19 25         # prints 19
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use guavahash::Cli;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the bucket index.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let bucket = cli
        .run()
        .with_context(|| format!("cannot place state {}", cli.state))?;
    debug!(state = cli.state, buckets = cli.buckets, bucket, "selected bucket");
    println!("{bucket}");
    Ok(())
}
