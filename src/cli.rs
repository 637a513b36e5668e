//! Command-line surface of the `guavahash` binary.

use crate::bucket::BucketCount;
use crate::error::SelectError;
use clap::Parser;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "guavahash")]
#[command(about = "Map a pre-hashed 64-bit key to a bucket with Guava's consistent hash")]
#[command(version)]
pub struct Cli {
    /// Pre-hashed 64-bit key (negative values allowed)
    #[arg(allow_negative_numbers = true)]
    pub state: i64,

    /// Number of buckets (must be at least 1)
    #[arg(allow_negative_numbers = true)]
    pub buckets: i32,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Bucket index for the parsed arguments.
    pub fn run(&self) -> Result<i32, SelectError> {
        let buckets = BucketCount::new(self.buckets)?;
        Ok(buckets.select(self.state))
    }
}
