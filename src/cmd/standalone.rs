use std::num::NonZeroUsize;

use clap::Parser;

/// Runs the whole pipeline in one process against an in-memory object store.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// URL of the document to count
    pub url: String,
    /// Number of partitions to cut the document into
    #[clap(long, short = 'n', default_value = "3")]
    pub partitions: NonZeroUsize,
    /// Timeout in seconds for the download
    #[clap(long, short = 't', default_value_t = 30)]
    pub timeout: u64,
}
