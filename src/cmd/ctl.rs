use clap::{Parser, Subcommand};

use crate::orchestrator::Endpoints;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Commands,
    /// Base URL of the splitter service
    #[clap(long, default_value = "http://127.0.0.1:8080", env = "MRP_SPLITTER")]
    pub splitter: String,
    /// Base URL of the mapper service
    #[clap(long, default_value = "http://127.0.0.1:8080", env = "MRP_MAPPER")]
    pub mapper: String,
    /// Base URL of the reducer service
    #[clap(long, default_value = "http://127.0.0.1:8080", env = "MRP_REDUCER")]
    pub reducer: String,
    /// Timeout in seconds for each stage call
    #[clap(long, short = 't', default_value_t = 300)]
    pub timeout: u64,
}

impl Args {
    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            splitter: self.splitter.clone(),
            mapper: self.mapper.clone(),
            reducer: self.reducer.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the whole pipeline on one document
    Run {
        /// URL of the document to count
        url: String,
    },
    /// Split a document into partitions
    Split {
        /// URL of the document to split
        url: String,
    },
    /// Count the words of one partition
    Map {
        #[arg(short, long)]
        bucket: String,
        /// Partition key, e.g. split_1.txt
        #[arg(short, long)]
        key: String,
    },
    /// Merge word counts into the final result
    Reduce {
        #[arg(short, long)]
        bucket: String,
        /// Word count keys, e.g. split_1_result.json
        #[arg(required = true)]
        files: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reduce_with_duplicate_files() {
        let args = Args::try_parse_from([
            "mrp-ctl",
            "--reducer",
            "http://reducer:8080",
            "reduce",
            "-b",
            "wc",
            "a_result.json",
            "a_result.json",
        ])
        .unwrap();

        assert_eq!(args.endpoints().reducer, "http://reducer:8080");
        match args.command {
            Commands::Reduce { bucket, files } => {
                assert_eq!(bucket, "wc");
                assert_eq!(files, vec!["a_result.json", "a_result.json"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
