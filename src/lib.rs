//! A word-count pipeline split into three stateless stages.
//!
//! The splitter cuts a downloaded document into line ranges, the mapper
//! counts the words of one range, and the reducer merges every partial count
//! into a single ranked result. Stages never call each other: all data goes
//! through an S3-compatible object store, and an orchestrator (see
//! [`orchestrator`]) sequences the HTTP calls.

pub mod cmd;
pub mod error;
pub mod orchestrator;
pub mod server;
pub mod source;
pub mod stage;
pub mod store;
pub mod utils;
pub mod workload;

pub use error::{PipelineError, Result};

/////////////////////////////////////////////////////////////////////////////
// Blob naming shared between stages
/////////////////////////////////////////////////////////////////////////////

/// Number of partitions the splitter produces unless told otherwise.
pub const DEFAULT_PARTITIONS: usize = 3;

/// Key the reducer writes the aggregate to.
pub const FINAL_RESULT_KEY: &str = "final_result.json";

const PARTITION_SUFFIX: &str = ".txt";
const RESULT_SUFFIX: &str = "_result.json";

/// Key of the `index`-th partition. Partitions are numbered from 1.
pub fn partition_key(index: usize) -> String {
    format!("split_{index}{PARTITION_SUFFIX}")
}

/// Key of the word count produced from `partition_key`.
///
/// Returns [`None`] unless the key ends in `.txt`, since there would be no
/// way to tell partitions and results apart otherwise.
pub fn result_key(partition_key: &str) -> Option<String> {
    partition_key
        .strip_suffix(PARTITION_SUFFIX)
        .filter(|stem| !stem.is_empty())
        .map(|stem| format!("{stem}{RESULT_SUFFIX}"))
}
