//! The three pipeline stages.
//!
//! Each stage is a plain struct holding its injected clients and exposing a
//! single async operation from a validated request to a response. Stages keep
//! no state between calls, so any number of calls may run at once; the only
//! thing they share is the object store.
//!
//! Raw request bodies (`*Body`) carry every field as optional and are turned
//! into validated requests with [`TryFrom`], which is where a missing field
//! becomes [`PipelineError::Validation`](crate::PipelineError::Validation).

use futures::future::try_join_all;
use tracing::info;

use crate::Result;

pub mod mapper;
pub mod reducer;
pub mod splitter;

pub use mapper::{MapBody, MapRequest, MapResponse, Mapper};
pub use reducer::{ReduceBody, ReduceRequest, ReduceResponse, Reducer};
pub use splitter::{SplitBody, SplitRequest, SplitResponse, Splitter};

pub(crate) const SUCCESS: &str = "Success";

/// Runs split, map and reduce back to back without going over HTTP.
///
/// Partitions are mapped concurrently. The first failing stage aborts the
/// run and nothing after it is attempted.
pub async fn run_in_process(
    splitter: &Splitter,
    mapper: &Mapper,
    reducer: &Reducer,
    url: &str,
) -> Result<ReduceResponse> {
    let split = splitter
        .split(SplitRequest {
            url: url.to_string(),
        })
        .await?;

    let requests = split
        .files
        .iter()
        .map(|key| {
            MapRequest::try_from(MapBody {
                bucket: Some(split.bucket.clone()),
                key: Some(key.clone()),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let mapped = try_join_all(requests.into_iter().map(|request| mapper.map(request))).await?;
    info!(partitions = mapped.len(), "mapped every partition");

    reducer
        .reduce(ReduceRequest {
            bucket: split.bucket,
            files: mapped.into_iter().map(|m| m.key).collect(),
        })
        .await
}
