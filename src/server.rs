//! HTTP surface of the stages.
//!
//! Every stage binary serves exactly one `POST` route. Request bodies are
//! validated once here; any [`PipelineError`] becomes a JSON
//! `{"error": ...}` body with the matching status code.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{extract::rejection::JsonRejection, extract::State, routing::post, Json, Router};
use tracing::{error, info, warn};

use crate::stage::{
    MapBody, MapRequest, MapResponse, Mapper, ReduceBody, ReduceRequest, ReduceResponse, Reducer,
    SplitBody, SplitRequest, SplitResponse, Splitter,
};
use crate::PipelineError;

pub fn splitter_router(splitter: Arc<Splitter>) -> Router {
    Router::new()
        .route("/split", post(split_handler))
        .with_state(splitter)
}

pub fn mapper_router(mapper: Arc<Mapper>) -> Router {
    Router::new().route("/map", post(map_handler)).with_state(mapper)
}

pub fn reducer_router(reducer: Arc<Reducer>) -> Router {
    Router::new()
        .route("/reduce", post(reduce_handler))
        .with_state(reducer)
}

/// Serves `router` on `addr` until Ctrl-C.
pub async fn serve(router: Router, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for ctrl-c: {}", err);
    }
}

async fn split_handler(
    State(splitter): State<Arc<Splitter>>,
    payload: Result<Json<SplitBody>, JsonRejection>,
) -> Result<Json<SplitResponse>, PipelineError> {
    let request = validate::<SplitBody, SplitRequest>("split", payload)?;
    splitter
        .split(request)
        .await
        .map(Json)
        .inspect_err(|err| report("split", err))
}

async fn map_handler(
    State(mapper): State<Arc<Mapper>>,
    payload: Result<Json<MapBody>, JsonRejection>,
) -> Result<Json<MapResponse>, PipelineError> {
    let request = validate::<MapBody, MapRequest>("map", payload)?;
    mapper
        .map(request)
        .await
        .map(Json)
        .inspect_err(|err| report("map", err))
}

async fn reduce_handler(
    State(reducer): State<Arc<Reducer>>,
    payload: Result<Json<ReduceBody>, JsonRejection>,
) -> Result<Json<ReduceResponse>, PipelineError> {
    let request = validate::<ReduceBody, ReduceRequest>("reduce", payload)?;
    reducer
        .reduce(request)
        .await
        .map(Json)
        .inspect_err(|err| report("reduce", err))
}

/// Turns a raw body into a validated request, treating unreadable JSON the
/// same as a missing field.
fn validate<B, R>(stage: &str, payload: Result<Json<B>, JsonRejection>) -> Result<R, PipelineError>
where
    R: TryFrom<B, Error = PipelineError>,
{
    payload
        .map_err(|rejection| PipelineError::validation(rejection.body_text()))
        .and_then(|Json(body)| R::try_from(body))
        .inspect_err(|err| warn!(stage, error = %err, "rejected request"))
}

fn report(stage: &str, err: &PipelineError) {
    error!(stage, error = %err, "request failed");
}
