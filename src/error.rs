//! Pipeline errors and their HTTP status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;

/// Everything that can make a stage request fail.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The request was missing a field or was not the JSON we expect.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The source document could not be downloaded.
    #[error("Download error: {0}")]
    Download(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// A blob was fetched fine but its content is unusable.
    #[error("Malformed blob {key}: {reason}")]
    MalformedBlob { key: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PipelineError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn malformed(key: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedBlob {
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    /// Only validation failures are the caller's fault.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_is_a_client_error() {
        let err = PipelineError::validation("missing field `key`");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn everything_else_is_a_server_error() {
        let errors = [
            PipelineError::Download("boom".into()),
            PipelineError::Storage(StoreError::NotFound {
                bucket: "b".into(),
                key: "k".into(),
            }),
            PipelineError::malformed("k", "not json"),
        ];
        for err in errors {
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
