//! Error types for artifact loading, inference and the HTTP layer.

use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::schema::ErrorResponse;

/// Errors raised while loading the serialized classifier at startup.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The artifact file could not be read.
    #[error("failed to read model artifact {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact is not a valid JSON model document.
    #[error("failed to parse model artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The document parsed but describes an unusable model.
    #[error("invalid model artifact: {reason}")]
    Invalid { reason: String },
}

impl ArtifactError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        ArtifactError::Invalid {
            reason: reason.into(),
        }
    }
}

/// Errors raised by a classifier while scoring a record.
#[derive(Debug, Error, PartialEq)]
pub enum ClassifierError {
    /// The classifier expects a column the record does not supply.
    #[error("schema mismatch: record has no feature '{feature}'")]
    SchemaMismatch { feature: String },

    /// A feature value cannot be compared against split thresholds.
    #[error("feature '{feature}' is not a finite number")]
    NonFiniteFeature { feature: String },
}

/// Errors raised by the prediction adapter.
#[derive(Debug, Error, PartialEq)]
pub enum PredictError {
    /// A choice field carried a value outside its recognised options.
    #[error("invalid value '{value}' for {field}; expected one of {expected}")]
    InvalidInput {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

/// Handler-facing error, rendered as a JSON error body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Predict(#[from] PredictError),

    #[error("failed to render page: {0}")]
    Render(#[from] minijinja::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Predict(PredictError::InvalidInput { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Predict(PredictError::Classifier(_)) | AppError::Render(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "prediction failed");
        } else {
            tracing::debug!(error = %self, "prediction rejected");
        }
        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
