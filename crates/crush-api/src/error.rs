use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Request-level failures. Validation problems map to 400, anything that
/// went wrong below the handlers maps to 500; the body shape is always
/// `{"detail": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{message}")]
    Storage {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn storage(message: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Storage {
            message: message.into(),
            source,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage { message, source } => {
                error!("storage error ({message}): {source:#}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Internal(source) => {
                error!("internal error: {source:#}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}
