use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rental_sdk::RentalSdkError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::pinning::PinningError;

/// Errors that abort server startup.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] RentalSdkError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Request failures. Rendered as `{"detail": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed address or out-of-range argument
    #[error("{0}")]
    InvalidInput(String),
    /// Request the extractors could not read, with the status they chose
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    #[error("{0}")]
    NotFound(String),
    /// Caller identity does not match the on-chain record
    #[error("{0}")]
    Unauthorized(String),
    /// Ledger node or pinning service failure, message passed through
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Rejected { status, .. } => *status,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::FORBIDDEN,
            ApiError::Upstream { status, .. } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RentalSdkError> for ApiError {
    fn from(error: RentalSdkError) -> Self {
        match &error {
            RentalSdkError::InvalidAddress { .. } | RentalSdkError::InvalidArgument(_) => {
                ApiError::InvalidInput(error.to_string())
            }
            RentalSdkError::AccountNotFound { .. } => ApiError::NotFound(error.to_string()),
            RentalSdkError::Unauthorized(_) => ApiError::Unauthorized(error.to_string()),
            RentalSdkError::Connection(_) | RentalSdkError::InvalidAccountData { .. } => {
                ApiError::Upstream {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: error.to_string(),
                }
            }
            RentalSdkError::InvalidSeeds => ApiError::Internal(error.to_string()),
        }
    }
}

impl From<PinningError> for ApiError {
    fn from(error: PinningError) -> Self {
        match error {
            PinningError::Status { status, body } => ApiError::Upstream {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                message: body,
            },
            other => ApiError::Upstream {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: other.to_string(),
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(error: MultipartError) -> Self {
        ApiError::Rejected {
            status: error.status(),
            message: error.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Internal(cause) => error!(%cause, "request failed"),
            ApiError::Upstream { message, .. } => warn!(%status, %message, "upstream failure"),
            _ => {}
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
