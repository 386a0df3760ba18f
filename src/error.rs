//! Error types and their HTTP mapping

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::api::responses::ErrorResponse;

pub type AppResult<T> = Result<T, AppError>;

/// Validation failures surfaced to the user as a blocking alert
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyError {
    #[error("please enter a valid phone number")]
    InvalidPhone,

    #[error("verification code cannot be empty")]
    EmptyCode,

    #[error("verification code is incorrect")]
    IncorrectCode,
}

impl VerifyError {
    /// Stable machine-readable kind
    pub fn code(&self) -> &'static str {
        match self {
            VerifyError::InvalidPhone => "invalid_phone",
            VerifyError::EmptyCode => "empty_code",
            VerifyError::IncorrectCode => "incorrect_code",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            VerifyError::InvalidPhone | VerifyError::EmptyCode => StatusCode::BAD_REQUEST,
            VerifyError::IncorrectCode => StatusCode::UNAUTHORIZED,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Verify(#[from] VerifyError),

    #[error("Unknown or expired session: {0}")]
    UnknownSession(String),

    #[error(transparent)]
    JsonBody(#[from] JsonRejection),

    #[error(transparent)]
    Query(#[from] QueryRejection),

    #[error("Failed to lock session state: {0}")]
    StateLock(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Verify(e) => {
                warn!("Validation failed: {}", e);
                (e.status(), Json(ErrorResponse::new(e.code(), e.to_string()))).into_response()
            }
            AppError::UnknownSession(id) => {
                warn!("Request for unknown session {}", id);
                (
                    StatusCode::NOT_FOUND,
                    Json(ErrorResponse::new(
                        "unknown_session",
                        "this page has expired, please reload it",
                    )),
                )
                    .into_response()
            }
            AppError::JsonBody(rejection) => {
                warn!("Rejected request body: {}", rejection.body_text());
                (
                    rejection.status(),
                    Json(ErrorResponse::new("bad_request", rejection.body_text())),
                )
                    .into_response()
            }
            AppError::Query(rejection) => {
                warn!("Rejected query string: {}", rejection.body_text());
                (
                    rejection.status(),
                    Json(ErrorResponse::new("bad_request", rejection.body_text())),
                )
                    .into_response()
            }
            AppError::StateLock(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new("internal", "Internal server error")),
                )
                    .into_response()
            }
        }
    }
}
