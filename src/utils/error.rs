use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::utils::response::error as error_response;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("malformed multipart submission: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("storage error")]
    Storage(#[from] opendal::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Multipart(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Storage(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message exposed in the response body. Server-side failures are
    /// reported opaquely; the detail stays in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Unauthorized => "Unauthorized".to_string(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Multipart(_) => "Malformed form submission".to_string(),
            AppError::Database(_) | AppError::Storage(_) | AppError::Internal(_) => {
                "Internal server error".to_string()
            }
        }
    }

    fn log(&self) {
        match self {
            AppError::Database(e) => error!(error = ?e, "database error"),
            AppError::Storage(e) => error!(error = ?e, "storage error"),
            AppError::Internal(msg) => error!(message = %msg, "internal error"),
            AppError::Validation(_)
            | AppError::Unauthorized
            | AppError::NotFound(_)
            | AppError::Multipart(_) => {
                warn!(error = %self, "request rejected");
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        error_response(self.public_message(), self.status_code())
    }
}
