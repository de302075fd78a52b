//! Enrollment Error Types
//!
//! This module provides enrollment-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::backup::BackupError;
use thiserror::Error;

/// Enrollment-specific result type alias
pub type EnrollmentResult<T> = Result<T, EnrollmentError>;

/// Enrollment-specific error variants
#[derive(Debug, Error)]
pub enum EnrollmentError {
    /// Malformed or incomplete input
    #[error("{0}")]
    Validation(String),

    /// Unknown submission id
    #[error("Not found")]
    NotFound,

    /// Stored data could not be read (strict read policy only)
    #[error("Storage unreadable: {0}")]
    StorageUnreadable(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Store (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backup could not be written
    #[error("Backup error: {0}")]
    Backup(#[from] BackupError),
}

impl EnrollmentError {
    pub fn validation(message: impl Into<String>) -> Self {
        EnrollmentError::Validation(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            EnrollmentError::Validation(_) => StatusCode::BAD_REQUEST,
            EnrollmentError::NotFound => StatusCode::NOT_FOUND,
            EnrollmentError::StorageUnreadable(_)
            | EnrollmentError::Database(_)
            | EnrollmentError::Io(_)
            | EnrollmentError::Serialization(_)
            | EnrollmentError::Backup(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            EnrollmentError::Validation(_) => ErrorKind::BadRequest,
            EnrollmentError::NotFound => ErrorKind::NotFound,
            _ => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError, keeping the original error as source
    pub fn into_app_error(self) -> AppError {
        match self {
            EnrollmentError::Validation(message) => AppError::bad_request(message),
            EnrollmentError::NotFound => AppError::not_found("Not found"),
            EnrollmentError::StorageUnreadable(_) => AppError::internal("Storage unavailable"),
            EnrollmentError::Database(e) => AppError::from(e),
            EnrollmentError::Io(e) => AppError::from(e),
            EnrollmentError::Serialization(e) => AppError::from(e),
            EnrollmentError::Backup(e) => AppError::internal("Backup failed").with_source(e),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            EnrollmentError::Validation(message) => {
                tracing::debug!(reason = %message, "Rejected enrollment input");
            }
            EnrollmentError::NotFound => {
                tracing::debug!("Submission not found");
            }
            _ => {
                tracing::error!(error = %self, "Enrollment storage error");
            }
        }
    }
}

impl IntoResponse for EnrollmentError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}
