//! Admin Error Types
//!
//! This module provides admin-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::backup::BackupError;
use thiserror::Error;

/// Admin-specific result type alias
pub type AdminResult<T> = Result<T, AdminError>;

/// Admin-specific error variants
#[derive(Debug, Error)]
pub enum AdminError {
    /// Wrong email or password at login
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, unknown or revoked bearer token
    #[error("Unauthorized")]
    Unauthorized,

    /// Password change with the wrong current password
    #[error("Current password is incorrect")]
    IncorrectCurrentPassword,

    /// New password below the minimum length
    #[error("New password must be at least {0} characters")]
    WeakPassword(usize),

    /// `admin.json` could not be read or created
    #[error("Admin config unavailable: {0}")]
    ConfigUnavailable(String),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Snapshot of the submission store failed
    #[error("Backup error: {0}")]
    Backup(#[from] BackupError),
}

impl AdminError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AdminError::InvalidCredentials | AdminError::Unauthorized => StatusCode::UNAUTHORIZED,
            AdminError::IncorrectCurrentPassword | AdminError::WeakPassword(_) => {
                StatusCode::BAD_REQUEST
            }
            AdminError::ConfigUnavailable(_)
            | AdminError::Io(_)
            | AdminError::Serialization(_)
            | AdminError::Backup(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AdminError::InvalidCredentials | AdminError::Unauthorized => ErrorKind::Unauthorized,
            AdminError::IncorrectCurrentPassword | AdminError::WeakPassword(_) => {
                ErrorKind::BadRequest
            }
            _ => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError. Server-side details stay in the log.
    pub fn into_app_error(self) -> AppError {
        match self {
            AdminError::ConfigUnavailable(_) => AppError::internal("Admin config unavailable"),
            AdminError::Io(e) => AppError::from(e),
            AdminError::Serialization(e) => AppError::from(e),
            AdminError::Backup(e) => AppError::internal("Backup failed").with_source(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AdminError::InvalidCredentials => {
                tracing::warn!("Invalid admin login attempt");
            }
            AdminError::Unauthorized => {
                tracing::debug!("Rejected request without a valid admin token");
            }
            AdminError::IncorrectCurrentPassword | AdminError::WeakPassword(_) => {
                tracing::debug!(error = %self, "Password change rejected");
            }
            _ => {
                tracing::error!(error = %self, "Admin internal error");
            }
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}
