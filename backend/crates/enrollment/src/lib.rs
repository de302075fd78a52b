//! Enrollment Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Submissions, courses, filters, repository traits
//! - `application/` - Use cases (intake, admin management, catalog, CSV export)
//! - `infra/` - JSON file store and SQLite store
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! ## Storage Model
//! - Either store satisfies the same repository traits and can back the service
//! - The JSON store rewrites the whole collection on every change, serialized
//!   by a mutex, and takes a rotating backup before each rewrite
//! - The SQLite store applies per-record statements and snapshots on demand

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{EnrollmentConfig, UnidentifiedCoursePolicy};
pub use domain::repository::{CourseRepository, SubmissionRepository};
pub use error::{EnrollmentError, EnrollmentResult};
pub use infra::json_file::{JsonFileStore, read_submissions_file};
pub use infra::sqlite::SqliteStore;
pub use infra::{ReadPolicy, StoreOptions};
pub use presentation::handlers::EnrollmentAppState;
pub use presentation::router::{admin_router, public_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}
