//! Admin Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Admin credentials, session store trait, repository traits
//! - `application/` - Use cases (sign in, change password, backup)
//! - `infra/` - `admin.json` repository and in-memory session store
//! - `presentation/` - HTTP handlers, DTOs, router, session guard
//!
//! ## Security Model
//! - A single admin account whose credentials live in `admin.json`
//! - Credentials are stored as written and compared in constant time
//! - Bearer tokens are kept in process memory only; a restart signs
//!   everybody out
//! - Changing the password revokes the token that made the change

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{AdminConfigDefaults, MIN_PASSWORD_LEN};
pub use domain::session::{SessionStore, SessionToken, SharedSessionStore};
pub use error::{AdminError, AdminResult};
pub use infra::file_config::FileAdminConfigRepository;
pub use infra::memory_session::InMemorySessionStore;
pub use presentation::handlers::AdminAppState;
pub use presentation::middleware::{AdminGuard, AdminSession, require_admin};
pub use presentation::router::admin_auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

#[cfg(test)]
mod tests;
