//! Application Layer
//!
//! Use cases and application services.

pub mod backup;
pub mod change_password;
pub mod config;
pub mod sign_in;

// Re-exports
pub use backup::CreateBackupUseCase;
pub use change_password::{ChangePasswordInput, ChangePasswordUseCase};
pub use config::AdminConfigDefaults;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
