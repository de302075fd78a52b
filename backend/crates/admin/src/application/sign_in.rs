//! Sign In Use Case
//!
//! Checks the admin credentials and issues a bearer token.

use std::sync::Arc;

use crate::domain::repository::AdminConfigRepository;
use crate::domain::session::{SessionToken, SharedSessionStore};
use crate::error::{AdminError, AdminResult};

/// Sign in input
pub struct SignInInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Sign in output
pub struct SignInOutput {
    pub token: SessionToken,
}

/// Sign in use case
pub struct SignInUseCase<R>
where
    R: AdminConfigRepository,
{
    repo: Arc<R>,
    sessions: SharedSessionStore,
}

impl<R> SignInUseCase<R>
where
    R: AdminConfigRepository,
{
    pub fn new(repo: Arc<R>, sessions: SharedSessionStore) -> Self {
        Self { repo, sessions }
    }

    pub async fn execute(&self, input: SignInInput) -> AdminResult<SignInOutput> {
        let credentials = self.repo.load().await?;

        let email = input.email.unwrap_or_default();
        let password = input.password.unwrap_or_default();

        if !credentials.matches(&email, &password) {
            tracing::warn!(
                email = if email.is_empty() { "unknown" } else { email.as_str() },
                "Admin login failed"
            );
            return Err(AdminError::InvalidCredentials);
        }

        let token = self.sessions.issue();
        tracing::info!(email = %email, "Admin login success");

        Ok(SignInOutput { token })
    }
}
