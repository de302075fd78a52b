//! Change Password Use Case

use std::sync::Arc;

use platform::backup::SnapshotSource;
use tokio::sync::Mutex;

use crate::application::config::MIN_PASSWORD_LEN;
use crate::domain::repository::AdminConfigRepository;
use crate::domain::session::SharedSessionStore;
use crate::error::{AdminError, AdminResult};

/// Change password input
pub struct ChangePasswordInput {
    /// Token that authorized the request; revoked on success
    pub token: String,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

/// Change password use case
pub struct ChangePasswordUseCase<R, B>
where
    R: AdminConfigRepository,
    B: SnapshotSource,
{
    repo: Arc<R>,
    backups: Arc<B>,
    sessions: SharedSessionStore,
    lock: Arc<Mutex<()>>,
}

impl<R, B> ChangePasswordUseCase<R, B>
where
    R: AdminConfigRepository,
    B: SnapshotSource,
{
    /// `lock` must be shared by every change against the same repository
    pub fn new(
        repo: Arc<R>,
        backups: Arc<B>,
        sessions: SharedSessionStore,
        lock: Arc<Mutex<()>>,
    ) -> Self {
        Self {
            repo,
            backups,
            sessions,
            lock,
        }
    }

    /// A wrong current password leaves the session intact.
    ///
    /// The lock is held from load to save, so of two changes presenting the
    /// same current password only the first succeeds.
    pub async fn execute(&self, input: ChangePasswordInput) -> AdminResult<()> {
        let _guard = self.lock.lock().await;
        let credentials = self.repo.load().await?;

        let current = input.current_password.unwrap_or_default();
        if current.trim().is_empty() || !credentials.password_matches(&current) {
            return Err(AdminError::IncorrectCurrentPassword);
        }

        let new_password = input.new_password.unwrap_or_default();
        if new_password.trim().is_empty() || new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AdminError::WeakPassword(MIN_PASSWORD_LEN));
        }

        let backup = self.backups.snapshot().await?;
        tracing::info!(backup = %backup, "Backup created before password change");

        self.repo.save(&credentials.with_password(new_password)).await?;
        self.sessions.revoke(&input.token);

        tracing::info!("Admin password changed successfully");
        Ok(())
    }
}
