//! HTTP Handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::{Extension, Json};
use platform::backup::SnapshotSource;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::application::{
    ChangePasswordInput, ChangePasswordUseCase, CreateBackupUseCase, SignInInput, SignInUseCase,
};
use crate::domain::repository::AdminConfigRepository;
use crate::domain::session::SharedSessionStore;
use crate::error::AdminResult;
use crate::presentation::dto::{
    BackupResponse, ChangePasswordRequest, LoginRequest, LoginResponse, OkResponse,
};
use crate::presentation::middleware::AdminSession;

/// Shared state for admin handlers
///
/// `backups` is whatever store holds the submissions; it is snapshotted
/// before a password change and on demand.
pub struct AdminAppState<R, B>
where
    R: AdminConfigRepository + Send + Sync + 'static,
    B: SnapshotSource + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub backups: Arc<B>,
    pub sessions: SharedSessionStore,
    /// Serializes password changes
    pub password_lock: Arc<Mutex<()>>,
}

impl<R, B> AdminAppState<R, B>
where
    R: AdminConfigRepository + Send + Sync + 'static,
    B: SnapshotSource + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, backups: Arc<B>, sessions: SharedSessionStore) -> Self {
        Self {
            repo,
            backups,
            sessions,
            password_lock: Arc::new(Mutex::new(())),
        }
    }
}

// Manual impl: derive would require `R: Clone` and `B: Clone`
impl<R, B> Clone for AdminAppState<R, B>
where
    R: AdminConfigRepository + Send + Sync + 'static,
    B: SnapshotSource + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            backups: self.backups.clone(),
            sessions: self.sessions.clone(),
            password_lock: self.password_lock.clone(),
        }
    }
}

/// POST /admin/login
pub async fn login<R, B>(
    State(state): State<AdminAppState<R, B>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AdminResult<Json<LoginResponse>>
where
    R: AdminConfigRepository + Send + Sync + 'static,
    B: SnapshotSource + Send + Sync + 'static,
{
    // An unreadable body is just a failed login
    let req = payload.map(|Json(req)| req).unwrap_or_default();

    let use_case = SignInUseCase::new(state.repo.clone(), state.sessions.clone());
    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        ok: true,
        token: output.token.into_string(),
    }))
}

/// POST /admin/change-password
pub async fn change_password<R, B>(
    State(state): State<AdminAppState<R, B>>,
    Extension(session): Extension<AdminSession>,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> AdminResult<Json<OkResponse>>
where
    R: AdminConfigRepository + Send + Sync + 'static,
    B: SnapshotSource + Send + Sync + 'static,
{
    let req = payload.map(|Json(req)| req).unwrap_or_default();

    let use_case = ChangePasswordUseCase::new(
        state.repo.clone(),
        state.backups.clone(),
        state.sessions.clone(),
        state.password_lock.clone(),
    );
    use_case
        .execute(ChangePasswordInput {
            token: session.token,
            current_password: req.current_password,
            new_password: req.new_password,
        })
        .await?;

    Ok(Json(OkResponse { ok: true }))
}

/// POST /admin/backup
pub async fn backup<R, B>(State(state): State<AdminAppState<R, B>>) -> AdminResult<Json<BackupResponse>>
where
    R: AdminConfigRepository + Send + Sync + 'static,
    B: SnapshotSource + Send + Sync + 'static,
{
    let use_case = CreateBackupUseCase::new(state.backups.clone());
    let filename = use_case.execute().await?;

    Ok(Json(BackupResponse {
        ok: true,
        filename: Some(filename),
    }))
}
