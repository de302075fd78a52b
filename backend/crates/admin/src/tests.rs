//! Unit tests for the admin crate

#[cfg(test)]
mod support {
    use platform::backup::{BackupError, SnapshotSource};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Snapshot source that only counts calls
    #[derive(Default)]
    pub struct CountingSnapshots {
        pub calls: AtomicUsize,
        pub fail: bool,
        pub delay: Option<Duration>,
    }

    impl CountingSnapshots {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        /// Each snapshot takes `delay` before completing
        pub fn slow(delay: Duration) -> Self {
            Self {
                delay: Some(delay),
                ..Default::default()
            }
        }

        pub fn count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl SnapshotSource for CountingSnapshots {
        async fn snapshot(&self) -> Result<String, BackupError> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail {
                return Err(BackupError::Snapshot("disk full".into()));
            }
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("submissions-2026-01-01-00-00-{n:02}.json"))
        }
    }
}

#[cfg(test)]
mod use_case_tests {
    use super::support::CountingSnapshots;
    use crate::application::*;
    use crate::domain::repository::AdminConfigRepository;
    use crate::domain::session::{SessionStore, SharedSessionStore};
    use crate::error::AdminError;
    use crate::infra::file_config::FileAdminConfigRepository;
    use crate::infra::memory_session::InMemorySessionStore;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;
    use tokio::sync::Mutex;

    struct Fixture {
        _dir: TempDir,
        repo: Arc<FileAdminConfigRepository>,
        sessions: SharedSessionStore,
        snapshots: Arc<CountingSnapshots>,
        password_lock: Arc<Mutex<()>>,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let repo = FileAdminConfigRepository::new(dir.path(), AdminConfigDefaults::default());
        Fixture {
            _dir: dir,
            repo: Arc::new(repo),
            sessions: Arc::new(InMemorySessionStore::new()),
            snapshots: Arc::new(CountingSnapshots::default()),
            password_lock: Arc::new(Mutex::new(())),
        }
    }

    fn sign_in(f: &Fixture) -> SignInUseCase<FileAdminConfigRepository> {
        SignInUseCase::new(f.repo.clone(), f.sessions.clone())
    }

    fn change_password(
        f: &Fixture,
    ) -> ChangePasswordUseCase<FileAdminConfigRepository, CountingSnapshots> {
        ChangePasswordUseCase::new(
            f.repo.clone(),
            f.snapshots.clone(),
            f.sessions.clone(),
            f.password_lock.clone(),
        )
    }

    fn input(token: &str, current: &str, new: &str) -> ChangePasswordInput {
        ChangePasswordInput {
            token: token.to_string(),
            current_password: Some(current.to_string()),
            new_password: Some(new.to_string()),
        }
    }

    #[tokio::test]
    async fn test_sign_in_issues_valid_token() {
        let f = fixture();
        let output = sign_in(&f)
            .execute(SignInInput {
                email: Some("admin@acelab.com".into()),
                password: Some("admin123".into()),
            })
            .await
            .unwrap();

        assert!(f.sessions.validate(output.token.as_str()));
    }

    #[tokio::test]
    async fn test_sign_in_wrong_password_issues_nothing() {
        let f = fixture();
        let err = sign_in(&f)
            .execute(SignInInput {
                email: Some("admin@acelab.com".into()),
                password: Some("wrong".into()),
            })
            .await
            .err()
            .unwrap();

        assert!(matches!(err, AdminError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_sign_in_missing_fields_is_rejected() {
        let f = fixture();
        let result = sign_in(&f)
            .execute(SignInInput {
                email: None,
                password: None,
            })
            .await;

        assert!(matches!(result, Err(AdminError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_change_password_success_revokes_token() {
        let f = fixture();
        let token = f.sessions.issue();

        change_password(&f)
            .execute(input(token.as_str(), "admin123", "new-password-1"))
            .await
            .unwrap();

        assert!(!f.sessions.validate(token.as_str()));
        assert_eq!(f.snapshots.count(), 1);
        assert_eq!(f.repo.load().await.unwrap().password, "new-password-1");
    }

    #[tokio::test]
    async fn test_change_password_wrong_current_keeps_token() {
        let f = fixture();
        let token = f.sessions.issue();

        let err = change_password(&f)
            .execute(input(token.as_str(), "not-it", "new-password-1"))
            .await
            .unwrap_err();

        assert!(matches!(err, AdminError::IncorrectCurrentPassword));
        assert!(f.sessions.validate(token.as_str()));
        assert_eq!(f.snapshots.count(), 0);
        assert_eq!(f.repo.load().await.unwrap().password, "admin123");
    }

    #[tokio::test]
    async fn test_change_password_too_short() {
        let f = fixture();
        let token = f.sessions.issue();

        let err = change_password(&f)
            .execute(input(token.as_str(), "admin123", "short"))
            .await
            .unwrap_err();

        assert!(matches!(err, AdminError::WeakPassword(8)));
        assert_eq!(err.to_string(), "New password must be at least 8 characters");
        assert!(f.sessions.validate(token.as_str()));
    }

    #[tokio::test]
    async fn test_change_password_counts_characters_not_bytes() {
        let f = fixture();
        let token = f.sessions.issue();

        // Seven characters, more than eight bytes
        let err = change_password(&f)
            .execute(input(token.as_str(), "admin123", "ééééééé"))
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::WeakPassword(_)));
    }

    #[tokio::test]
    async fn test_change_password_backup_failure_keeps_old_password() {
        let mut f = fixture();
        f.snapshots = Arc::new(CountingSnapshots::failing());
        let token = f.sessions.issue();

        let err = change_password(&f)
            .execute(input(token.as_str(), "admin123", "new-password-1"))
            .await
            .unwrap_err();

        assert!(matches!(err, AdminError::Backup(_)));
        assert_eq!(f.repo.load().await.unwrap().password, "admin123");
        assert!(f.sessions.validate(token.as_str()));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_changes_with_same_current_password() {
        let mut f = fixture();
        f.snapshots = Arc::new(CountingSnapshots::slow(Duration::from_millis(50)));
        let first_token = f.sessions.issue();
        let second_token = f.sessions.issue();

        let first = change_password(&f);
        let second = change_password(&f);
        let (a, b) = tokio::join!(
            first.execute(input(first_token.as_str(), "admin123", "password-A")),
            second.execute(input(second_token.as_str(), "admin123", "password-B")),
        );

        // The loser sees the winner's password as current
        assert!(a.is_ok() != b.is_ok(), "exactly one change must succeed: {a:?} {b:?}");
        let (winner, loser) = if a.is_ok() {
            ("password-A", b)
        } else {
            ("password-B", a)
        };
        assert!(matches!(loser, Err(AdminError::IncorrectCurrentPassword)));
        assert_eq!(f.repo.load().await.unwrap().password, winner);
        assert_eq!(f.snapshots.count(), 1);
    }

    #[tokio::test]
    async fn test_backup_returns_file_name() {
        let f = fixture();
        let name = CreateBackupUseCase::new(f.snapshots.clone())
            .execute()
            .await
            .unwrap();

        assert!(name.starts_with("submissions-"));
    }
}

#[cfg(test)]
mod router_tests {
    use super::support::CountingSnapshots;
    use crate::application::config::AdminConfigDefaults;
    use crate::domain::session::SessionStore;
    use crate::infra::file_config::FileAdminConfigRepository;
    use crate::infra::memory_session::InMemorySessionStore;
    use crate::presentation::handlers::AdminAppState;
    use crate::presentation::router::admin_auth_router;
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn app(dir: &TempDir, sessions: Arc<InMemorySessionStore>) -> Router {
        admin_auth_router(AdminAppState::new(
            Arc::new(FileAdminConfigRepository::new(
                dir.path(),
                AdminConfigDefaults::default(),
            )),
            Arc::new(CountingSnapshots::default()),
            sessions,
        ))
    }

    fn post_json(uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_login_returns_token() {
        let dir = TempDir::new().unwrap();
        let sessions = Arc::new(InMemorySessionStore::new());
        let response = app(&dir, sessions.clone())
            .oneshot(post_json(
                "/admin/login",
                json!({ "email": "admin@acelab.com", "password": "admin123" }),
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["ok"], json!(true));
        assert!(sessions.validate(body["token"].as_str().unwrap()));
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_401() {
        let dir = TempDir::new().unwrap();
        let sessions = Arc::new(InMemorySessionStore::new());
        let response = app(&dir, sessions.clone())
            .oneshot(post_json(
                "/admin/login",
                json!({ "email": "admin@acelab.com", "password": "nope" }),
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = json_body(response).await;
        assert_eq!(body["error"], json!("Invalid credentials"));
        assert!(sessions.is_empty());
    }

    #[tokio::test]
    async fn test_backup_requires_token() {
        let dir = TempDir::new().unwrap();
        let response = app(&dir, Arc::new(InMemorySessionStore::new()))
            .oneshot(post_json("/admin/backup", json!({}), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = json_body(response).await;
        assert_eq!(body["error"], json!("Unauthorized"));
    }

    #[tokio::test]
    async fn test_backup_with_query_token() {
        let dir = TempDir::new().unwrap();
        let sessions = Arc::new(InMemorySessionStore::new());
        let token = sessions.issue();

        let request = Request::post(format!("/admin/backup?token={token}"))
            .body(Body::empty())
            .unwrap();
        let response = app(&dir, sessions).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["ok"], json!(true));
        assert!(body["filename"].as_str().unwrap().starts_with("submissions-"));
    }

    #[tokio::test]
    async fn test_change_password_revokes_presenting_token_only() {
        let dir = TempDir::new().unwrap();
        let sessions = Arc::new(InMemorySessionStore::new());
        let acting = sessions.issue();
        let other = sessions.issue();

        let response = app(&dir, sessions.clone())
            .oneshot(post_json(
                "/admin/change-password",
                json!({ "currentPassword": "admin123", "newPassword": "a-better-one" }),
                Some(acting.as_str()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(!sessions.validate(acting.as_str()));
        assert!(sessions.validate(other.as_str()));
    }

    #[tokio::test]
    async fn test_change_password_wrong_current_is_400() {
        let dir = TempDir::new().unwrap();
        let sessions = Arc::new(InMemorySessionStore::new());
        let token = sessions.issue();

        let response = app(&dir, sessions.clone())
            .oneshot(post_json(
                "/admin/change-password",
                json!({ "currentPassword": "guess", "newPassword": "a-better-one" }),
                Some(token.as_str()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], json!("Current password is incorrect"));
        assert!(sessions.validate(token.as_str()));
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(AdminError, StatusCode)> = vec![
            (AdminError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AdminError::Unauthorized, StatusCode::UNAUTHORIZED),
            (AdminError::IncorrectCurrentPassword, StatusCode::BAD_REQUEST),
            (AdminError::WeakPassword(8), StatusCode::BAD_REQUEST),
            (
                AdminError::ConfigUnavailable("missing".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            assert_eq!(error.status_code(), expected_status);
            let response = error.into_response();
            assert_eq!(response.status(), expected_status);
        }
    }

    #[test]
    fn test_internal_details_not_exposed() {
        let app_error = AdminError::ConfigUnavailable("/secret/path".into()).into_app_error();
        assert_eq!(app_error.message(), "Admin config unavailable");
    }
}
