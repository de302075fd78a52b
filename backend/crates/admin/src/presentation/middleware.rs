//! Admin Session Guard
//!
//! Middleware for requiring a valid admin token on protected routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use platform::bearer::extract_access_token;

use crate::domain::session::SharedSessionStore;
use crate::error::AdminError;

/// Middleware state
#[derive(Clone)]
pub struct AdminGuard {
    pub sessions: SharedSessionStore,
}

impl AdminGuard {
    pub fn new(sessions: SharedSessionStore) -> Self {
        Self { sessions }
    }
}

/// The token that authorized the current request, stored in request
/// extensions for downstream handlers
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub token: String,
}

/// Reject requests without a valid token.
///
/// The token comes from `Authorization: Bearer <token>` or, failing that,
/// a `token` query parameter.
pub async fn require_admin(
    State(guard): State<AdminGuard>,
    mut req: Request,
    next: Next,
) -> Result<Response, AdminError> {
    let token = extract_access_token(req.headers(), req.uri())
        .filter(|token| guard.sessions.validate(token))
        .ok_or(AdminError::Unauthorized)?;

    req.extensions_mut().insert(AdminSession { token });

    Ok(next.run(req).await)
}
