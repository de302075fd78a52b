//! Admin Auth Router

use axum::{Router, middleware, routing::post};
use platform::backup::SnapshotSource;

use crate::domain::repository::AdminConfigRepository;
use crate::presentation::handlers::{self, AdminAppState};
use crate::presentation::middleware::{AdminGuard, require_admin};

/// Login plus the guarded account routes
pub fn admin_auth_router<R, B>(state: AdminAppState<R, B>) -> Router
where
    R: AdminConfigRepository + Send + Sync + 'static,
    B: SnapshotSource + Send + Sync + 'static,
{
    let guard = AdminGuard::new(state.sessions.clone());

    let protected = Router::new()
        .route("/admin/change-password", post(handlers::change_password::<R, B>))
        .route("/admin/backup", post(handlers::backup::<R, B>))
        .route_layer(middleware::from_fn_with_state(guard, require_admin));

    Router::new()
        .route("/admin/login", post(handlers::login::<R, B>))
        .merge(protected)
        .with_state(state)
}
