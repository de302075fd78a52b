//! Router Assembly

use admin::{
    AdminAppState, AdminGuard, FileAdminConfigRepository, SharedSessionStore, admin_auth_router,
};
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use enrollment::{
    CourseRepository, EnrollmentAppState, EnrollmentConfig, SubmissionRepository, admin_router,
    public_router,
};
use platform::backup::SnapshotSource;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Every route of the service over one submission store
pub fn build_router<S>(
    store: S,
    admin_repo: FileAdminConfigRepository,
    sessions: SharedSessionStore,
    config: EnrollmentConfig,
) -> Router
where
    S: SubmissionRepository + CourseRepository + SnapshotSource + Clone + Send + Sync + 'static,
{
    let enrollment_state = EnrollmentAppState::new(store.clone(), config);
    let admin_state = AdminAppState::new(Arc::new(admin_repo), Arc::new(store), sessions.clone());

    Router::new()
        .merge(public_router(enrollment_state.clone()))
        .merge(admin_router(enrollment_state, AdminGuard::new(sessions)))
        .merge(admin_auth_router(admin_state))
}

/// CORS for the form and admin pages; `None` allows any origin
pub fn cors_layer(origins: Option<&[String]>) -> CorsLayer {
    let allow_origin = match origins {
        Some(origins) => {
            let allowed: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();
            AllowOrigin::list(allowed)
        }
        None => AllowOrigin::any(),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
}
