//! Enrollment Routers

use crate::domain::repository::{CourseRepository, SubmissionRepository};
use crate::presentation::handlers::{self, EnrollmentAppState};
use admin::{AdminGuard, require_admin};
use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

/// Routes open to the public: the registration form and the course list
pub fn public_router<R>(state: EnrollmentAppState<R>) -> Router
where
    R: SubmissionRepository + CourseRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/submit", post(handlers::submit::<R>))
        .route("/api/courses", get(handlers::list_courses::<R>))
        .with_state(state)
}

/// Admin panel routes, all behind the session guard
pub fn admin_router<R>(state: EnrollmentAppState<R>, guard: AdminGuard) -> Router
where
    R: SubmissionRepository + CourseRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/admin/submissions", get(handlers::list_submissions::<R>))
        .route(
            "/admin/submissions/{id}",
            get(handlers::get_submission::<R>).delete(handlers::trash_submission::<R>),
        )
        .route(
            "/admin/submissions/{id}/restore",
            post(handlers::restore_submission::<R>),
        )
        .route(
            "/admin/submissions/{id}/permanent",
            delete(handlers::purge_submission::<R>),
        )
        .route("/admin/export", get(handlers::export_csv::<R>))
        .route(
            "/admin/api/courses",
            get(handlers::list_courses::<R>).post(handlers::update_courses::<R>),
        )
        .route_layer(middleware::from_fn_with_state(guard, require_admin))
        .with_state(state)
}
