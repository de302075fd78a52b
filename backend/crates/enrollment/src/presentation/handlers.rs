//! HTTP Handlers

use crate::application::config::EnrollmentConfig;
use crate::application::courses::CourseCatalogUseCase;
use crate::application::export::ExportSubmissionsUseCase;
use crate::application::manage_submissions::ManageSubmissionsUseCase;
use crate::application::submit::SubmitRegistrationUseCase;
use crate::domain::repository::{CourseRepository, SubmissionRepository};
use crate::error::{EnrollmentError, EnrollmentResult};
use crate::presentation::dto::{
    BulkUpdateResponse, CourseResponse, CourseUpdateRequest, ListQuery, OkResponse,
    SubmissionActionResponse, SubmissionResponse, SubmitRequest,
};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use kernel::id::SubmissionId;
use serde_json::Value;
use std::sync::Arc;

/// Shared state for enrollment handlers
#[derive(Clone)]
pub struct EnrollmentAppState<R>
where
    R: SubmissionRepository + CourseRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<EnrollmentConfig>,
}

impl<R> EnrollmentAppState<R>
where
    R: SubmissionRepository + CourseRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: EnrollmentConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
        }
    }
}

/// POST /submit
pub async fn submit<R>(
    State(state): State<EnrollmentAppState<R>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> EnrollmentResult<Json<OkResponse>>
where
    R: SubmissionRepository + CourseRepository + Clone + Send + Sync + 'static,
{
    let body = match payload {
        Ok(Json(body @ Value::Object(_))) => body,
        _ => return Err(EnrollmentError::validation("Invalid submission payload")),
    };
    let req: SubmitRequest = serde_json::from_value(body)
        .map_err(|_| EnrollmentError::validation("Invalid submission payload"))?;

    let use_case = SubmitRegistrationUseCase::new(state.repo.clone());
    use_case.execute(req.into()).await?;

    Ok(Json(OkResponse::ok()))
}

/// GET /admin/submissions
pub async fn list_submissions<R>(
    State(state): State<EnrollmentAppState<R>>,
    Query(query): Query<ListQuery>,
) -> EnrollmentResult<Json<Vec<SubmissionResponse>>>
where
    R: SubmissionRepository + CourseRepository + Clone + Send + Sync + 'static,
{
    let use_case = ManageSubmissionsUseCase::new(state.repo.clone());
    let submissions = use_case.list(query.filter()).await?;

    Ok(Json(submissions.into_iter().map(SubmissionResponse::from).collect()))
}

/// GET /admin/submissions/{id}
pub async fn get_submission<R>(
    State(state): State<EnrollmentAppState<R>>,
    Path(id): Path<String>,
) -> EnrollmentResult<Json<SubmissionResponse>>
where
    R: SubmissionRepository + CourseRepository + Clone + Send + Sync + 'static,
{
    let use_case = ManageSubmissionsUseCase::new(state.repo.clone());
    let submission = use_case.get(&SubmissionId::from(id)).await?;

    Ok(Json(submission.into()))
}

/// DELETE /admin/submissions/{id}
pub async fn trash_submission<R>(
    State(state): State<EnrollmentAppState<R>>,
    Path(id): Path<String>,
) -> EnrollmentResult<Json<SubmissionActionResponse>>
where
    R: SubmissionRepository + CourseRepository + Clone + Send + Sync + 'static,
{
    let use_case = ManageSubmissionsUseCase::new(state.repo.clone());
    use_case.trash(&SubmissionId::from(id)).await?;

    Ok(Json(SubmissionActionResponse::trashed()))
}

/// POST /admin/submissions/{id}/restore
pub async fn restore_submission<R>(
    State(state): State<EnrollmentAppState<R>>,
    Path(id): Path<String>,
) -> EnrollmentResult<Json<SubmissionActionResponse>>
where
    R: SubmissionRepository + CourseRepository + Clone + Send + Sync + 'static,
{
    let use_case = ManageSubmissionsUseCase::new(state.repo.clone());
    use_case.restore(&SubmissionId::from(id)).await?;

    Ok(Json(SubmissionActionResponse::restored()))
}

/// DELETE /admin/submissions/{id}/permanent
pub async fn purge_submission<R>(
    State(state): State<EnrollmentAppState<R>>,
    Path(id): Path<String>,
) -> EnrollmentResult<Json<SubmissionActionResponse>>
where
    R: SubmissionRepository + CourseRepository + Clone + Send + Sync + 'static,
{
    let use_case = ManageSubmissionsUseCase::new(state.repo.clone());
    use_case.purge(&SubmissionId::from(id)).await?;

    Ok(Json(SubmissionActionResponse::deleted()))
}

/// GET /admin/export
pub async fn export_csv<R>(
    State(state): State<EnrollmentAppState<R>>,
) -> EnrollmentResult<impl IntoResponse>
where
    R: SubmissionRepository + CourseRepository + Clone + Send + Sync + 'static,
{
    let use_case = ExportSubmissionsUseCase::new(state.repo.clone());
    let csv = use_case.execute().await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"submissions.csv\"",
            ),
        ],
        csv,
    ))
}

/// GET /api/courses and GET /admin/api/courses
pub async fn list_courses<R>(
    State(state): State<EnrollmentAppState<R>>,
) -> EnrollmentResult<Json<Vec<CourseResponse>>>
where
    R: SubmissionRepository + CourseRepository + Clone + Send + Sync + 'static,
{
    let use_case = CourseCatalogUseCase::new(state.repo.clone(), state.config.clone());
    let courses = use_case.list().await?;

    Ok(Json(courses.into_iter().map(CourseResponse::from).collect()))
}

/// POST /admin/api/courses
pub async fn update_courses<R>(
    State(state): State<EnrollmentAppState<R>>,
    payload: Result<Json<Vec<CourseUpdateRequest>>, JsonRejection>,
) -> EnrollmentResult<Json<BulkUpdateResponse>>
where
    R: SubmissionRepository + CourseRepository + Clone + Send + Sync + 'static,
{
    let Json(entries) =
        payload.map_err(|_| EnrollmentError::validation("Invalid course payload"))?;

    let use_case = CourseCatalogUseCase::new(state.repo.clone(), state.config.clone());
    let outcome = use_case
        .bulk_update(entries.into_iter().map(Into::into).collect())
        .await?;

    Ok(Json(outcome.into()))
}
