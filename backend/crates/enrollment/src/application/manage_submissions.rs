//! Manage Submissions Use Case
//!
//! Admin-side listing and lifecycle operations: trash, restore, purge.

use crate::domain::entities::Submission;
use crate::domain::repository::SubmissionRepository;
use crate::domain::services;
use crate::domain::value_objects::SubmissionFilter;
use crate::error::{EnrollmentError, EnrollmentResult};
use chrono::Utc;
use kernel::id::SubmissionId;
use std::sync::Arc;

/// Manage Submissions Use Case
pub struct ManageSubmissionsUseCase<R>
where
    R: SubmissionRepository,
{
    repo: Arc<R>,
}

impl<R> ManageSubmissionsUseCase<R>
where
    R: SubmissionRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Filtered submissions, newest first
    pub async fn list(&self, filter: SubmissionFilter) -> EnrollmentResult<Vec<Submission>> {
        let all = self.repo.load().await?;
        Ok(services::select(all, filter))
    }

    pub async fn get(&self, id: &SubmissionId) -> EnrollmentResult<Submission> {
        self.repo.get(id).await?.ok_or(EnrollmentError::NotFound)
    }

    /// Move a submission to the trash
    pub async fn trash(&self, id: &SubmissionId) -> EnrollmentResult<Submission> {
        let now = Utc::now();
        let trashed = self
            .repo
            .update(id, move |s| s.trash(now))
            .await?
            .ok_or(EnrollmentError::NotFound)?;

        tracing::info!(submission_id = %id, "Submission trashed");
        Ok(trashed)
    }

    /// Bring a trashed submission back
    pub async fn restore(&self, id: &SubmissionId) -> EnrollmentResult<Submission> {
        let restored = self
            .repo
            .update(id, |s| s.restore())
            .await?
            .ok_or(EnrollmentError::NotFound)?;

        tracing::info!(submission_id = %id, "Submission restored");
        Ok(restored)
    }

    /// Remove a submission for good. Works whether or not it is trashed.
    pub async fn purge(&self, id: &SubmissionId) -> EnrollmentResult<()> {
        if !self.repo.delete(id).await? {
            return Err(EnrollmentError::NotFound);
        }

        tracing::info!(submission_id = %id, "Submission permanently deleted");
        Ok(())
    }
}
