//! Submit Registration Use Case

use crate::domain::entities::Submission;
use crate::domain::repository::SubmissionRepository;
use crate::domain::value_objects::{RawRegistration, RegistrationForm};
use crate::error::EnrollmentResult;
use chrono::Utc;
use kernel::id::SubmissionId;
use std::sync::Arc;

/// Submit Registration Use Case
pub struct SubmitRegistrationUseCase<R>
where
    R: SubmissionRepository,
{
    repo: Arc<R>,
}

impl<R> SubmitRegistrationUseCase<R>
where
    R: SubmissionRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, raw: RawRegistration) -> EnrollmentResult<SubmissionId> {
        let form = RegistrationForm::parse(raw)?;
        let submission = Submission::register(form, Utc::now());

        self.repo.insert(&submission).await?;

        tracing::info!(
            submission_id = %submission.id,
            charity = submission.is_charity,
            "New submission received"
        );

        Ok(submission.id)
    }
}
