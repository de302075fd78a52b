//! Course Catalog Use Cases

use crate::application::config::{EnrollmentConfig, UnidentifiedCoursePolicy};
use crate::domain::entities::Course;
use crate::domain::repository::CourseRepository;
use crate::domain::value_objects::CourseDraft;
use crate::error::EnrollmentResult;
use std::sync::Arc;

/// One entry of a bulk update, as received
#[derive(Debug, Clone)]
pub struct CourseEntry {
    pub id: Option<i64>,
    pub name: String,
    pub price: f64,
    pub duration: String,
    pub syllabus: String,
    pub is_free_trial: bool,
    pub is_charity: bool,
}

/// Counts reported back after a bulk update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkUpdateOutcome {
    pub updated: usize,
    pub created: usize,
    pub skipped: usize,
}

/// Course Catalog Use Case
pub struct CourseCatalogUseCase<R>
where
    R: CourseRepository,
{
    repo: Arc<R>,
    config: Arc<EnrollmentConfig>,
}

impl<R> CourseCatalogUseCase<R>
where
    R: CourseRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<EnrollmentConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn list(&self) -> EnrollmentResult<Vec<Course>> {
        self.repo.list().await
    }

    /// Overwrite existing courses from `entries`.
    ///
    /// Every entry is validated before anything is written, so one bad price
    /// rejects the whole batch.
    pub async fn bulk_update(&self, entries: Vec<CourseEntry>) -> EnrollmentResult<BulkUpdateOutcome> {
        let drafts = entries
            .into_iter()
            .map(|e| {
                let draft = CourseDraft::new(
                    e.name,
                    e.price,
                    e.duration,
                    e.syllabus,
                    e.is_free_trial,
                    e.is_charity,
                )?;
                Ok((e.id, draft))
            })
            .collect::<EnrollmentResult<Vec<_>>>()?;

        let mut outcome = BulkUpdateOutcome::default();
        for (id, draft) in drafts {
            match (id, self.config.course_policy) {
                (Some(id), _) => {
                    if self.repo.update(&Course::from_draft(id, draft)).await? {
                        outcome.updated += 1;
                    } else {
                        tracing::debug!(course_id = id, "Skipping unknown course");
                        outcome.skipped += 1;
                    }
                }
                (None, UnidentifiedCoursePolicy::Create) => {
                    let course = self.repo.create(&draft).await?;
                    tracing::info!(course_id = course.id, name = %course.name, "Course created");
                    outcome.created += 1;
                }
                (None, UnidentifiedCoursePolicy::Skip) => {
                    outcome.skipped += 1;
                }
            }
        }

        tracing::info!(
            updated = outcome.updated,
            created = outcome.created,
            skipped = outcome.skipped,
            "Courses updated"
        );

        Ok(outcome)
    }
}
