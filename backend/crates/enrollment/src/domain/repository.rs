//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in the infra layer.

use crate::domain::entities::{Course, Submission};
use crate::domain::value_objects::CourseDraft;
use crate::error::EnrollmentResult;
use kernel::id::SubmissionId;

/// Submission repository trait
#[trait_variant::make(SubmissionRepository: Send)]
pub trait LocalSubmissionRepository {
    /// All submissions in storage order
    async fn load(&self) -> EnrollmentResult<Vec<Submission>>;

    /// Append a new submission
    async fn insert(&self, submission: &Submission) -> EnrollmentResult<()>;

    /// Find a submission by ID
    async fn get(&self, id: &SubmissionId) -> EnrollmentResult<Option<Submission>>;

    /// Apply `mutator` to one submission and persist it.
    /// Returns the updated submission, or `None` if the ID is unknown.
    async fn update<F>(&self, id: &SubmissionId, mutator: F) -> EnrollmentResult<Option<Submission>>
    where
        F: FnOnce(&mut Submission) + Send;

    /// Remove a submission. Returns `false` if the ID is unknown.
    async fn delete(&self, id: &SubmissionId) -> EnrollmentResult<bool>;
}

/// Course catalog repository trait
#[trait_variant::make(CourseRepository: Send)]
pub trait LocalCourseRepository {
    /// All courses ordered by ID
    async fn list(&self) -> EnrollmentResult<Vec<Course>>;

    /// Overwrite an existing course. Returns `false` if the ID is unknown.
    async fn update(&self, course: &Course) -> EnrollmentResult<bool>;

    /// Add a course with the next sequential ID
    async fn create(&self, draft: &CourseDraft) -> EnrollmentResult<Course>;
}
