//! Application Configuration
//!
//! Configuration for the enrollment application layer.

/// What a bulk course update does with entries that carry no ID
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnidentifiedCoursePolicy {
    /// Ignore the entry and count it as skipped
    #[default]
    Skip,
    /// Append it to the catalog with the next sequential ID
    Create,
}

/// Enrollment application configuration
#[derive(Debug, Clone, Default)]
pub struct EnrollmentConfig {
    /// Handling of course entries without an ID
    pub course_policy: UnidentifiedCoursePolicy,
}

impl EnrollmentConfig {
    /// Config that lets bulk updates add new courses
    pub fn creating_courses() -> Self {
        Self {
            course_policy: UnidentifiedCoursePolicy::Create,
        }
    }
}
