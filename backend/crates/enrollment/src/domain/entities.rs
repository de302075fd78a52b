//! Domain Entities
//!
//! Core business entities for the enrollment domain.

use chrono::{DateTime, SecondsFormat, Utc};
use kernel::id::SubmissionId;

use crate::domain::value_objects::{CourseDraft, RegistrationForm};

/// Format an instant the way every stored timestamp is written
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Submission entity - one registration form record
///
/// Timestamps are kept as text: records written by older tooling may carry
/// values that do not parse, and those must survive a load/save cycle.
/// A submission is trashed exactly when `trashed_at` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub id: SubmissionId,
    pub parent_name: String,
    pub parent_email: String,
    pub parent_phone: String,
    pub student_name: String,
    pub student_dob: String,
    pub relationship: String,
    pub specific_needs: String,
    pub subjects: Vec<String>,
    pub discovery_source: String,
    pub is_charity: bool,
    pub submitted_at: String,
    /// Set iff the submission is trashed
    pub trashed_at: Option<String>,
}

impl Submission {
    /// Create a new, active submission from a validated form
    pub fn register(form: RegistrationForm, now: DateTime<Utc>) -> Self {
        Self {
            id: SubmissionId::new(),
            parent_name: form.parent_name,
            parent_email: form.parent_email,
            parent_phone: form.parent_phone,
            student_name: form.student_name,
            student_dob: form.student_dob,
            relationship: form.relationship,
            specific_needs: form.specific_needs,
            subjects: form.subjects.into_vec(),
            discovery_source: form.discovery_source,
            is_charity: form.is_charity,
            submitted_at: format_timestamp(now),
            trashed_at: None,
        }
    }

    /// Reconcile a stored `(isTrashed, trashedAt)` pair.
    ///
    /// A trashed record without a timestamp gets its submission time as the
    /// trash time; an active record never keeps one.
    pub fn stored_trash_state(
        is_trashed: bool,
        trashed_at: Option<String>,
        submitted_at: &str,
    ) -> Option<String> {
        if is_trashed {
            Some(trashed_at.unwrap_or_else(|| submitted_at.to_string()))
        } else {
            None
        }
    }

    pub fn is_trashed(&self) -> bool {
        self.trashed_at.is_some()
    }

    /// Soft-delete. Trashing again just rewrites the timestamp.
    pub fn trash(&mut self, now: DateTime<Utc>) {
        self.trashed_at = Some(format_timestamp(now));
    }

    pub fn restore(&mut self) {
        self.trashed_at = None;
    }

    /// Parsed submission time, `None` when the stored text is not a timestamp
    pub fn submitted_at_parsed(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.submitted_at)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

/// Course entity - one catalog entry
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub duration: String,
    pub syllabus: String,
    pub is_free_trial: bool,
    pub is_charity: bool,
}

impl Course {
    pub fn from_draft(id: i64, draft: CourseDraft) -> Self {
        Self {
            id,
            name: draft.name,
            price: draft.price,
            duration: draft.duration,
            syllabus: draft.syllabus,
            is_free_trial: draft.is_free_trial,
            is_charity: draft.is_charity,
        }
    }

    /// Overwrite every editable field
    pub fn apply(&mut self, draft: CourseDraft) {
        *self = Self::from_draft(self.id, draft);
    }
}
