//! Domain Value Objects
//!
//! Immutable, validated value types for the enrollment domain.

use crate::error::{EnrollmentError, EnrollmentResult};

const MISSING_FIELDS: &str = "Missing required fields";

/// Registration fields exactly as received, before validation
#[derive(Debug, Clone, Default)]
pub struct RawRegistration {
    pub parent_name: Option<String>,
    pub parent_email: Option<String>,
    pub parent_phone: Option<String>,
    pub student_name: Option<String>,
    pub student_dob: Option<String>,
    pub relationship: Option<String>,
    pub specific_needs: Option<String>,
    pub subjects: Option<Vec<String>>,
    pub discovery_source: Option<String>,
    pub is_charity: bool,
}

/// Non-empty, de-duplicated list of subject tags in submission order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subjects(Vec<String>);

impl Subjects {
    /// Trim tags, drop blanks and repeats. `None` if nothing is left.
    ///
    /// A tag containing commas is split into several: the SQLite column and
    /// older JSON files join subjects with commas.
    pub fn new<I, S>(tags: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut subjects: Vec<String> = Vec::new();
        for tag in tags {
            for part in tag.as_ref().split(',') {
                let part = part.trim();
                if !part.is_empty() && !subjects.iter().any(|s| s == part) {
                    subjects.push(part.to_string());
                }
            }
        }

        if subjects.is_empty() {
            None
        } else {
            Some(Self(subjects))
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

/// A registration that passed intake validation
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub parent_name: String,
    pub parent_email: String,
    pub parent_phone: String,
    pub student_name: String,
    pub student_dob: String,
    pub relationship: String,
    pub specific_needs: String,
    pub subjects: Subjects,
    pub discovery_source: String,
    pub is_charity: bool,
}

impl RegistrationForm {
    /// Validate a raw registration.
    ///
    /// Parent name/email/phone and student name/date of birth must be
    /// non-blank and at least one subject must be given.
    pub fn parse(raw: RawRegistration) -> EnrollmentResult<Self> {
        let subjects = raw
            .subjects
            .and_then(Subjects::new)
            .ok_or_else(|| EnrollmentError::validation(MISSING_FIELDS))?;

        Ok(Self {
            parent_name: required(raw.parent_name)?,
            parent_email: required(raw.parent_email)?,
            parent_phone: required(raw.parent_phone)?,
            student_name: required(raw.student_name)?,
            student_dob: required(raw.student_dob)?,
            relationship: optional(raw.relationship),
            specific_needs: optional(raw.specific_needs),
            subjects,
            discovery_source: optional(raw.discovery_source),
            is_charity: raw.is_charity,
        })
    }
}

fn required(value: Option<String>) -> EnrollmentResult<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(EnrollmentError::validation(MISSING_FIELDS)),
    }
}

fn optional(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Which side of the trash a listing shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrashFilter {
    #[default]
    Active,
    Trashed,
    All,
}

impl TrashFilter {
    /// `"true"` selects the trash, `"all"` everything, anything else active
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("true") => TrashFilter::Trashed,
            Some("all") => TrashFilter::All,
            _ => TrashFilter::Active,
        }
    }
}

/// Charity / standard split of submissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    Any,
    Charity,
    Standard,
}

impl TypeFilter {
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("charity") => TypeFilter::Charity,
            Some("standard") => TypeFilter::Standard,
            _ => TypeFilter::Any,
        }
    }
}

/// Listing filter for the admin panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubmissionFilter {
    pub trash: TrashFilter,
    pub kind: TypeFilter,
}

impl SubmissionFilter {
    pub fn new(trash: TrashFilter, kind: TypeFilter) -> Self {
        Self { trash, kind }
    }

    pub fn all() -> Self {
        Self::new(TrashFilter::All, TypeFilter::Any)
    }

    pub fn matches(&self, submission: &crate::domain::entities::Submission) -> bool {
        let trash_ok = match self.trash {
            TrashFilter::Active => !submission.is_trashed(),
            TrashFilter::Trashed => submission.is_trashed(),
            TrashFilter::All => true,
        };
        let kind_ok = match self.kind {
            TypeFilter::Any => true,
            TypeFilter::Charity => submission.is_charity,
            TypeFilter::Standard => !submission.is_charity,
        };
        trash_ok && kind_ok
    }
}

/// Validated editable fields of a course
#[derive(Debug, Clone, PartialEq)]
pub struct CourseDraft {
    pub name: String,
    pub price: f64,
    pub duration: String,
    pub syllabus: String,
    pub is_free_trial: bool,
    pub is_charity: bool,
}

impl CourseDraft {
    pub fn new(
        name: impl Into<String>,
        price: f64,
        duration: impl Into<String>,
        syllabus: impl Into<String>,
        is_free_trial: bool,
        is_charity: bool,
    ) -> EnrollmentResult<Self> {
        if !price.is_finite() || price < 0.0 {
            return Err(EnrollmentError::validation(
                "Course price must be a non-negative number",
            ));
        }

        Ok(Self {
            name: name.into(),
            price,
            duration: duration.into(),
            syllabus: syllabus.into(),
            is_free_trial,
            is_charity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> RawRegistration {
        RawRegistration {
            parent_name: Some("Ann Smith".into()),
            parent_email: Some("ann@example.com".into()),
            parent_phone: Some("07700 900000".into()),
            student_name: Some("Sam Smith".into()),
            student_dob: Some("2012-04-01".into()),
            subjects: Some(vec!["Maths".into()]),
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_form_is_accepted() {
        let form = RegistrationForm::parse(complete()).unwrap();
        assert_eq!(form.parent_name, "Ann Smith");
        assert_eq!(form.subjects.as_slice(), ["Maths".to_string()]);
        assert_eq!(form.relationship, "");
    }

    #[test]
    fn test_blank_required_field_is_rejected() {
        let raw = RawRegistration {
            student_dob: Some("   ".into()),
            ..complete()
        };
        let err = RegistrationForm::parse(raw).unwrap_err();
        assert!(matches!(err, EnrollmentError::Validation(_)));

        let raw = RawRegistration {
            parent_phone: None,
            ..complete()
        };
        assert!(RegistrationForm::parse(raw).is_err());
    }

    #[test]
    fn test_subjects_required() {
        let raw = RawRegistration {
            subjects: Some(vec![]),
            ..complete()
        };
        assert!(RegistrationForm::parse(raw).is_err());

        let raw = RawRegistration {
            subjects: Some(vec!["  ".into()]),
            ..complete()
        };
        assert!(RegistrationForm::parse(raw).is_err());
    }

    #[test]
    fn test_subjects_trimmed_and_deduplicated() {
        let subjects = Subjects::new([" Maths", "English", "Maths ", ""]).unwrap();
        assert_eq!(subjects.as_slice(), ["Maths", "English"]);
    }

    #[test]
    fn test_subject_with_comma_is_split() {
        let subjects = Subjects::new(["Maths, Further", "English", "Further"]).unwrap();
        assert_eq!(subjects.as_slice(), ["Maths", "Further", "English"]);
    }

    #[test]
    fn test_filters_from_query() {
        assert_eq!(TrashFilter::from_query(None), TrashFilter::Active);
        assert_eq!(TrashFilter::from_query(Some("true")), TrashFilter::Trashed);
        assert_eq!(TrashFilter::from_query(Some("all")), TrashFilter::All);
        assert_eq!(TrashFilter::from_query(Some("false")), TrashFilter::Active);
        assert_eq!(TypeFilter::from_query(Some("charity")), TypeFilter::Charity);
        assert_eq!(TypeFilter::from_query(Some("standard")), TypeFilter::Standard);
        assert_eq!(TypeFilter::from_query(Some("other")), TypeFilter::Any);
    }

    #[test]
    fn test_course_price_must_be_non_negative() {
        assert!(CourseDraft::new("Maths", 15.0, "1 Hour", "", true, false).is_ok());
        assert!(CourseDraft::new("Maths", 0.0, "1 Hour", "", true, false).is_ok());
        assert!(CourseDraft::new("Maths", -1.0, "1 Hour", "", true, false).is_err());
        assert!(CourseDraft::new("Maths", f64::NAN, "1 Hour", "", true, false).is_err());
    }
}
