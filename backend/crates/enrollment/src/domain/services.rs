//! Domain Services
//!
//! Pure listing logic for submissions.

use crate::domain::entities::Submission;
use crate::domain::value_objects::SubmissionFilter;

/// Sort newest first.
///
/// Submissions whose timestamp does not parse sort as the oldest; ties keep
/// storage order.
pub fn sort_newest_first(submissions: &mut [Submission]) {
    submissions.sort_by_key(|s| std::cmp::Reverse(s.submitted_at_parsed()));
}

/// Apply a listing filter and order the result newest first
pub fn select(submissions: Vec<Submission>, filter: SubmissionFilter) -> Vec<Submission> {
    let mut selected: Vec<Submission> = submissions
        .into_iter()
        .filter(|s| filter.matches(s))
        .collect();
    sort_newest_first(&mut selected);
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{RawRegistration, RegistrationForm, TrashFilter, TypeFilter};
    use chrono::{TimeZone, Utc};

    fn submission(student: &str, submitted_at: &str, charity: bool) -> Submission {
        let raw = RawRegistration {
            parent_name: Some("Parent".into()),
            parent_email: Some("p@example.com".into()),
            parent_phone: Some("123".into()),
            student_name: Some(student.into()),
            student_dob: Some("2012-01-01".into()),
            subjects: Some(vec!["Maths".into()]),
            is_charity: charity,
            ..Default::default()
        };
        let mut s = Submission::register(RegistrationForm::parse(raw).unwrap(), Utc::now());
        s.submitted_at = submitted_at.to_string();
        s
    }

    #[test]
    fn test_newest_first_with_unparsable_last() {
        let mut list = vec![
            submission("old", "2026-01-01T00:00:00.000Z", false),
            submission("broken", "not a date", false),
            submission("new", "2026-06-01T00:00:00.000Z", false),
        ];
        sort_newest_first(&mut list);

        let order: Vec<&str> = list.iter().map(|s| s.student_name.as_str()).collect();
        assert_eq!(order, ["new", "old", "broken"]);
    }

    #[test]
    fn test_select_by_trash_and_type() {
        let mut trashed = submission("trashed", "2026-02-01T00:00:00.000Z", true);
        trashed.trash(Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap());

        let list = vec![
            submission("standard", "2026-01-01T00:00:00.000Z", false),
            submission("charity", "2026-01-02T00:00:00.000Z", true),
            trashed,
        ];

        let active = select(list.clone(), SubmissionFilter::default());
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].student_name, "charity");

        let charity = select(
            list.clone(),
            SubmissionFilter::new(TrashFilter::Active, TypeFilter::Charity),
        );
        assert_eq!(charity.len(), 1);

        let bin = select(
            list.clone(),
            SubmissionFilter::new(TrashFilter::Trashed, TypeFilter::Any),
        );
        assert_eq!(bin.len(), 1);
        assert_eq!(bin[0].student_name, "trashed");

        let standard_everywhere = select(
            list,
            SubmissionFilter::new(TrashFilter::All, TypeFilter::Standard),
        );
        assert_eq!(standard_everywhere.len(), 1);
    }
}
