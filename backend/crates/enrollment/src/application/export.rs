//! CSV Export Use Case

use crate::domain::entities::Submission;
use crate::domain::repository::SubmissionRepository;
use crate::domain::services;
use crate::domain::value_objects::SubmissionFilter;
use crate::error::EnrollmentResult;
use std::sync::Arc;

pub const CSV_HEADERS: [&str; 14] = [
    "ID",
    "Submitted At",
    "Parent Name",
    "Parent Email",
    "Parent Phone",
    "Student Name",
    "Student DOB",
    "Relationship",
    "Subjects",
    "Discovery Source",
    "Charity",
    "Specific Needs",
    "Trashed",
    "Trashed At",
];

/// Quote a field if it contains a comma, quote or line break
pub fn escape_csv(value: &str) -> String {
    if value.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

fn row(s: &Submission) -> String {
    let subjects = s.subjects.join(", ");
    let cells: [&str; 14] = [
        s.id.as_str(),
        &s.submitted_at,
        &s.parent_name,
        &s.parent_email,
        &s.parent_phone,
        &s.student_name,
        &s.student_dob,
        &s.relationship,
        &subjects,
        &s.discovery_source,
        yes_no(s.is_charity),
        &s.specific_needs,
        yes_no(s.is_trashed()),
        s.trashed_at.as_deref().unwrap_or(""),
    ];
    cells.iter().map(|c| escape_csv(c)).collect::<Vec<_>>().join(",")
}

/// Header line plus one line per submission, no trailing newline
pub fn render_csv(submissions: &[Submission]) -> String {
    let mut lines = Vec::with_capacity(submissions.len() + 1);
    lines.push(CSV_HEADERS.join(","));
    lines.extend(submissions.iter().map(row));
    lines.join("\n")
}

/// Export Submissions Use Case
pub struct ExportSubmissionsUseCase<R>
where
    R: SubmissionRepository,
{
    repo: Arc<R>,
}

impl<R> ExportSubmissionsUseCase<R>
where
    R: SubmissionRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Every submission, trashed or not, newest first
    pub async fn execute(&self) -> EnrollmentResult<String> {
        let all = services::select(self.repo.load().await?, SubmissionFilter::all());
        tracing::info!(rows = all.len(), "Exporting submissions");
        Ok(render_csv(&all))
    }
}
