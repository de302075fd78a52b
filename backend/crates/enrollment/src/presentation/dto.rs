//! API DTOs (Data Transfer Objects)

use crate::application::courses::{BulkUpdateOutcome, CourseEntry};
use crate::domain::entities::{Course, Submission};
use crate::domain::value_objects::{RawRegistration, SubmissionFilter, TrashFilter, TypeFilter};
use crate::infra::flag::deserialize_flag;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Only JSON strings count as text; anything else reads as absent
fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Subjects must be an array; non-string items are dropped
fn subjects<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

/// Prices arrive as numbers or as form text; anything unparsable becomes NaN
/// and fails validation
fn price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        Value::Null => 0.0,
        _ => f64::NAN,
    })
}

/// Request for POST /submit
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    #[serde(default, deserialize_with = "text")]
    pub parent_name: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub parent_email: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub parent_phone: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub student_name: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub student_dob: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub relationship: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub specific_needs: Option<String>,
    #[serde(default, deserialize_with = "subjects")]
    pub subjects: Option<Vec<String>>,
    #[serde(default, deserialize_with = "text")]
    pub discovery_source: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_charity: bool,
}

impl From<SubmitRequest> for RawRegistration {
    fn from(req: SubmitRequest) -> Self {
        Self {
            parent_name: req.parent_name,
            parent_email: req.parent_email,
            parent_phone: req.parent_phone,
            student_name: req.student_name,
            student_dob: req.student_dob,
            relationship: req.relationship,
            specific_needs: req.specific_needs,
            subjects: req.subjects,
            discovery_source: req.discovery_source,
            is_charity: req.is_charity,
        }
    }
}

/// Plain `{ "ok": true }` acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// Acknowledgement for trash / restore / permanent delete
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubmissionActionResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trashed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restored: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
}

impl SubmissionActionResponse {
    pub fn trashed() -> Self {
        Self {
            ok: true,
            trashed: Some(true),
            ..Default::default()
        }
    }

    pub fn restored() -> Self {
        Self {
            ok: true,
            restored: Some(true),
            ..Default::default()
        }
    }

    pub fn deleted() -> Self {
        Self {
            ok: true,
            deleted: Some(true),
            ..Default::default()
        }
    }
}

/// Query for GET /admin/submissions
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub trashed: Option<String>,
    /// Older name for `trashed`
    pub archived: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl ListQuery {
    pub fn filter(&self) -> SubmissionFilter {
        let trash = self.trashed.as_deref().or(self.archived.as_deref());
        SubmissionFilter::new(
            TrashFilter::from_query(trash),
            TypeFilter::from_query(self.kind.as_deref()),
        )
    }
}

/// One submission as shown to the admin panel
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub id: String,
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
    pub is_trashed: bool,
    pub trashed_at: Option<String>,
}

impl From<Submission> for SubmissionResponse {
    fn from(s: Submission) -> Self {
        let is_trashed = s.is_trashed();
        Self {
            id: s.id.into_string(),
            parent_name: s.parent_name,
            parent_email: s.parent_email,
            parent_phone: s.parent_phone,
            student_name: s.student_name,
            student_dob: s.student_dob,
            relationship: s.relationship,
            specific_needs: s.specific_needs,
            subjects: s.subjects,
            discovery_source: s.discovery_source,
            is_charity: s.is_charity,
            submitted_at: s.submitted_at,
            is_trashed,
            trashed_at: s.trashed_at,
        }
    }
}

/// One catalog entry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub duration: String,
    pub syllabus: String,
    pub is_free_trial: bool,
    pub is_charity: bool,
}

impl From<Course> for CourseResponse {
    fn from(c: Course) -> Self {
        Self {
            id: c.id,
            name: c.name,
            price: c.price,
            duration: c.duration,
            syllabus: c.syllabus,
            is_free_trial: c.is_free_trial,
            is_charity: c.is_charity,
        }
    }
}

/// One entry of the POST /admin/api/courses body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseUpdateRequest {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "price")]
    pub price: f64,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub syllabus: String,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_free_trial: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_charity: bool,
}

impl From<CourseUpdateRequest> for CourseEntry {
    fn from(req: CourseUpdateRequest) -> Self {
        Self {
            id: req.id,
            name: req.name,
            price: req.price,
            duration: req.duration,
            syllabus: req.syllabus,
            is_free_trial: req.is_free_trial,
            is_charity: req.is_charity,
        }
    }
}

/// Response for POST /admin/api/courses
#[derive(Debug, Clone, Serialize)]
pub struct BulkUpdateResponse {
    pub ok: bool,
    pub updated: usize,
    pub created: usize,
    pub skipped: usize,
}

impl From<BulkUpdateOutcome> for BulkUpdateResponse {
    fn from(outcome: BulkUpdateOutcome) -> Self {
        Self {
            ok: true,
            updated: outcome.updated,
            created: outcome.created,
            skipped: outcome.skipped,
        }
    }
}
