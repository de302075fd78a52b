//! JSON file record shapes
//!
//! Reading accepts field names written by older versions of the intake form
//! (`isArchived`, `archivedAt`, `createdAt`, `isChariity`) and loosely typed
//! values. Writing always uses the current names.

use crate::domain::entities::{Course, Submission};
use crate::infra::flag::{deserialize_flag, deserialize_opt_flag};
use kernel::id::SubmissionId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Subjects are a list today; some old records hold one comma-joined string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum SubjectsField {
    List(Vec<Value>),
    Joined(String),
}

impl SubjectsField {
    fn into_vec(self) -> Vec<String> {
        match self {
            SubjectsField::List(items) => items.iter().filter_map(text_of).collect(),
            SubjectsField::Joined(joined) => split_joined(&joined),
        }
    }
}

/// Split a comma-joined subject column, dropping blanks.
///
/// Commas are the column separator, so a single tag can never hold one;
/// `Subjects::new` splits such tags on the way in.
pub fn split_joined(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text_of(&value).unwrap_or_default())
}

fn lenient_opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text_of(&value))
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text_of(&value)
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty()))
}

/// One entry of `submissions.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    // Missing or blank ids are derived from the content; see `into_submissions`
    #[serde(default, deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub parent_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub parent_email: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub parent_phone: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub student_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub student_dob: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub relationship: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub specific_needs: String,
    #[serde(default, serialize_with = "serialize_subjects", deserialize_with = "deserialize_subjects")]
    pub subjects: Vec<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub discovery_source: String,
    #[serde(default, deserialize_with = "deserialize_opt_flag")]
    pub is_charity: Option<bool>,
    #[serde(default, rename = "isChariity", deserialize_with = "deserialize_opt_flag", skip_serializing)]
    pub is_chariity: Option<bool>,
    #[serde(default, deserialize_with = "lenient_opt_text")]
    pub submitted_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_text", skip_serializing)]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_trashed: bool,
    #[serde(default, deserialize_with = "deserialize_flag", skip_serializing)]
    pub is_archived: bool,
    #[serde(default, deserialize_with = "lenient_opt_text")]
    pub trashed_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_text", skip_serializing)]
    pub archived_at: Option<String>,
}

fn serialize_subjects<S>(subjects: &[String], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(subjects)
}

fn deserialize_subjects<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let field = Option::<SubjectsField>::deserialize(deserializer)?;
    Ok(field.map(SubjectsField::into_vec).unwrap_or_default())
}

impl From<&Submission> for SubmissionRecord {
    fn from(s: &Submission) -> Self {
        Self {
            id: Some(s.id.as_str().to_string()),
            parent_name: s.parent_name.clone(),
            parent_email: s.parent_email.clone(),
            parent_phone: s.parent_phone.clone(),
            student_name: s.student_name.clone(),
            student_dob: s.student_dob.clone(),
            relationship: s.relationship.clone(),
            specific_needs: s.specific_needs.clone(),
            subjects: s.subjects.clone(),
            discovery_source: s.discovery_source.clone(),
            is_charity: Some(s.is_charity),
            is_chariity: None,
            submitted_at: Some(s.submitted_at.clone()),
            created_at: None,
            is_trashed: s.is_trashed(),
            is_archived: false,
            trashed_at: s.trashed_at.clone(),
            archived_at: None,
        }
    }
}

impl SubmissionRecord {
    /// Stable text identifying an id-less record by what it holds.
    /// `ordinal` separates records with identical content.
    fn content_seed(&self, ordinal: usize) -> String {
        [
            self.parent_name.as_str(),
            &self.parent_email,
            &self.parent_phone,
            &self.student_name,
            &self.student_dob,
            self.submitted_at.as_deref().or(self.created_at.as_deref()).unwrap_or(""),
            &self.subjects.join(","),
            &ordinal.to_string(),
        ]
        .join("\u{1f}")
    }
}

/// Convert a whole file's records.
///
/// A record without an id gets one derived from its content, so every read
/// of the same file yields the same ids. The JSON store persists them on
/// its next write.
pub fn into_submissions(records: Vec<SubmissionRecord>) -> Vec<Submission> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    records
        .into_iter()
        .map(|mut record| {
            if record.id.is_none() {
                let base = record.content_seed(0);
                let ordinal = seen.entry(base.clone()).or_insert(0);
                let seed = if *ordinal == 0 { base } else { record.content_seed(*ordinal) };
                *ordinal += 1;
                record.id = Some(SubmissionId::derived(&seed).into_string());
            }
            Submission::from(record)
        })
        .collect()
}

impl From<SubmissionRecord> for Submission {
    fn from(r: SubmissionRecord) -> Self {
        let id = match r.id.clone() {
            Some(id) => SubmissionId::from(id),
            None => SubmissionId::derived(&r.content_seed(0)),
        };

        let submitted_at = r.submitted_at.or(r.created_at).unwrap_or_default();
        let trashed_at = Submission::stored_trash_state(
            r.is_trashed || r.is_archived,
            r.trashed_at.or(r.archived_at),
            &submitted_at,
        );

        Self {
            id,
            parent_name: r.parent_name,
            parent_email: r.parent_email,
            parent_phone: r.parent_phone,
            student_name: r.student_name,
            student_dob: r.student_dob,
            relationship: r.relationship,
            specific_needs: r.specific_needs,
            subjects: r.subjects,
            discovery_source: r.discovery_source,
            is_charity: r.is_charity.or(r.is_chariity).unwrap_or(false),
            submitted_at,
            trashed_at,
        }
    }
}

/// One entry of `courses.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    pub id: i64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub duration: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub syllabus: String,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_free_trial: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_charity: bool,
}

impl From<&Course> for CourseRecord {
    fn from(c: &Course) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            price: c.price,
            duration: c.duration.clone(),
            syllabus: c.syllabus.clone(),
            is_free_trial: c.is_free_trial,
            is_charity: c.is_charity,
        }
    }
}

impl From<CourseRecord> for Course {
    fn from(r: CourseRecord) -> Self {
        Self {
            id: r.id,
            name: r.name,
            price: r.price,
            duration: r.duration,
            syllabus: r.syllabus,
            is_free_trial: r.is_free_trial,
            is_charity: r.is_charity,
        }
    }
}
