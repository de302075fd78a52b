//! JSON File Store
//!
//! Submissions and courses live in pretty-printed JSON arrays under the data
//! directory. Every change is a full load-modify-save of one file, serialized
//! by that file's mutex. The previous submissions file is copied into the
//! backup rotation before each rewrite.

use crate::domain::entities::{Course, Submission};
use crate::domain::repository::{CourseRepository, SubmissionRepository};
use crate::domain::value_objects::CourseDraft;
use crate::error::{EnrollmentError, EnrollmentResult};
use crate::infra::record::{CourseRecord, SubmissionRecord, into_submissions};
use crate::infra::seed::default_courses;
use crate::infra::{ReadPolicy, StoreOptions};
use chrono::Utc;
use kernel::id::SubmissionId;
use platform::backup::{BackupError, BackupRotation, SnapshotSource};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

pub const SUBMISSIONS_FILE: &str = "submissions.json";
pub const COURSES_FILE: &str = "courses.json";
pub const BACKUP_DIR: &str = "backups";
pub const BACKUP_PREFIX: &str = "submissions";

/// File-backed repository
#[derive(Clone)]
pub struct JsonFileStore {
    inner: Arc<Inner>,
}

struct Inner {
    submissions_path: PathBuf,
    courses_path: PathBuf,
    backups: BackupRotation,
    read_policy: ReadPolicy,
    submissions_lock: Mutex<()>,
    courses_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open the store in `data_dir`, creating the directory, an empty
    /// submissions file and the default course catalog when missing.
    pub async fn open(data_dir: impl Into<PathBuf>, options: StoreOptions) -> EnrollmentResult<Self> {
        let data_dir = data_dir.into();
        tokio::fs::create_dir_all(&data_dir).await?;

        let store = Self {
            inner: Arc::new(Inner {
                submissions_path: data_dir.join(SUBMISSIONS_FILE),
                courses_path: data_dir.join(COURSES_FILE),
                backups: BackupRotation::new(data_dir.join(BACKUP_DIR), BACKUP_PREFIX, "json")
                    .with_retention(options.backup_retention),
                read_policy: options.read_policy,
                submissions_lock: Mutex::new(()),
                courses_lock: Mutex::new(()),
            }),
        };

        if !tokio::fs::try_exists(&store.inner.submissions_path).await? {
            write_atomic(&store.inner.submissions_path, b"[]").await?;
        }

        if !tokio::fs::try_exists(&store.inner.courses_path).await? {
            let courses: Vec<CourseRecord> = default_courses()
                .into_iter()
                .zip(1..)
                .map(|(draft, id)| CourseRecord::from(&Course::from_draft(id, draft)))
                .collect();
            write_json(&store.inner.courses_path, &courses).await?;
            tracing::info!(count = courses.len(), "Seeded default courses");
        }

        tracing::info!(dir = %data_dir.display(), "JSON store ready");
        Ok(store)
    }

    pub fn backups(&self) -> &BackupRotation {
        &self.inner.backups
    }

    /// All submissions in file order
    pub async fn load(&self) -> EnrollmentResult<Vec<Submission>> {
        let _guard = self.inner.submissions_lock.lock().await;
        self.read_submissions().await
    }

    /// Replace the whole collection, backing up the previous file first
    pub async fn save(&self, all: &[Submission]) -> EnrollmentResult<()> {
        let _guard = self.inner.submissions_lock.lock().await;
        self.write_submissions(all).await
    }

    async fn read_submissions(&self) -> EnrollmentResult<Vec<Submission>> {
        read_submissions_file(&self.inner.submissions_path, self.inner.read_policy).await
    }

    async fn write_submissions(&self, all: &[Submission]) -> EnrollmentResult<()> {
        if tokio::fs::try_exists(&self.inner.submissions_path).await? {
            self.inner
                .backups
                .copy_file(&self.inner.submissions_path, Utc::now())
                .await?;
        }

        let records: Vec<SubmissionRecord> = all.iter().map(SubmissionRecord::from).collect();
        write_json(&self.inner.submissions_path, &records).await
    }

    async fn read_courses(&self) -> EnrollmentResult<Vec<Course>> {
        let records: Vec<CourseRecord> =
            read_collection(&self.inner.courses_path, self.inner.read_policy).await?;
        let mut courses: Vec<Course> = records.into_iter().map(Course::from).collect();
        courses.sort_by_key(|c| c.id);
        Ok(courses)
    }

    async fn write_courses(&self, courses: &[Course]) -> EnrollmentResult<()> {
        let records: Vec<CourseRecord> = courses.iter().map(CourseRecord::from).collect();
        write_json(&self.inner.courses_path, &records).await
    }
}

/// Read a JSON array, applying the read policy to missing or broken files
async fn read_collection<T>(path: &Path, policy: ReadPolicy) -> EnrollmentResult<Vec<T>>
where
    T: DeserializeOwned,
{
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return unreadable(path, policy, e.to_string()),
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    match serde_json::from_slice(&bytes) {
        Ok(items) => Ok(items),
        Err(e) => unreadable(path, policy, e.to_string()),
    }
}

/// Read a `submissions.json` file without opening a store around it
pub async fn read_submissions_file(path: &Path, policy: ReadPolicy) -> EnrollmentResult<Vec<Submission>> {
    let records: Vec<SubmissionRecord> = read_collection(path, policy).await?;
    Ok(into_submissions(records))
}

fn unreadable<T>(path: &Path, policy: ReadPolicy, reason: String) -> EnrollmentResult<Vec<T>> {
    match policy {
        ReadPolicy::Lenient => {
            tracing::warn!(
                path = %path.display(),
                reason = %reason,
                "Unreadable store file, treating as empty"
            );
            Ok(Vec::new())
        }
        ReadPolicy::Strict => Err(EnrollmentError::StorageUnreadable(format!(
            "{}: {reason}",
            path.display()
        ))),
    }
}

async fn write_json<T: Serialize>(path: &Path, items: &[T]) -> EnrollmentResult<()> {
    let bytes = serde_json::to_vec_pretty(items)?;
    write_atomic(path, &bytes).await
}

/// Write to a sibling temp file, then rename over the target
async fn write_atomic(path: &Path, bytes: &[u8]) -> EnrollmentResult<()> {
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

impl SubmissionRepository for JsonFileStore {
    async fn load(&self) -> EnrollmentResult<Vec<Submission>> {
        JsonFileStore::load(self).await
    }

    async fn insert(&self, submission: &Submission) -> EnrollmentResult<()> {
        let _guard = self.inner.submissions_lock.lock().await;
        let mut all = self.read_submissions().await?;
        all.push(submission.clone());
        self.write_submissions(&all).await
    }

    async fn get(&self, id: &SubmissionId) -> EnrollmentResult<Option<Submission>> {
        let all = JsonFileStore::load(self).await?;
        Ok(all.into_iter().find(|s| &s.id == id))
    }

    async fn update<F>(&self, id: &SubmissionId, mutator: F) -> EnrollmentResult<Option<Submission>>
    where
        F: FnOnce(&mut Submission) + Send,
    {
        let _guard = self.inner.submissions_lock.lock().await;
        let mut all = self.read_submissions().await?;

        let Some(target) = all.iter_mut().find(|s| &s.id == id) else {
            return Ok(None);
        };
        mutator(target);
        let updated = target.clone();

        self.write_submissions(&all).await?;
        Ok(Some(updated))
    }

    async fn delete(&self, id: &SubmissionId) -> EnrollmentResult<bool> {
        let _guard = self.inner.submissions_lock.lock().await;
        let mut all = self.read_submissions().await?;

        let before = all.len();
        all.retain(|s| &s.id != id);
        if all.len() == before {
            return Ok(false);
        }

        self.write_submissions(&all).await?;
        Ok(true)
    }
}

impl CourseRepository for JsonFileStore {
    async fn list(&self) -> EnrollmentResult<Vec<Course>> {
        let _guard = self.inner.courses_lock.lock().await;
        self.read_courses().await
    }

    async fn update(&self, course: &Course) -> EnrollmentResult<bool> {
        let _guard = self.inner.courses_lock.lock().await;
        let mut courses = self.read_courses().await?;

        let Some(existing) = courses.iter_mut().find(|c| c.id == course.id) else {
            return Ok(false);
        };
        *existing = course.clone();

        self.write_courses(&courses).await?;
        Ok(true)
    }

    async fn create(&self, draft: &CourseDraft) -> EnrollmentResult<Course> {
        let _guard = self.inner.courses_lock.lock().await;
        let mut courses = self.read_courses().await?;

        let next_id = courses.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let course = Course::from_draft(next_id, draft.clone());
        courses.push(course.clone());

        self.write_courses(&courses).await?;
        Ok(course)
    }
}

impl SnapshotSource for JsonFileStore {
    async fn snapshot(&self) -> Result<String, BackupError> {
        let _guard = self.inner.submissions_lock.lock().await;
        if !tokio::fs::try_exists(&self.inner.submissions_path).await? {
            tokio::fs::write(&self.inner.submissions_path, b"[]").await?;
        }
        self.inner
            .backups
            .copy_file(&self.inner.submissions_path, Utc::now())
            .await
    }
}
