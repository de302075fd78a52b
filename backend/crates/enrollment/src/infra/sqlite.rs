//! SQLite Repository Implementations
//!
//! One row per submission and per course. Flags are 0/1 integers and the
//! subject list is a comma-joined string. Backups are taken on demand with
//! `VACUUM INTO`, not on every write.

use crate::domain::entities::{Course, Submission};
use crate::domain::repository::{CourseRepository, SubmissionRepository};
use crate::domain::value_objects::CourseDraft;
use crate::error::EnrollmentResult;
use crate::infra::flag;
use crate::infra::json_file::{BACKUP_DIR, BACKUP_PREFIX};
use crate::infra::record::split_joined;
use crate::infra::seed::default_courses;
use crate::infra::StoreOptions;
use chrono::Utc;
use kernel::id::SubmissionId;
use platform::backup::{BackupError, BackupRotation, SnapshotSource};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{SqliteConnection, SqlitePool};
use std::path::Path;
use std::str::FromStr;

const SUBMISSION_COLUMNS: &str = "id, parentName, parentEmail, parentPhone, studentName, \
     studentDob, relationship, specificNeeds, subjects, discoverySource, isCharity, \
     submittedAt, isTrashed, trashedAt";

/// SQLite-backed repository
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
    backups: BackupRotation,
}

impl SqliteStore {
    /// Connect to `url`, creating the database file if needed, and prepare
    /// the schema. Backups go to `<data_dir>/backups`.
    pub async fn connect(url: &str, data_dir: &Path, options: StoreOptions) -> EnrollmentResult<Self> {
        let connect_options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;

        let store = Self::new(pool, data_dir, options);
        store.initialize().await?;
        Ok(store)
    }

    pub fn new(pool: SqlitePool, data_dir: &Path, options: StoreOptions) -> Self {
        Self {
            pool,
            backups: BackupRotation::new(data_dir.join(BACKUP_DIR), BACKUP_PREFIX, "db")
                .with_retention(options.backup_retention),
        }
    }

    pub fn backups(&self) -> &BackupRotation {
        &self.backups
    }

    /// Create tables and seed the default catalog into an empty one
    pub async fn initialize(&self) -> EnrollmentResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(sqlx::Error::from)?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses")
            .fetch_one(&self.pool)
            .await?;

        if count == 0 {
            let defaults = default_courses();
            for draft in &defaults {
                insert_course(&self.pool, draft).await?;
            }
            tracing::info!(count = defaults.len(), "Seeded default courses");
        }

        Ok(())
    }

    /// Copy submissions that are not stored yet, matched by ID.
    ///
    /// Returns how many rows were added. Used to carry a JSON file store
    /// over to SQLite.
    pub async fn import(&self, submissions: &[Submission]) -> EnrollmentResult<usize> {
        let mut tx = self.pool.begin().await?;
        let mut imported = 0;

        for submission in submissions {
            let sql = format!(
                "INSERT OR IGNORE INTO submissions ({SUBMISSION_COLUMNS}) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
            );
            let result = bind_submission(sqlx::query(&sql), submission)
                .execute(&mut *tx)
                .await?;
            imported += result.rows_affected() as usize;
        }

        tx.commit().await?;

        tracing::info!(
            found = submissions.len(),
            imported = imported,
            "Imported submissions into SQLite"
        );
        Ok(imported)
    }
}

type SqliteQuery<'q> = sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>;

fn bind_submission<'q>(query: SqliteQuery<'q>, s: &'q Submission) -> SqliteQuery<'q> {
    query
        .bind(s.id.as_str())
        .bind(&s.parent_name)
        .bind(&s.parent_email)
        .bind(&s.parent_phone)
        .bind(&s.student_name)
        .bind(&s.student_dob)
        .bind(&s.relationship)
        .bind(&s.specific_needs)
        .bind(s.subjects.join(","))
        .bind(&s.discovery_source)
        .bind(flag::to_db(s.is_charity))
        .bind(&s.submitted_at)
        .bind(flag::to_db(s.is_trashed()))
        .bind(s.trashed_at.as_deref())
}

async fn fetch_submission(
    conn: &mut SqliteConnection,
    id: &SubmissionId,
) -> EnrollmentResult<Option<Submission>> {
    let sql = format!("SELECT {SUBMISSION_COLUMNS} FROM submissions WHERE id = ?");
    let row = sqlx::query_as::<_, SubmissionRow>(&sql)
        .bind(id.as_str())
        .fetch_optional(conn)
        .await?;

    Ok(row.map(SubmissionRow::into_submission))
}

async fn insert_course(pool: &SqlitePool, draft: &CourseDraft) -> EnrollmentResult<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO courses (name, price, duration, syllabus, isFreeTrial, isCharity)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&draft.name)
    .bind(draft.price)
    .bind(&draft.duration)
    .bind(&draft.syllabus)
    .bind(flag::to_db(draft.is_free_trial))
    .bind(flag::to_db(draft.is_charity))
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

impl SubmissionRepository for SqliteStore {
    async fn load(&self) -> EnrollmentResult<Vec<Submission>> {
        let sql = format!("SELECT {SUBMISSION_COLUMNS} FROM submissions ORDER BY rowid");
        let rows = sqlx::query_as::<_, SubmissionRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(SubmissionRow::into_submission).collect())
    }

    async fn insert(&self, submission: &Submission) -> EnrollmentResult<()> {
        let sql = format!(
            "INSERT INTO submissions ({SUBMISSION_COLUMNS}) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        );
        bind_submission(sqlx::query(&sql), submission)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get(&self, id: &SubmissionId) -> EnrollmentResult<Option<Submission>> {
        let mut conn = self.pool.acquire().await?;
        fetch_submission(&mut conn, id).await
    }

    async fn update<F>(&self, id: &SubmissionId, mutator: F) -> EnrollmentResult<Option<Submission>>
    where
        F: FnOnce(&mut Submission) + Send,
    {
        let mut tx = self.pool.begin().await?;

        let Some(mut submission) = fetch_submission(&mut tx, id).await? else {
            return Ok(None);
        };
        mutator(&mut submission);

        sqlx::query(
            r#"
            UPDATE submissions SET
                parentName = ?, parentEmail = ?, parentPhone = ?, studentName = ?,
                studentDob = ?, relationship = ?, specificNeeds = ?, subjects = ?,
                discoverySource = ?, isCharity = ?, submittedAt = ?, isTrashed = ?,
                trashedAt = ?
            WHERE id = ?
            "#,
        )
        .bind(&submission.parent_name)
        .bind(&submission.parent_email)
        .bind(&submission.parent_phone)
        .bind(&submission.student_name)
        .bind(&submission.student_dob)
        .bind(&submission.relationship)
        .bind(&submission.specific_needs)
        .bind(submission.subjects.join(","))
        .bind(&submission.discovery_source)
        .bind(flag::to_db(submission.is_charity))
        .bind(&submission.submitted_at)
        .bind(flag::to_db(submission.is_trashed()))
        .bind(submission.trashed_at.as_deref())
        .bind(id.as_str())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(submission))
    }

    async fn delete(&self, id: &SubmissionId) -> EnrollmentResult<bool> {
        let result = sqlx::query("DELETE FROM submissions WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl CourseRepository for SqliteStore {
    async fn list(&self) -> EnrollmentResult<Vec<Course>> {
        let rows = sqlx::query_as::<_, CourseRow>(
            r#"
            SELECT id, name, price, duration, syllabus, isFreeTrial, isCharity
            FROM courses
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CourseRow::into_course).collect())
    }

    async fn update(&self, course: &Course) -> EnrollmentResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE courses
            SET name = ?, price = ?, duration = ?, syllabus = ?, isFreeTrial = ?, isCharity = ?
            WHERE id = ?
            "#,
        )
        .bind(&course.name)
        .bind(course.price)
        .bind(&course.duration)
        .bind(&course.syllabus)
        .bind(flag::to_db(course.is_free_trial))
        .bind(flag::to_db(course.is_charity))
        .bind(course.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn create(&self, draft: &CourseDraft) -> EnrollmentResult<Course> {
        let id = insert_course(&self.pool, draft).await?;
        Ok(Course::from_draft(id, draft.clone()))
    }
}

impl SnapshotSource for SqliteStore {
    async fn snapshot(&self) -> Result<String, BackupError> {
        let (name, path) = self.backups.prepare(Utc::now()).await?;

        // VACUUM INTO refuses to overwrite; a same-second snapshot replaces the earlier one
        if tokio::fs::try_exists(&path).await? {
            tokio::fs::remove_file(&path).await?;
        }

        let target = path
            .to_str()
            .ok_or_else(|| BackupError::Snapshot(format!("non UTF-8 path {}", path.display())))?;

        sqlx::query("VACUUM INTO ?")
            .bind(target)
            .execute(&self.pool)
            .await
            .map_err(|e| BackupError::Snapshot(e.to_string()))?;

        self.backups.prune().await?;
        Ok(name)
    }
}

// Row types for sqlx

#[derive(sqlx::FromRow)]
#[sqlx(rename_all = "camelCase")]
struct SubmissionRow {
    id: String,
    parent_name: Option<String>,
    parent_email: Option<String>,
    parent_phone: Option<String>,
    student_name: Option<String>,
    student_dob: Option<String>,
    relationship: Option<String>,
    specific_needs: Option<String>,
    subjects: Option<String>,
    discovery_source: Option<String>,
    is_charity: Option<i64>,
    submitted_at: Option<String>,
    is_trashed: Option<i64>,
    trashed_at: Option<String>,
}

impl SubmissionRow {
    fn into_submission(self) -> Submission {
        let submitted_at = self.submitted_at.unwrap_or_default();
        let trashed_at = Submission::stored_trash_state(
            self.is_trashed.is_some_and(flag::from_db),
            self.trashed_at,
            &submitted_at,
        );

        Submission {
            id: SubmissionId::from(self.id),
            parent_name: self.parent_name.unwrap_or_default(),
            parent_email: self.parent_email.unwrap_or_default(),
            parent_phone: self.parent_phone.unwrap_or_default(),
            student_name: self.student_name.unwrap_or_default(),
            student_dob: self.student_dob.unwrap_or_default(),
            relationship: self.relationship.unwrap_or_default(),
            specific_needs: self.specific_needs.unwrap_or_default(),
            subjects: self.subjects.as_deref().map(split_joined).unwrap_or_default(),
            discovery_source: self.discovery_source.unwrap_or_default(),
            is_charity: self.is_charity.is_some_and(flag::from_db),
            submitted_at,
            trashed_at,
        }
    }
}

#[derive(sqlx::FromRow)]
#[sqlx(rename_all = "camelCase")]
struct CourseRow {
    id: i64,
    name: Option<String>,
    price: Option<f64>,
    duration: Option<String>,
    syllabus: Option<String>,
    is_free_trial: Option<i64>,
    is_charity: Option<i64>,
}

impl CourseRow {
    fn into_course(self) -> Course {
        Course {
            id: self.id,
            name: self.name.unwrap_or_default(),
            price: self.price.unwrap_or(0.0),
            duration: self.duration.unwrap_or_default(),
            syllabus: self.syllabus.unwrap_or_default(),
            is_free_trial: self.is_free_trial.is_some_and(flag::from_db),
            is_charity: self.is_charity.is_some_and(flag::from_db),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{RawRegistration, RegistrationForm};
    use crate::infra::json_file::read_submissions_file;
    use tempfile::TempDir;

    async fn memory_store(dir: &TempDir) -> SqliteStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let store = SqliteStore::new(pool, dir.path(), StoreOptions::default());
        store.initialize().await.unwrap();
        store
    }

    fn submission(student: &str, charity: bool) -> Submission {
        let raw = RawRegistration {
            parent_name: Some("Parent".into()),
            parent_email: Some("parent@example.com".into()),
            parent_phone: Some("0123".into()),
            student_name: Some(student.into()),
            student_dob: Some("2012-02-02".into()),
            subjects: Some(vec!["Maths".into(), "English".into()]),
            is_charity: charity,
            ..Default::default()
        };
        Submission::register(RegistrationForm::parse(raw).unwrap(), Utc::now())
    }

    #[tokio::test]
    async fn test_flags_round_trip_through_integers() {
        let dir = TempDir::new().unwrap();
        let store = memory_store(&dir).await;
        let mut s = submission("Kid", true);
        s.trash(Utc::now());
        SubmissionRepository::insert(&store, &s).await.unwrap();

        let (charity, trashed): (i64, i64) =
            sqlx::query_as("SELECT isCharity, isTrashed FROM submissions WHERE id = ?")
                .bind(s.id.as_str())
                .fetch_one(&store.pool)
                .await
                .unwrap();
        assert_eq!((charity, trashed), (1, 1));

        let loaded = SubmissionRepository::get(&store, &s.id).await.unwrap().unwrap();
        assert_eq!(loaded, s);
        assert_eq!(loaded.subjects, ["Maths", "English"]);
    }

    #[tokio::test]
    async fn test_comma_subject_reads_back_as_submitted() {
        let dir = TempDir::new().unwrap();
        let store = memory_store(&dir).await;
        let raw = RawRegistration {
            parent_name: Some("Parent".into()),
            parent_email: Some("parent@example.com".into()),
            parent_phone: Some("0123".into()),
            student_name: Some("Kid".into()),
            student_dob: Some("2012-02-02".into()),
            subjects: Some(vec!["Maths, Science".into()]),
            ..Default::default()
        };
        let s = Submission::register(RegistrationForm::parse(raw).unwrap(), Utc::now());
        SubmissionRepository::insert(&store, &s).await.unwrap();

        let loaded = SubmissionRepository::get(&store, &s.id).await.unwrap().unwrap();
        assert_eq!(loaded.subjects, s.subjects);
        assert_eq!(loaded.subjects, ["Maths", "Science"]);
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = memory_store(&dir).await;
        store.initialize().await.unwrap();

        let courses = CourseRepository::list(&store).await.unwrap();
        assert_eq!(courses.len(), 4);
        assert!(courses[0].is_free_trial);
        assert!(!courses[0].is_charity);
        assert!(courses[3].is_charity);
    }

    #[tokio::test]
    async fn test_trashed_row_without_time_uses_submission_time() {
        let dir = TempDir::new().unwrap();
        let store = memory_store(&dir).await;
        sqlx::query(
            "INSERT INTO submissions (id, subjects, submittedAt, isTrashed) VALUES ('r1', 'Maths', '2024-01-01T00:00:00.000Z', 1)",
        )
        .execute(&store.pool)
        .await
        .unwrap();

        let loaded = SubmissionRepository::get(&store, &SubmissionId::from("r1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.trashed_at.as_deref(), Some("2024-01-01T00:00:00.000Z"));
        assert!(!loaded.is_charity);
    }

    #[tokio::test]
    async fn test_import_skips_existing_ids() {
        let dir = TempDir::new().unwrap();
        let store = memory_store(&dir).await;
        let existing = submission("Existing", false);
        SubmissionRepository::insert(&store, &existing).await.unwrap();

        let imported = store
            .import(&[existing.clone(), submission("New", false)])
            .await
            .unwrap();
        assert_eq!(imported, 1);
        assert_eq!(SubmissionRepository::load(&store).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_repeated_import_of_idless_file_adds_one_row() {
        let dir = TempDir::new().unwrap();
        let store = memory_store(&dir).await;
        let legacy = dir.path().join("submissions.json");
        std::fs::write(
            &legacy,
            br#"[{"parentName":"Pat","studentName":"Robin","subjects":"Maths","createdAt":"2023-01-01T00:00:00.000Z"}]"#,
        )
        .unwrap();

        // One import per server start
        for _ in 0..3 {
            let records = read_submissions_file(&legacy, crate::infra::ReadPolicy::Lenient)
                .await
                .unwrap();
            store.import(&records).await.unwrap();
        }

        assert_eq!(SubmissionRepository::load(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_snapshot_writes_database_copy() {
        let dir = TempDir::new().unwrap();
        let store = memory_store(&dir).await;
        SubmissionRepository::insert(&store, &submission("Kid", false))
            .await
            .unwrap();

        let name = store.snapshot().await.unwrap();
        assert!(name.ends_with(".db"));
        let path = store.backups().dir().join(&name);
        assert!(path.exists());

        // Same second: the earlier file is replaced rather than failing
        let again = store.snapshot().await.unwrap();
        assert!(store.backups().dir().join(&again).exists());
    }
}
