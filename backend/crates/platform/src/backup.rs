//! Rotating Backup Files
//!
//! Backups are plain files named `<prefix>-YYYY-MM-DD-HH-MM-SS.<ext>` inside a
//! single directory. The timestamp format sorts lexicographically in time
//! order, so pruning simply removes the first names of the sorted listing.
//!
//! Two snapshots taken within the same second share a name; the later one
//! overwrites the earlier.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Number of backups kept when no retention is configured
pub const DEFAULT_RETENTION: usize = 30;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("Backup I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot failed: {0}")]
    Snapshot(String),
}

/// Anything able to write a timestamped copy of its current contents
#[trait_variant::make(SnapshotSource: Send)]
pub trait LocalSnapshotSource {
    /// Write a backup now and return the backup file name
    async fn snapshot(&self) -> Result<String, BackupError>;
}

/// Naming and retention policy for one family of backup files
#[derive(Debug, Clone)]
pub struct BackupRotation {
    dir: PathBuf,
    prefix: String,
    extension: String,
    retention: usize,
}

impl BackupRotation {
    pub fn new(
        dir: impl Into<PathBuf>,
        prefix: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            extension: extension.into(),
            retention: DEFAULT_RETENTION,
        }
    }

    /// Keep at most `retention` files (at least one)
    pub fn with_retention(mut self, retention: usize) -> Self {
        self.retention = retention.max(1);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn retention(&self) -> usize {
        self.retention
    }

    /// Backup file name for a given instant
    pub fn file_name_at(&self, at: DateTime<Utc>) -> String {
        format!(
            "{}-{}.{}",
            self.prefix,
            at.format(TIMESTAMP_FORMAT),
            self.extension
        )
    }

    /// Make sure the backup directory exists and return the target for `at`.
    ///
    /// Callers that produce the backup themselves (e.g. `VACUUM INTO`) write
    /// to the returned path and then call [`BackupRotation::prune`].
    pub async fn prepare(&self, at: DateTime<Utc>) -> Result<(String, PathBuf), BackupError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let name = self.file_name_at(at);
        let path = self.dir.join(&name);
        Ok((name, path))
    }

    /// Copy `source` into a new backup file, then apply retention.
    pub async fn copy_file(&self, source: &Path, at: DateTime<Utc>) -> Result<String, BackupError> {
        let (name, path) = self.prepare(at).await?;
        tokio::fs::copy(source, &path).await?;
        self.prune().await?;

        tracing::debug!(backup = %name, "Backup written");
        Ok(name)
    }

    /// Backup file names in this family, oldest first
    pub async fn list(&self) -> Result<Vec<String>, BackupError> {
        let mut names = Vec::new();

        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(names),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            if let Some(name) = entry.file_name().to_str() {
                if self.is_backup_name(name) {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    /// Delete the oldest backups beyond the retention limit.
    ///
    /// Returns the number of files removed.
    pub async fn prune(&self) -> Result<usize, BackupError> {
        let names = self.list().await?;
        let excess = names.len().saturating_sub(self.retention);

        for name in names.iter().take(excess) {
            tokio::fs::remove_file(self.dir.join(name)).await?;
        }

        if excess > 0 {
            tracing::info!(
                pruned = excess,
                retention = self.retention,
                "Pruned old backups"
            );
        }

        Ok(excess)
    }

    fn is_backup_name(&self, name: &str) -> bool {
        name.strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.strip_prefix('-'))
            .and_then(|rest| rest.strip_suffix(self.extension.as_str()))
            .is_some_and(|rest| rest.ends_with('.'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_file_name_format() {
        let rotation = BackupRotation::new("backups", "submissions", "json");
        assert_eq!(
            rotation.file_name_at(base_time()),
            "submissions-2026-10-16-09-30-00.json"
        );
    }

    #[test]
    fn test_retention_is_at_least_one() {
        let rotation = BackupRotation::new("backups", "submissions", "json").with_retention(0);
        assert_eq!(rotation.retention(), 1);
    }

    #[tokio::test]
    async fn test_31_backups_keep_30() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("submissions.json");
        tokio::fs::write(&source, "[]").await.unwrap();

        let rotation = BackupRotation::new(tmp.path().join("backups"), "submissions", "json");

        let mut written = Vec::new();
        for i in 0..31 {
            let at = base_time() + Duration::seconds(i);
            written.push(rotation.copy_file(&source, at).await.unwrap());
        }

        let remaining = rotation.list().await.unwrap();
        assert_eq!(remaining.len(), 30);
        assert!(!remaining.contains(&written[0]));
        assert_eq!(remaining.first(), Some(&written[1]));
        assert_eq!(remaining.last(), Some(&written[30]));
    }

    #[tokio::test]
    async fn test_prune_ignores_foreign_files() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("backups");
        let rotation = BackupRotation::new(&dir, "submissions", "json").with_retention(1);

        tokio::fs::create_dir_all(&dir).await.unwrap();
        tokio::fs::write(dir.join("notes.txt"), "keep").await.unwrap();
        tokio::fs::write(dir.join("submissions-2026-01-01-00-00-00.db"), "x")
            .await
            .unwrap();
        tokio::fs::write(dir.join("submissions-2026-01-01-00-00-00.json"), "[]")
            .await
            .unwrap();
        tokio::fs::write(dir.join("submissions-2026-01-02-00-00-00.json"), "[]")
            .await
            .unwrap();

        assert_eq!(rotation.prune().await.unwrap(), 1);

        let remaining = rotation.list().await.unwrap();
        assert_eq!(remaining, vec!["submissions-2026-01-02-00-00-00.json"]);
        assert!(dir.join("notes.txt").exists());
        assert!(dir.join("submissions-2026-01-01-00-00-00.db").exists());
    }

    #[tokio::test]
    async fn test_list_missing_dir_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let rotation = BackupRotation::new(tmp.path().join("nope"), "submissions", "json");
        assert!(rotation.list().await.unwrap().is_empty());
    }
}
