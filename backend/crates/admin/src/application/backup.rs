//! Create Backup Use Case

use std::sync::Arc;

use platform::backup::SnapshotSource;

use crate::error::AdminResult;

/// On-demand snapshot of the submission store
pub struct CreateBackupUseCase<B>
where
    B: SnapshotSource,
{
    backups: Arc<B>,
}

impl<B> CreateBackupUseCase<B>
where
    B: SnapshotSource,
{
    pub fn new(backups: Arc<B>) -> Self {
        Self { backups }
    }

    /// Returns the backup file name
    pub async fn execute(&self) -> AdminResult<String> {
        let name = self.backups.snapshot().await?;
        tracing::info!(backup = %name, "Backup created");
        Ok(name)
    }
}
