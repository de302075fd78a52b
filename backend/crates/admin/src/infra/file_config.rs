//! `admin.json` Repository

use crate::application::config::AdminConfigDefaults;
use crate::domain::entity::AdminCredentials;
use crate::domain::repository::AdminConfigRepository;
use crate::error::{AdminError, AdminResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

pub const ADMIN_FILE: &str = "admin.json";

#[derive(Debug, Default, Deserialize)]
struct StoredAdmin {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

#[derive(Serialize)]
struct WrittenAdmin<'a> {
    email: &'a str,
    password: &'a str,
}

/// Admin credentials kept in a small JSON file
pub struct FileAdminConfigRepository {
    path: PathBuf,
    defaults: AdminConfigDefaults,
    lock: Mutex<()>,
}

impl FileAdminConfigRepository {
    pub fn new(data_dir: impl AsRef<Path>, defaults: AdminConfigDefaults) -> Self {
        Self {
            path: data_dir.as_ref().join(ADMIN_FILE),
            defaults,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Empty fields fall back to the defaults
    fn resolve(&self, email: Option<&str>, password: Option<&str>) -> AdminCredentials {
        AdminCredentials::new(
            email
                .filter(|e| !e.is_empty())
                .unwrap_or(self.defaults.email.as_str()),
            password
                .filter(|p| !p.is_empty())
                .unwrap_or(self.defaults.password.as_str()),
        )
    }

    async fn write(&self, credentials: &AdminCredentials) -> AdminResult<()> {
        let resolved = self.resolve(Some(&credentials.email), Some(&credentials.password));
        let bytes = serde_json::to_vec_pretty(&WrittenAdmin {
            email: &resolved.email,
            password: &resolved.password,
        })?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    async fn read(&self) -> AdminResult<AdminCredentials> {
        if !tokio::fs::try_exists(&self.path).await? {
            let defaults = self.resolve(None, None);
            self.write(&defaults).await?;
            tracing::info!(path = %self.path.display(), "Created admin config with defaults");
        }

        let bytes = tokio::fs::read(&self.path).await?;
        let stored: StoredAdmin = serde_json::from_slice(&bytes)?;
        Ok(self.resolve(stored.email.as_deref(), stored.password.as_deref()))
    }
}

impl AdminConfigRepository for FileAdminConfigRepository {
    async fn load(&self) -> AdminResult<AdminCredentials> {
        let _guard = self.lock.lock().await;
        self.read()
            .await
            .map_err(|e| AdminError::ConfigUnavailable(e.to_string()))
    }

    async fn save(&self, credentials: &AdminCredentials) -> AdminResult<()> {
        let _guard = self.lock.lock().await;
        self.write(credentials).await
    }
}
