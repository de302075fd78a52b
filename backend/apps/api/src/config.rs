//! Process Configuration
//!
//! Everything is read from environment variables (optionally via `.env`).

use admin::AdminConfigDefaults;
use anyhow::Context;
use enrollment::{EnrollmentConfig, ReadPolicy, StoreOptions, UnidentifiedCoursePolicy};
use std::path::PathBuf;
use std::str::FromStr;

/// Which store keeps submissions and courses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Json,
    Sqlite,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(StorageBackend::Json),
            "sqlite" => Ok(StorageBackend::Sqlite),
            other => anyhow::bail!("unknown STORAGE_BACKEND {other:?}, expected json or sqlite"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub data_dir: PathBuf,
    pub backend: StorageBackend,
    pub database_url: String,
    pub backup_retention: usize,
    pub read_policy: ReadPolicy,
    pub course_policy: UnidentifiedCoursePolicy,
    pub admin_defaults: AdminConfigDefaults,
    /// `None` allows any origin
    pub frontend_origins: Option<Vec<String>>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset and blank values take defaults
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(v) => v.trim().parse().with_context(|| format!("invalid PORT {v:?}"))?,
            None => 3000,
        };

        let data_dir = PathBuf::from(get("DATA_DIR").unwrap_or_else(|| "data".to_string()));

        let backend = match get("STORAGE_BACKEND") {
            Some(v) => v.parse()?,
            None => StorageBackend::Json,
        };

        let database_url = get("DATABASE_URL").unwrap_or_else(|| {
            format!("sqlite://{}?mode=rwc", data_dir.join("intake.db").display())
        });

        let backup_retention = match get("BACKUP_RETENTION") {
            Some(v) => v
                .trim()
                .parse()
                .with_context(|| format!("invalid BACKUP_RETENTION {v:?}"))?,
            None => platform::backup::DEFAULT_RETENTION,
        };

        let read_policy = if parse_flag(get("STRICT_STORAGE_READS")) {
            ReadPolicy::Strict
        } else {
            ReadPolicy::Lenient
        };

        let course_policy = if parse_flag(get("COURSES_CREATE_UNIDENTIFIED")) {
            UnidentifiedCoursePolicy::Create
        } else {
            UnidentifiedCoursePolicy::Skip
        };

        let admin_defaults =
            AdminConfigDefaults::with_overrides(get("ADMIN_DEFAULT_EMAIL"), get("ADMIN_DEFAULT_PASSWORD"));

        let frontend_origins = get("FRONTEND_ORIGINS").map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect()
        });

        Ok(Self {
            port,
            data_dir,
            backend,
            database_url,
            backup_retention,
            read_policy,
            course_policy,
            admin_defaults,
            frontend_origins,
        })
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            read_policy: self.read_policy,
            backup_retention: self.backup_retention,
        }
    }

    pub fn enrollment_config(&self) -> EnrollmentConfig {
        EnrollmentConfig {
            course_policy: self.course_policy,
        }
    }
}

fn parse_flag(value: Option<String>) -> bool {
    value.is_some_and(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.backend, StorageBackend::Json);
        assert!(config.database_url.starts_with("sqlite://"));
        assert!(config.database_url.ends_with("intake.db?mode=rwc"));
        assert_eq!(config.backup_retention, 30);
        assert_eq!(config.read_policy, ReadPolicy::Lenient);
        assert_eq!(config.course_policy, UnidentifiedCoursePolicy::Skip);
        assert_eq!(config.admin_defaults.email, "admin@acelab.com");
        assert!(config.frontend_origins.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("PORT", "8080"),
            ("DATA_DIR", "/var/lib/intake"),
            ("STORAGE_BACKEND", "SQLite"),
            ("BACKUP_RETENTION", "5"),
            ("STRICT_STORAGE_READS", "true"),
            ("COURSES_CREATE_UNIDENTIFIED", "1"),
            ("ADMIN_DEFAULT_EMAIL", "ops@example.com"),
            ("FRONTEND_ORIGINS", "https://a.example, https://b.example,"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.backend, StorageBackend::Sqlite);
        assert_eq!(config.backup_retention, 5);
        assert_eq!(config.read_policy, ReadPolicy::Strict);
        assert_eq!(config.course_policy, UnidentifiedCoursePolicy::Create);
        assert_eq!(config.admin_defaults.email, "ops@example.com");
        assert_eq!(config.admin_defaults.password, "admin123");
        assert_eq!(
            config.frontend_origins,
            Some(vec!["https://a.example".to_string(), "https://b.example".to_string()])
        );
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(config(&[("PORT", "eighty")]).is_err());
        assert!(config(&[("STORAGE_BACKEND", "postgres")]).is_err());
        assert!(config(&[("BACKUP_RETENTION", "-1")]).is_err());
    }
}
