//! Infrastructure Layer
//!
//! Storage backends for submissions and courses.

pub mod flag;
pub mod json_file;
pub mod record;
pub mod seed;
pub mod sqlite;

use platform::backup::DEFAULT_RETENTION;

/// What a store does when its data cannot be read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadPolicy {
    /// Log a warning and treat the collection as empty
    #[default]
    Lenient,
    /// Fail the request with a storage error
    Strict,
}

/// Options shared by both store backends
#[derive(Debug, Clone, Copy)]
pub struct StoreOptions {
    pub read_policy: ReadPolicy,
    /// Number of backups kept by the rotation
    pub backup_retention: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            read_policy: ReadPolicy::Lenient,
            backup_retention: DEFAULT_RETENTION,
        }
    }
}
