//! Repository Traits

use crate::domain::entity::AdminCredentials;
use crate::error::AdminResult;

/// Storage for the admin account
#[trait_variant::make(AdminConfigRepository: Send)]
pub trait LocalAdminConfigRepository {
    /// Current credentials, created from defaults on first use
    async fn load(&self) -> AdminResult<AdminCredentials>;

    /// Replace the stored credentials
    async fn save(&self, credentials: &AdminCredentials) -> AdminResult<()>;
}
