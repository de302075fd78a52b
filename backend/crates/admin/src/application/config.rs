//! Application Configuration
//!
//! Configuration for the admin application layer.

/// Shortest accepted new password, in characters
pub const MIN_PASSWORD_LEN: usize = 8;

/// Credentials written to `admin.json` on first run, and used for any field
/// the stored file leaves empty
#[derive(Clone)]
pub struct AdminConfigDefaults {
    pub email: String,
    pub password: String,
}

impl Default for AdminConfigDefaults {
    fn default() -> Self {
        Self {
            email: "admin@acelab.com".to_string(),
            password: "admin123".to_string(),
        }
    }
}

impl AdminConfigDefaults {
    /// Defaults with optional overrides; blank overrides are ignored
    pub fn with_overrides(email: Option<String>, password: Option<String>) -> Self {
        let base = Self::default();
        Self {
            email: email.filter(|e| !e.trim().is_empty()).unwrap_or(base.email),
            password: password.filter(|p| !p.is_empty()).unwrap_or(base.password),
        }
    }
}

impl std::fmt::Debug for AdminConfigDefaults {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfigDefaults")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
