//! Admin Credentials Entity

use platform::crypto::constant_time_eq;

/// The single admin account
#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

impl AdminCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Exact match on both fields
    pub fn matches(&self, email: &str, password: &str) -> bool {
        // Evaluate both so timing does not reveal which field was wrong
        let email_ok = constant_time_eq(self.email.as_bytes(), email.as_bytes());
        let password_ok = self.password_matches(password);
        email_ok & password_ok
    }

    pub fn password_matches(&self, password: &str) -> bool {
        constant_time_eq(self.password.as_bytes(), password.as_bytes())
    }

    pub fn with_password(&self, password: impl Into<String>) -> Self {
        Self {
            email: self.email.clone(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
