//! Session Store
//!
//! Bearer tokens handed out at login. Sessions never expire on their own;
//! they end when revoked or when the process stops.

use derive_more::Display;
use std::sync::Arc;

/// Opaque bearer token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Process-wide set of valid tokens
pub trait SessionStore: Send + Sync {
    /// Create and remember a fresh token
    fn issue(&self) -> SessionToken;

    fn validate(&self, token: &str) -> bool;

    /// Forget a token. Returns `false` if it was not valid.
    fn revoke(&self, token: &str) -> bool;
}

pub type SharedSessionStore = Arc<dyn SessionStore>;
