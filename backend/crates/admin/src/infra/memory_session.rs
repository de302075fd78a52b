//! In-Memory Session Store

use crate::domain::session::{SessionStore, SessionToken};
use platform::crypto::random_token;
use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};

/// Random bytes per token
const TOKEN_BYTES: usize = 32;

/// Session store kept in process memory
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    tokens: RwLock<HashSet<String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for InMemorySessionStore {
    fn issue(&self) -> SessionToken {
        let token = random_token(TOKEN_BYTES);
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token.clone());
        SessionToken::new(token)
    }

    fn validate(&self, token: &str) -> bool {
        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(token)
    }

    fn revoke(&self, token: &str) -> bool {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token)
    }
}
