//! Infrastructure Layer
//!
//! File-backed admin config and in-memory sessions.

pub mod file_config;
pub mod memory_session;
