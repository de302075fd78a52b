//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Random token generation and constant-time comparison
//! - Bearer token extraction (header or `?token=` query)
//! - Timestamped, rotating backup files

pub mod backup;
pub mod bearer;
pub mod crypto;
