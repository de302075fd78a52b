//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.
//! Contains use case implementations.

pub mod config;
pub mod courses;
pub mod export;
pub mod manage_submissions;
pub mod submit;
