//! Presentation Layer
//!
//! HTTP handlers, DTOs, router and the session guard.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
