//! Domain Layer
//!
//! Admin credentials, the session store contract and repository traits.

pub mod entity;
pub mod repository;
pub mod session;
