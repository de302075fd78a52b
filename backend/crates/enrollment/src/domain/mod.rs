//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Submission, Course)
//! - Domain value objects (RegistrationForm, SubmissionFilter, CourseDraft)
//! - Domain services (listing order)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
