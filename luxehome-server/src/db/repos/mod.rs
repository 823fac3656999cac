//! Repository implementations for database access
//!
//! Each repository borrows the pool and follows these patterns:
//! - Owner predicates on every agent-scoped read and write
//! - `RETURNING` instead of write-then-read
//! - Not-found surfaces as `DbError::NotFound`

pub mod leads;
pub mod profiles;
pub mod properties;

pub use leads::{Lead, LeadCounts, LeadRepo};
pub use profiles::{Profile, ProfileRepo};
pub use properties::{Property, PropertyPage, PropertyRepo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}
