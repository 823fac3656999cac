//! Validation error types

use std::fmt;

/// Validation error for submitted forms and query input
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// String doesn't match required format (e.g., email)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Invalid enum variant
    InvalidVariant { field: &'static str, value: String },

    /// Number outside the accepted range
    OutOfRange { field: &'static str, reason: &'static str },

    /// Several required fields missing at once; listed in form order
    MissingFields { fields: Vec<&'static str> },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} is required", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::InvalidVariant { field, value } => {
                write!(f, "invalid {} value: '{}'", field, value)
            }
            Self::OutOfRange { field, reason } => write!(f, "{} {}", field, reason),
            Self::MissingFields { fields } => write!(
                f,
                "Please fill in all required fields: {}",
                fields.join(", ")
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Collects missing required fields so a form reports them all at once.
#[derive(Debug, Default)]
pub(crate) struct Missing(Vec<&'static str>);

impl Missing {
    pub(crate) fn check(&mut self, ok: bool, field: &'static str) {
        if !ok {
            self.0.push(field);
        }
    }

    pub(crate) fn finish(self) -> Result<(), ValidationError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields { fields: self.0 })
        }
    }
}

/// Trimmed optional text; blank becomes `None`.
pub(crate) fn optional_text(
    value: Option<&str>,
    field: &'static str,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) if s.chars().count() > max => Err(ValidationError::TooLong { field, max }),
        Some(s) => Ok(Some(s.to_owned())),
    }
}
