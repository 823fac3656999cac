//! Contact form (lead capture) validation

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use uuid::Uuid;

use super::validation::Missing;
use super::ValidationError;

const MAX_NAME_LEN: usize = 120;
const MAX_EMAIL_LEN: usize = 254;
const MAX_PHONE_LEN: usize = 20;
const MAX_MESSAGE_LEN: usize = 5_000;

/// Loose address check: something@something.tld, no whitespace
pub(crate) static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("invalid email regex"));

/// Raw contact form submission
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    /// Listing the visitor enquired about
    pub property_id: Option<String>,
    /// Listing agent; blank on manual entry from the admin area
    pub agent_id: Option<String>,
}

/// Validated lead ready to score and persist
#[derive(Debug, Clone, PartialEq)]
pub struct LeadInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub property_id: Option<Uuid>,
    pub agent_id: Option<Uuid>,
}

fn trimmed(value: &Option<String>) -> &str {
    value.as_deref().map(str::trim).unwrap_or_default()
}

fn optional_uuid(value: &Option<String>, field: &'static str) -> Result<Option<Uuid>, ValidationError> {
    match value.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(raw) => Uuid::parse_str(raw)
            .map(Some)
            .map_err(|_| ValidationError::InvalidFormat {
                field,
                reason: "invalid UUID format",
            }),
    }
}

fn cap(value: &str, field: &'static str, max: usize) -> Result<String, ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(value.to_owned())
}

impl LeadForm {
    /// Validate the submission; every required field is checked before
    /// anything is scored or stored.
    pub fn validate(&self) -> Result<LeadInput, ValidationError> {
        let name = trimmed(&self.name);
        let email = trimmed(&self.email);
        let phone = trimmed(&self.phone);
        let message = trimmed(&self.message);

        let mut missing = Missing::default();
        missing.check(!name.is_empty(), "Name");
        missing.check(!email.is_empty(), "Email");
        missing.check(!phone.is_empty(), "Phone");
        missing.check(!message.is_empty(), "Message");
        missing.finish()?;

        if !EMAIL_RE.is_match(email) {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "must be a valid email address",
            });
        }
        if !phone.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidFormat {
                field: "phone",
                reason: "digits only",
            });
        }

        Ok(LeadInput {
            name: cap(name, "name", MAX_NAME_LEN)?,
            email: cap(email, "email", MAX_EMAIL_LEN)?,
            phone: cap(phone, "phone", MAX_PHONE_LEN)?,
            message: cap(message, "message", MAX_MESSAGE_LEN)?,
            property_id: optional_uuid(&self.property_id, "property_id")?,
            agent_id: optional_uuid(&self.agent_id, "agent_id")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> LeadForm {
        LeadForm {
            name: Some("Ada Buyer".into()),
            email: Some("ada@example.com".into()),
            phone: Some("5551234567".into()),
            message: Some("Cash buyer, want to view this weekend".into()),
            property_id: None,
            agent_id: None,
        }
    }

    #[test]
    fn accepts_complete_form() {
        let input = valid().validate().unwrap();
        assert_eq!(input.name, "Ada Buyer");
        assert!(input.agent_id.is_none());
    }

    #[test]
    fn reports_all_missing_fields() {
        let form = LeadForm {
            name: Some("  ".into()),
            ..LeadForm::default()
        };
        assert_eq!(
            form.validate().unwrap_err(),
            ValidationError::MissingFields {
                fields: vec!["Name", "Email", "Phone", "Message"]
            }
        );
    }

    #[test]
    fn rejects_bad_email() {
        let form = LeadForm {
            email: Some("ada at example".into()),
            ..valid()
        };
        assert!(matches!(
            form.validate().unwrap_err(),
            ValidationError::InvalidFormat { field: "email", .. }
        ));
    }

    #[test]
    fn rejects_non_digit_phone() {
        let form = LeadForm {
            phone: Some("555-1234".into()),
            ..valid()
        };
        assert!(matches!(
            form.validate().unwrap_err(),
            ValidationError::InvalidFormat { field: "phone", .. }
        ));
    }

    #[test]
    fn parses_routing_ids() {
        let id = Uuid::new_v4();
        let form = LeadForm {
            property_id: Some(id.to_string()),
            agent_id: Some("".into()),
            ..valid()
        };
        let input = form.validate().unwrap();
        assert_eq!(input.property_id, Some(id));
        assert_eq!(input.agent_id, None);

        let form = LeadForm {
            agent_id: Some("not-a-uuid".into()),
            ..valid()
        };
        assert!(form.validate().is_err());
    }
}
