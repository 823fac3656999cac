//! Agent profile form

use serde::Deserialize;

use super::lead::EMAIL_RE;
use super::validation::optional_text;
use super::ValidationError;

/// Raw profile settings submission
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileForm {
    pub full_name: Option<String>,
    pub job_title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    /// Current avatar URL, kept when no new avatar is uploaded
    pub existing_avatar: Option<String>,
}

/// Validated profile fields; blank inputs become `None`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileInput {
    pub full_name: Option<String>,
    pub job_title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

impl ProfileForm {
    /// Set a field by its form name; unknown names are ignored.
    pub fn set(&mut self, name: &str, value: String) {
        let slot = match name {
            "full_name" => &mut self.full_name,
            "job_title" => &mut self.job_title,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "bio" => &mut self.bio,
            "existing_avatar" => &mut self.existing_avatar,
            _ => return,
        };
        *slot = Some(value);
    }

    pub fn validate(&self) -> Result<ProfileInput, ValidationError> {
        let email = optional_text(self.email.as_deref(), "email", 254)?;
        if let Some(email) = &email {
            if !EMAIL_RE.is_match(email) {
                return Err(ValidationError::InvalidFormat {
                    field: "email",
                    reason: "must be a valid email address",
                });
            }
        }

        Ok(ProfileInput {
            full_name: optional_text(self.full_name.as_deref(), "full_name", 120)?,
            job_title: optional_text(self.job_title.as_deref(), "job_title", 120)?,
            email,
            phone: optional_text(self.phone.as_deref(), "phone", 30)?,
            bio: optional_text(self.bio.as_deref(), "bio", 2_000)?,
            avatar_url: optional_text(self.existing_avatar.as_deref(), "existing_avatar", 2_048)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_become_none() {
        let mut form = ProfileForm::default();
        form.set("full_name", " Sora Tanaka ".into());
        form.set("bio", "   ".into());
        let input = form.validate().unwrap();
        assert_eq!(input.full_name.as_deref(), Some("Sora Tanaka"));
        assert_eq!(input.bio, None);
        assert_eq!(input.avatar_url, None);
    }

    #[test]
    fn checks_email_when_present() {
        let mut form = ProfileForm::default();
        form.set("email", "nope".into());
        assert!(form.validate().is_err());
    }

    #[test]
    fn bio_length_capped() {
        let mut form = ProfileForm::default();
        form.set("bio", "x".repeat(2_001));
        assert!(matches!(
            form.validate().unwrap_err(),
            ValidationError::TooLong { field: "bio", max: 2_000 }
        ));
    }
}
