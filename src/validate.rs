//! Form gate: synchronous validation of structured drafts.
//!
//! Pure and side-effect free. Validation errors are field-scoped and never
//! reach the network; the engine reports them back to the host and performs
//! no submission.

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Field error shown when the project email is empty
pub const EMAIL_REQUIRED: &str = "Email is required.";
/// Field error shown when the project email fails the pattern
pub const EMAIL_INVALID: &str = "Invalid email format.";
/// Field error shown when the project idea is empty
pub const IDEA_REQUIRED: &str = "Idea is required.";

/// Validation outcome for the contact line in the browsing sub-flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactError {
    #[error("Contact is required")]
    Required,
    #[error("Enter a valid Email or Phone number")]
    Invalid,
}

/// Field-scoped errors for the project intake form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFieldErrors {
    pub email: Option<String>,
    pub idea: Option<String>,
}

impl ProjectFieldErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.idea.is_none()
    }
}

/// A contact line classified into the gateway's `{email?, phone?}` shape.
/// Exactly one side is populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ContactInfo {
    /// The classified value, whichever side holds it
    pub fn value(&self) -> &str {
        self.email
            .as_deref()
            .or(self.phone.as_deref())
            .unwrap_or("")
    }
}

/// Validation report for any submitting surface, sent to the host as a
/// `UiEvent`. An empty project report clears previously shown errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum FormErrors {
    Project { errors: ProjectFieldErrors },
    Contact { error: ContactError },
}

impl FormErrors {
    pub fn project(errors: ProjectFieldErrors) -> Self {
        FormErrors::Project { errors }
    }

    pub fn contact(error: ContactError) -> Self {
        FormErrors::Contact { error }
    }

    /// True when nothing is wrong (used to clear displayed errors)
    pub fn is_clear(&self) -> bool {
        match self {
            FormErrors::Project { errors } => errors.is_empty(),
            FormErrors::Contact { .. } => false,
        }
    }
}

/// Validator with precompiled patterns, built once per engine.
#[derive(Debug, Clone)]
pub struct FormGate {
    email_regex: Regex,
    phone_regex: Regex,
}

impl Default for FormGate {
    fn default() -> Self {
        Self::new()
    }
}

impl FormGate {
    pub fn new() -> Self {
        Self {
            // local@domain.tld shape: no whitespace, one @, a dot in the domain
            email_regex: Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap(),
            // Optional leading +, 7 to 15 digits
            phone_regex: Regex::new(r"^\+?[0-9]{7,15}$").unwrap(),
        }
    }

    pub fn is_valid_email(&self, input: &str) -> bool {
        self.email_regex.is_match(input)
    }

    pub fn is_valid_phone(&self, input: &str) -> bool {
        self.phone_regex.is_match(input)
    }

    /// Validate the project intake form. Empty checks run on trimmed input.
    pub fn check_project(&self, email: &str, idea: &str) -> ProjectFieldErrors {
        let mut errors = ProjectFieldErrors::default();
        if email.trim().is_empty() {
            errors.email = Some(EMAIL_REQUIRED.to_string());
        } else if !self.is_valid_email(email) {
            errors.email = Some(EMAIL_INVALID.to_string());
        }
        if idea.trim().is_empty() {
            errors.idea = Some(IDEA_REQUIRED.to_string());
        }
        errors
    }

    /// Classify a contact line as an email or a phone number.
    ///
    /// Email is tried first, matching the submission shape's field priority.
    pub fn classify_contact(&self, input: &str) -> Result<ContactInfo, ContactError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ContactError::Required);
        }
        if self.is_valid_email(input) {
            return Ok(ContactInfo {
                email: Some(input.to_string()),
                phone: None,
            });
        }
        if self.is_valid_phone(input) {
            return Ok(ContactInfo {
                email: None,
                phone: Some(input.to_string()),
            });
        }
        Err(ContactError::Invalid)
    }
}
