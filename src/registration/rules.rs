//! Field validation rules
//!
//! Every rule is a pure predicate over one submitted value. `validate` runs
//! all of them and reports each failure; it never stops at the first one.
//!
//! The email pattern is a coarse syntactic check (`local@domain.tld`), not
//! RFC 5322.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

use crate::registration::form::{RegistrationForm, PLACEHOLDER};

const EMAIL_PATTERN: &str = r"^[\w.-]+@[\w.-]+\.\w+$";
const PHONE_PATTERN: &str = r"^\+?1?\d{9,15}$";

// Both patterns are compile-time constants covered by
// `test_patterns_compile`; a failure here is a programming error.
fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("EMAIL_PATTERN is a valid regex"))
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PHONE_PATTERN).expect("PHONE_PATTERN is a valid regex"))
}

/// Fields that carry a validation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    FullName,
    Email,
    Phone,
    Gender,
    Country,
    Terms,
}

/// One failed rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    fn new(field: Field, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty()
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    phone_regex().is_match(phone)
}

/// A single-select value other than the placeholder
pub fn is_selected(value: &str) -> bool {
    value != PLACEHOLDER
}

/// Run every rule, collecting all failures in form order
pub fn validate(form: &RegistrationForm) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if !is_valid_name(&form.full_name) {
        errors.push(FieldError::new(Field::FullName, "Please enter your full name"));
    }
    if !is_valid_email(&form.email) {
        errors.push(FieldError::new(Field::Email, "Please enter a valid email address"));
    }
    if !is_valid_phone(&form.phone) {
        errors.push(FieldError::new(Field::Phone, "Please enter a valid phone number"));
    }
    if !is_selected(&form.gender) {
        errors.push(FieldError::new(Field::Gender, "Please select your gender"));
    }
    if !is_selected(&form.country) {
        errors.push(FieldError::new(Field::Country, "Please select your country"));
    }
    if !form.terms_accepted {
        errors.push(FieldError::new(
            Field::Terms,
            "Please accept the terms and conditions",
        ));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_patterns_compile() {
        assert!(Regex::new(EMAIL_PATTERN).is_ok());
        assert!(Regex::new(PHONE_PATTERN).is_ok());
    }

    #[test]
    fn test_email_examples() {
        assert!(is_valid_email("a.b@example.com"));
        assert!(is_valid_email("first-last@mail.example.co"));
        assert!(is_valid_email("user_1@host-name.io"));

        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("a b@example.com"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn test_phone_examples() {
        assert!(is_valid_phone("+14155551234"));
        assert!(is_valid_phone("0912345678"));
        assert!(is_valid_phone("123456789"));

        assert!(!is_valid_phone("123"));
        assert!(!is_valid_phone("abcdefghij"));
        assert!(!is_valid_phone("+1 415 555 1234"));
        assert!(!is_valid_phone("1234567890123456789"));
    }

    #[test]
    fn test_name_trimmed() {
        assert!(is_valid_name("Ada"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("   \t"));
    }

    #[test]
    fn test_all_failures_reported() {
        let form = RegistrationForm::blank(NaiveDate::from_ymd_opt(1990, 5, 1).unwrap());
        let errors = validate(&form);

        let fields: Vec<Field> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                Field::FullName,
                Field::Email,
                Field::Phone,
                Field::Gender,
                Field::Country,
                Field::Terms
            ]
        );
    }
}
