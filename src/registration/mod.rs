//! Validated Registration Form
//!
//! Collects a fixed set of fields, validates them, and on success echoes
//! every value back. Nothing is stored.
//!
//! ```rust,ignore
//! use panorama::registration::{submit, RegistrationForm, SubmissionOutcome};
//!
//! match submit(&form) {
//!     SubmissionOutcome::Accepted(echo) => { /* show echo.lines */ }
//!     SubmissionOutcome::Rejected(errors) => { /* show every error */ }
//! }
//! ```

mod error;
mod form;
mod rules;

pub use error::{RegistrationError, RegistrationResult};
pub use form::{
    ProfilePicture, RegistrationForm, COUNTRY_OPTIONS, DEFAULT_PICTURE_EXTENSIONS, GENDER_OPTIONS,
    INTEREST_OPTIONS, OCCUPATION_OPTIONS, PLACEHOLDER,
};
pub use rules::{
    is_selected, is_valid_email, is_valid_name, is_valid_phone, validate, Field, FieldError,
};

use serde::Serialize;

/// Separator used when echoing the interests list
pub const INTEREST_SEPARATOR: &str = ", ";

/// One echoed field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EchoLine {
    pub label: String,
    pub value: String,
}

/// The submitted values, shown back after a successful submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Echo {
    pub lines: Vec<EchoLine>,
}

impl Echo {
    fn from_form(form: &RegistrationForm) -> Self {
        let yes_no = |flag: bool| (if flag { "Yes" } else { "No" }).to_string();
        let picture = match &form.profile_picture {
            Some(p) => format!("{} ({} bytes)", p.file_name, p.size()),
            None => "No file uploaded".to_string(),
        };

        let lines = [
            ("Full Name", form.full_name.clone()),
            ("Email", form.email.clone()),
            ("Phone", form.phone.clone()),
            ("Birth Date", form.birth_date.format("%Y-%m-%d").to_string()),
            ("Gender", form.gender.clone()),
            ("Occupation", form.occupation.clone()),
            ("Interests", form.interests.join(INTEREST_SEPARATOR)),
            ("Country", form.country.clone()),
            ("City", form.city.clone()),
            ("About Me", form.about_me.clone()),
            ("Profile Picture", picture),
            ("Terms Accepted", yes_no(form.terms_accepted)),
            ("Newsletter", yes_no(form.newsletter_opt_in)),
        ]
        .into_iter()
        .map(|(label, value)| EchoLine {
            label: label.to_string(),
            value,
        })
        .collect();

        Self { lines }
    }

    /// Value echoed for a label
    pub fn get(&self, label: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|line| line.label == label)
            .map(|line| line.value.as_str())
    }
}

/// Result of submitting the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// Every rule passed
    Accepted(Echo),
    /// At least one rule failed; no echo
    Rejected(Vec<FieldError>),
}

/// Validate and, when clean, echo the form
pub fn submit(form: &RegistrationForm) -> SubmissionOutcome {
    let errors = validate(form);

    if errors.is_empty() {
        tracing::info!("Registration accepted");
        SubmissionOutcome::Accepted(Echo::from_form(form))
    } else {
        tracing::info!(errors = errors.len(), "Registration rejected");
        SubmissionOutcome::Rejected(errors)
    }
}
