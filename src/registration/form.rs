//! Registration form values and widget option lists

use chrono::NaiveDate;
use serde::Serialize;

use crate::registration::error::{RegistrationError, RegistrationResult};

/// Sentinel first option of every single-select list
pub const PLACEHOLDER: &str = "Select...";

pub const GENDER_OPTIONS: [&str; 4] = [PLACEHOLDER, "Male", "Female", "Other"];

pub const OCCUPATION_OPTIONS: [&str; 6] = [
    "Student",
    "Engineer",
    "Designer",
    "Teacher",
    "Healthcare",
    "Other",
];

pub const INTEREST_OPTIONS: [&str; 6] = ["Technology", "Sports", "Music", "Travel", "Reading", "Art"];

pub const COUNTRY_OPTIONS: [&str; 6] = [
    PLACEHOLDER,
    "Vietnam",
    "United States",
    "United Kingdom",
    "Japan",
    "Other",
];

/// Extensions the upload widget accepts by default
pub const DEFAULT_PICTURE_EXTENSIONS: [&str; 3] = ["jpg", "png", "jpeg"];

/// An uploaded profile picture, held fully in memory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfilePicture {
    pub file_name: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl ProfilePicture {
    /// Accept an upload if its extension is on the allow-list (case-insensitive)
    pub fn from_upload(
        file_name: impl Into<String>,
        bytes: Vec<u8>,
        allowed_extensions: &[String],
    ) -> RegistrationResult<Self> {
        let file_name = file_name.into();
        let extension = std::path::Path::new(&file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        if !allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&extension))
        {
            return Err(RegistrationError::UnsupportedPicture {
                file_name,
                allowed: allowed_extensions.join(", "),
            });
        }

        Ok(Self { file_name, bytes })
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Values submitted with the registration form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub gender: String,
    pub occupation: String,
    /// Multi-select values in selection order
    pub interests: Vec<String>,
    pub country: String,
    pub city: String,
    pub about_me: String,
    pub profile_picture: Option<ProfilePicture>,
    pub terms_accepted: bool,
    pub newsletter_opt_in: bool,
}

impl RegistrationForm {
    /// Form as first shown: empty text, placeholders selected, boxes unticked
    pub fn blank(birth_date: NaiveDate) -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
            birth_date,
            gender: PLACEHOLDER.to_string(),
            occupation: OCCUPATION_OPTIONS[0].to_string(),
            interests: Vec::new(),
            country: PLACEHOLDER.to_string(),
            city: String::new(),
            about_me: String::new(),
            profile_picture: None,
            terms_accepted: false,
            newsletter_opt_in: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        DEFAULT_PICTURE_EXTENSIONS.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn test_picture_allow_list() {
        assert!(ProfilePicture::from_upload("me.jpg", vec![1, 2, 3], &allowed()).is_ok());
        assert!(ProfilePicture::from_upload("me.PNG", vec![], &allowed()).is_ok());
        assert!(ProfilePicture::from_upload("me.jpeg", vec![], &allowed()).is_ok());

        let err = ProfilePicture::from_upload("me.gif", vec![], &allowed()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported picture 'me.gif', allowed types: jpg, png, jpeg"
        );
        assert!(ProfilePicture::from_upload("noextension", vec![], &allowed()).is_err());
    }

    #[test]
    fn test_blank_form_uses_placeholders() {
        let form = RegistrationForm::blank(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        assert_eq!(form.gender, PLACEHOLDER);
        assert_eq!(form.country, PLACEHOLDER);
        assert!(!form.terms_accepted);
    }
}
