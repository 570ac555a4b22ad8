// adminkit/src/validation.rs
//
// Client-side checks for the login and signup forms
//

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_PASSWORD_LEN: usize = 3;

// `\s` plus U+FEFF, which browser regexes also count as whitespace.
lazy_static! {
    static ref EMAIL_PATTERN: Regex = Regex::new(r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// Inline errors for a rejected form, one per offending field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    fn push(&mut self, field: Field, message: &str) {
        self.0.push(FieldError {
            field,
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, field: Field) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        f.write_str(&messages.join("; "))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

fn check_credentials(errors: &mut ValidationErrors, email: &str, password: &str) {
    if email.trim().is_empty() {
        errors.push(Field::Email, "Email is required");
    } else if !is_valid_email(email) {
        errors.push(Field::Email, "Please enter a valid email address");
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(Field::Password, "Password must be at least 3 characters");
    }
}

pub fn validate_login(form: &LoginForm) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    check_credentials(&mut errors, &form.email, &form.password);
    errors.into_result()
}

pub fn validate_signup(form: &SignupForm) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if form.name.trim().is_empty() {
        errors.push(Field::Name, "Name is required");
    }
    check_credentials(&mut errors, &form.email, &form.password);
    if form.password != form.confirm_password {
        errors.push(Field::ConfirmPassword, "Passwords do not match");
    }

    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn login(email: &str, password: &str) -> LoginForm {
        LoginForm {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn accepts_plain_addresses() {
        assert!(validate_login(&login("admin@example.com", "abc")).is_ok());
        assert!(validate_login(&login("a.b+c@mail.co.uk", "secret")).is_ok());
    }

    #[test]
    fn rejects_malformed_addresses() {
        for email in ["", "plain", "no@tld", "two@@example.com", "sp ace@example.com", "@example.com"] {
            let err = validate_login(&login(email, "abc")).unwrap_err();
            assert!(err.has(Field::Email), "{email:?} should be rejected");
        }
    }

    #[test]
    fn byte_order_mark_counts_as_whitespace() {
        for email in ["a\u{FEFF}b@example.com", "ab@exa\u{FEFF}mple.com", "ab@example.c\u{FEFF}om"] {
            assert!(!is_valid_email(email), "{email:?} should be rejected");
        }
        assert!(is_valid_email("ab@example.com"));
    }

    #[test]
    fn rejects_short_passwords() {
        let err = validate_login(&login("admin@example.com", "ab")).unwrap_err();
        assert!(err.has(Field::Password));
        assert!(!err.has(Field::Email));
    }

    #[test]
    fn signup_reports_every_field() {
        let form = SignupForm {
            name: "  ".to_string(),
            email: "bad".to_string(),
            password: "x".to_string(),
            confirm_password: "y".to_string(),
        };
        let err = validate_signup(&form).unwrap_err();
        assert_eq!(err.0.len(), 4);
        assert!(err.has(Field::ConfirmPassword));
        assert!(err.to_string().contains("Passwords do not match"));
    }

    proptest! {
        #[test]
        fn whitespace_anywhere_in_email_is_rejected(
            local in "[a-z]{1,8}",
            domain in "[a-z]{1,8}",
            pad in "[ \t]",
        ) {
            let email = format!("{local}{pad}@{domain}.com");
            prop_assert!(!is_valid_email(&email));
        }

        #[test]
        fn password_length_threshold(password in ".{0,6}") {
            let result = validate_login(&login("user@example.com", &password));
            prop_assert_eq!(result.is_ok(), password.chars().count() >= MIN_PASSWORD_LEN);
        }
    }
}
