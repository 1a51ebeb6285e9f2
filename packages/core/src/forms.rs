// ABOUTME: Client-side validation for the login, signup and profile forms
// ABOUTME: Produces request bodies or per-field error messages

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::api::{Credentials, ProfileUpdate};

pub const MIN_PASSWORD_LEN: usize = 8;

pub const PASSWORD_TOO_SHORT: &str = "Password has to be at least 8 characters long";
pub const PASSWORDS_DONT_MATCH: &str = "Passwords don't match";
pub const INVALID_EMAIL: &str = "Invalid email";

/// Avatar colors offered on the profile screen; the index is sent as `color`
pub const AVATAR_COLORS: [&str; 4] = ["magenta", "yellow", "green", "cyan"];

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
            .expect("email pattern compiles");
}

/// Field name to message, ordered by field name
pub type FieldErrors = BTreeMap<&'static str, String>;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

fn check_email(email: &str, errors: &mut FieldErrors) {
    if !is_valid_email(email) {
        errors.insert("email", INVALID_EMAIL.to_string());
    }
}

fn check_password(password: &str, errors: &mut FieldErrors) {
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert("password", PASSWORD_TOO_SHORT.to_string());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<Credentials, FieldErrors> {
        let mut errors = FieldErrors::new();
        check_email(&self.email, &mut errors);
        check_password(&self.password, &mut errors);

        if errors.is_empty() {
            Ok(Credentials {
                email: self.email.trim().to_string(),
                password: self.password.clone(),
            })
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub confirm: String,
}

impl SignupForm {
    /// Validate and build the request body; `confirm` never leaves the client
    pub fn validate(&self) -> Result<Credentials, FieldErrors> {
        let mut errors = FieldErrors::new();
        check_email(&self.email, &mut errors);
        check_password(&self.password, &mut errors);
        if self.password != self.confirm {
            errors.insert("confirm", PASSWORDS_DONT_MATCH.to_string());
        }

        if errors.is_empty() {
            Ok(Credentials {
                email: self.email.trim().to_string(),
                password: self.password.clone(),
            })
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    /// Index into [`AVATAR_COLORS`]
    pub color: u8,
}

impl ProfileForm {
    pub fn validate(&self) -> Result<ProfileUpdate, FieldErrors> {
        let mut errors = FieldErrors::new();
        let first_name = self.first_name.trim();
        let last_name = self.last_name.trim();

        if first_name.is_empty() {
            errors.insert("firstName", "First name is required".to_string());
        }
        if last_name.is_empty() {
            errors.insert("lastName", "Last name is required".to_string());
        }

        if errors.is_empty() {
            Ok(ProfileUpdate {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                color: self.color % AVATAR_COLORS.len() as u8,
            })
        } else {
            Err(errors)
        }
    }

    pub fn next_color(&mut self) {
        self.color = (self.color + 1) % AVATAR_COLORS.len() as u8;
    }

    pub fn previous_color(&mut self) {
        let len = AVATAR_COLORS.len() as u8;
        self.color = (self.color % len + len - 1) % len;
    }

    pub fn color_name(&self) -> &'static str {
        AVATAR_COLORS[self.color as usize % AVATAR_COLORS.len()]
    }
}
