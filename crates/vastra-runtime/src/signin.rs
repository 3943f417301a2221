use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vastra_core::models::UserAccount;

/// What the profile sidebar submits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignInForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Phone,
    Password,
}

/// One failed form rule, with a message fit for display next to the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: &'static str,
}

/// A rejected sign-in. Every failed rule is reported, not just the first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("sign-in rejected: {}", messages(.fields))]
pub struct SignInError {
    pub fields: Vec<FieldError>,
}

fn messages(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| f.message)
        .collect::<Vec<_>>()
        .join("; ")
}

impl SignInForm {
    /// Check every rule and mint the account on success. The password is
    /// length-checked only and never stored; the account id is the
    /// submission instant in epoch milliseconds.
    pub fn validate(&self) -> Result<UserAccount, SignInError> {
        let mut fields = Vec::new();

        if self.name.trim().is_empty() {
            fields.push(FieldError {
                field: FormField::Name,
                message: "Name is required",
            });
        }
        if !is_valid_email(self.email.trim()) {
            fields.push(FieldError {
                field: FormField::Email,
                message: "Enter a valid email address",
            });
        }
        if digit_count(&self.phone) != 10 {
            fields.push(FieldError {
                field: FormField::Phone,
                message: "Enter a valid 10-digit phone number",
            });
        }
        if self.password.chars().count() < 6 {
            fields.push(FieldError {
                field: FormField::Password,
                message: "Password must be at least 6 characters",
            });
        }

        if !fields.is_empty() {
            return Err(SignInError { fields });
        }

        Ok(UserAccount {
            id: Utc::now().timestamp_millis().to_string(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
        })
    }
}

/// A user part, an `@`, and a dotted domain. Nothing stricter; the
/// sign-in is never checked against a backend.
fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !local.is_empty() && !host.is_empty() && !tld.is_empty()
}

fn digit_count(phone: &str) -> usize {
    phone.chars().filter(|c| c.is_ascii_digit()).count()
}
