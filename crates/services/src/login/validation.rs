//! Field rules for the login and registration form. Each field reports only
//! its first failing rule.

use secrecy::ExposeSecret;
use thiserror::Error;

use super::form::{FormMode, LoginFormData};

pub const PASSWORD_MIN_LEN: usize = 6;
pub const PASSWORD_MAX_LEN: usize = 50;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("Email is required")]
    EmailRequired,
    #[error("Please enter a valid email address")]
    EmailInvalid,
    #[error("Password is required")]
    PasswordRequired,
    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,
    #[error("Password must be less than 50 characters")]
    PasswordTooLong,
    #[error("Confirm password is required")]
    ConfirmRequired,
    #[error("Passwords must match")]
    PasswordsDiffer,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub email: Option<FieldError>,
    pub password: Option<FieldError>,
    pub confirm_password: Option<FieldError>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn iter(&self) -> impl Iterator<Item = FieldError> + '_ {
        [self.email, self.password, self.confirm_password]
            .into_iter()
            .flatten()
    }
}

pub fn validate(data: &LoginFormData, mode: FormMode) -> Result<(), FormErrors> {
    let password = data.password.expose_secret();
    let errors = FormErrors {
        email: check_email(&data.email),
        password: check_password(password),
        confirm_password: match mode {
            FormMode::Login => None,
            FormMode::Register => check_confirm(password, data.confirm_password.as_ref().map(|c| c.expose_secret())),
        },
    };

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_email(email: &str) -> Option<FieldError> {
    if email.is_empty() {
        Some(FieldError::EmailRequired)
    } else if !is_valid_email(email) {
        Some(FieldError::EmailInvalid)
    } else {
        None
    }
}

fn check_password(password: &str) -> Option<FieldError> {
    let len = password.chars().count();
    if len == 0 {
        Some(FieldError::PasswordRequired)
    } else if len < PASSWORD_MIN_LEN {
        Some(FieldError::PasswordTooShort)
    } else if len > PASSWORD_MAX_LEN {
        Some(FieldError::PasswordTooLong)
    } else {
        None
    }
}

fn check_confirm(password: &str, confirm: Option<&str>) -> Option<FieldError> {
    match confirm {
        None | Some("") => Some(FieldError::ConfirmRequired),
        Some(confirm) if confirm != password => Some(FieldError::PasswordsDiffer),
        Some(_) => None,
    }
}

/// `local@domain` where the local part uses the usual atext characters plus
/// dots, and the domain is dot-separated labels of at most 63 alphanumerics
/// or inner hyphens. A top-level dot is not required.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || ".!#$%&'*+/=?^_`{|}~-".contains(c));

    local_ok && !domain.is_empty() && domain.split('.').all(is_domain_label)
}

fn is_domain_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(first), Some(last)) => {
            bytes.len() <= 63
                && first.is_ascii_alphanumeric()
                && last.is_ascii_alphanumeric()
                && bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-')
        }
        _ => false,
    }
}
