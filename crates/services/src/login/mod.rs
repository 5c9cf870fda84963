//! Sign-in and registration form.

pub mod form;
pub mod validation;

pub use form::{FormMode, LoginForm, LoginFormData, SubmitOutcome, REMEMBERED_EMAIL_KEY};
pub use validation::{is_valid_email, validate, FieldError, FormErrors};
