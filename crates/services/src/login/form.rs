//! # LoginForm
//!
//! Drives the sign-in page: mode switching, the remember-me checkbox backed
//! by [`KeyValueStore`], validation, registration and the final login.

use std::sync::Arc;

use anyhow::Context;
use domains::{Credential, KeyValueStore, Navigator};
use secrecy::{ExposeSecret, SecretString};
use tracing::{error, info, instrument, warn};

use super::validation::{validate, FormErrors};
use crate::app::HOME_PATH;
use crate::session::SessionStore;

/// Local storage key holding the remembered email.
pub const REMEMBERED_EMAIL_KEY: &str = "rememberedEmail";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Login,
    Register,
}

impl FormMode {
    pub fn toggled(self) -> Self {
        match self {
            FormMode::Login => FormMode::Register,
            FormMode::Register => FormMode::Login,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoginFormData {
    pub email: String,
    pub password: SecretString,
    pub confirm_password: Option<SecretString>,
}

impl LoginFormData {
    pub fn login(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
            confirm_password: None,
        }
    }

    pub fn register(email: impl Into<String>, password: impl Into<String>, confirm: impl Into<String>) -> Self {
        Self {
            confirm_password: Some(SecretString::from(confirm.into())),
            ..Self::login(email, password)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing else happened.
    Invalid(FormErrors),
    LoggedIn,
    /// Credentials did not match. The session carries the error message.
    Rejected,
    /// An unexpected failure, already logged.
    Failed,
}

pub struct LoginForm {
    mode: FormMode,
    email: String,
    remember_me: bool,
    errors: FormErrors,
    session: Arc<SessionStore>,
    storage: Arc<dyn KeyValueStore>,
    navigator: Arc<dyn Navigator>,
}

impl LoginForm {
    /// Opens the form in login mode, pre-filled from the remembered email.
    pub fn open(session: Arc<SessionStore>, storage: Arc<dyn KeyValueStore>, navigator: Arc<dyn Navigator>) -> Self {
        let remembered = storage.get_item(REMEMBERED_EMAIL_KEY).unwrap_or_else(|e| {
            warn!(error = %e, "could not read remembered email");
            None
        });

        Self {
            mode: FormMode::Login,
            remember_me: remembered.is_some(),
            email: remembered.unwrap_or_default(),
            errors: FormErrors::default(),
            session,
            storage,
            navigator,
        }
    }

    /// Unchecking forgets the remembered email immediately.
    pub fn set_remember_me(&mut self, checked: bool) {
        self.remember_me = checked;
        if !checked {
            if let Err(e) = self.storage.remove_item(REMEMBERED_EMAIL_KEY) {
                error!(error = %e, "could not forget remembered email");
            }
        }
    }

    pub fn toggle_mode(&mut self) -> FormMode {
        self.mode = self.mode.toggled();
        self.errors = FormErrors::default();
        self.mode
    }

    #[instrument(skip_all, fields(mode = ?self.mode, email = %data.email))]
    pub fn submit(&mut self, data: LoginFormData) -> SubmitOutcome {
        if let Err(errors) = validate(&data, self.mode) {
            self.errors = errors.clone();
            return SubmitOutcome::Invalid(errors);
        }
        self.errors = FormErrors::default();

        match self.try_submit(&data) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = ?e, "login error");
                SubmitOutcome::Failed
            }
        }
    }

    fn try_submit(&mut self, data: &LoginFormData) -> anyhow::Result<SubmitOutcome> {
        let password = data.password.expose_secret();

        if self.mode == FormMode::Register {
            let added = self
                .session
                .directory()
                .add_user(Credential::new(data.email.clone(), password));
            if added {
                info!("account registered");
                self.mode = FormMode::Login;
                self.email.clear();
            }
        }

        if !self.remember_me {
            self.storage
                .remove_item(REMEMBERED_EMAIL_KEY)
                .context("forgetting remembered email")?;
        } else if self.session.directory().validate_user(&data.email, password) {
            self.storage
                .set_item(REMEMBERED_EMAIL_KEY, &data.email)
                .context("remembering email")?;
        }

        if self.session.login(&data.email, password) {
            self.navigator.replace(HOME_PATH);
            Ok(SubmitOutcome::LoggedIn)
        } else {
            Ok(SubmitOutcome::Rejected)
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Pre-filled email value.
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn remember_me(&self) -> bool {
        self.remember_me
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn login_error(&self) -> Option<String> {
        self.session.snapshot().error().map(str::to_owned)
    }
}
