use serde::Deserialize;

use super::validation::{self, normalize_email, ValidationError};

/// Body of `POST /signup/submitUser`. Absent fields deserialize as empty and
/// fail validation rather than being rejected by the extractor.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl SignupForm {
    pub fn normalize(mut self) -> Self {
        self.email = normalize_email(&self.email);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::name(&self.name)?;
        validation::username(&self.username)?;
        validation::email(&self.email)?;
        validation::password(&self.password)
    }
}

/// Body of `POST /login/logging`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn normalize(mut self) -> Self {
        self.email = normalize_email(&self.email);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::email_key(&self.email)
    }
}

/// Body of `POST /login/reset`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResetPasswordForm {
    pub email: String,
    pub new_password: String,
}

impl ResetPasswordForm {
    pub fn normalize(mut self) -> Self {
        self.email = normalize_email(&self.email);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::email_key(&self.email)?;
        validation::password(&self.new_password)
    }
}
