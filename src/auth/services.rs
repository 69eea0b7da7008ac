use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::auth::{
    dto::{LoginForm, ResetPasswordForm, SignupForm},
    password::Hasher,
    repo::UserStore,
    repo_types::{Inserted, NewUser},
    session::SessionUser,
    validation::ValidationError,
};

/// Why an auth request did not produce a session. Never shown to the client.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Rejection {
    #[error("invalid input: {0}")]
    Invalid(#[from] ValidationError),
    #[error("email already registered")]
    EmailTaken,
    #[error("no account for email")]
    UnknownEmail,
    #[error("{0} accounts share this email")]
    AmbiguousEmail(usize),
    #[error("password does not match")]
    WrongPassword,
}

#[derive(Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated(SessionUser),
    Rejected(Rejection),
}

#[derive(Debug, PartialEq, Eq)]
pub enum ResetOutcome {
    /// Number of records whose hash was replaced; zero for an unknown email.
    Updated(u64),
    Rejected(Rejection),
}

/// Signup, login and password reset against an injected credential store.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: Hasher,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, hasher: Hasher) -> Self {
        Self { users, hasher }
    }

    pub async fn signup(&self, form: SignupForm) -> anyhow::Result<AuthOutcome> {
        let form = form.normalize();
        if let Err(e) = form.validate() {
            warn!(error = %e, "signup validation failed");
            return Ok(AuthOutcome::Rejected(e.into()));
        }

        if !self.users.find_by_email(&form.email).await?.is_empty() {
            warn!(email = %form.email, "email already registered");
            return Ok(AuthOutcome::Rejected(Rejection::EmailTaken));
        }

        let password_hash = self.hasher.hash(form.password).await?;
        let inserted = self
            .users
            .insert(NewUser {
                name: form.name,
                username: form.username,
                email: form.email.clone(),
                password_hash,
            })
            .await?;
        if inserted == Inserted::EmailTaken {
            warn!(email = %form.email, "email registered concurrently");
            return Ok(AuthOutcome::Rejected(Rejection::EmailTaken));
        }

        let user = self
            .users
            .find_by_email(&form.email)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("user {} missing right after insert", form.email))?;

        info!(user_id = %user.id, email = %user.email, "user registered");
        Ok(AuthOutcome::Authenticated(SessionUser {
            authenticated: true,
            username: user.username,
            email: user.email,
        }))
    }

    pub async fn login(&self, form: LoginForm) -> anyhow::Result<AuthOutcome> {
        let form = form.normalize();
        if let Err(e) = form.validate() {
            warn!(error = %e, "login validation failed");
            return Ok(AuthOutcome::Rejected(e.into()));
        }

        let mut matches = self.users.find_by_email(&form.email).await?;
        let user = match matches.len() {
            1 => matches.remove(0),
            0 => {
                warn!(email = %form.email, "login unknown email");
                return Ok(AuthOutcome::Rejected(Rejection::UnknownEmail));
            }
            n => {
                warn!(email = %form.email, count = n, "login ambiguous email");
                return Ok(AuthOutcome::Rejected(Rejection::AmbiguousEmail(n)));
            }
        };

        let ok = match self
            .hasher
            .verify(form.password, user.password_hash.clone())
            .await
        {
            Ok(v) => v,
            Err(e) => {
                error!(error = %e, user_id = %user.id, "stored hash unusable");
                false
            }
        };

        if !ok {
            warn!(email = %form.email, user_id = %user.id, "login invalid password");
            return Ok(AuthOutcome::Rejected(Rejection::WrongPassword));
        }

        info!(user_id = %user.id, email = %user.email, "user logged in");
        Ok(AuthOutcome::Authenticated(SessionUser {
            authenticated: true,
            username: user.username,
            email: user.email,
        }))
    }

    pub async fn reset_password(&self, form: ResetPasswordForm) -> anyhow::Result<ResetOutcome> {
        let form = form.normalize();
        if let Err(e) = form.validate() {
            warn!(error = %e, "reset validation failed");
            return Ok(ResetOutcome::Rejected(e.into()));
        }

        let password_hash = self.hasher.hash(form.new_password).await?;
        let updated = self
            .users
            .update_password(&form.email, &password_hash)
            .await?;
        if updated == 0 {
            warn!(email = %form.email, "reset for unknown email");
        } else {
            info!(email = %form.email, count = updated, "password reset");
        }
        Ok(ResetOutcome::Updated(updated))
    }
}
