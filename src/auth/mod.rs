use anyhow::Result;
use std::fmt;
use std::time::Duration;

use crate::store::{AuthSession, SessionRepository};

/// Sign-up details as typed into the form.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    MissingFields(&'static str),
    PasswordMismatch,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingFields(msg) => f.write_str(msg),
            AuthError::PasswordMismatch => write!(f, "Passwords do not match"),
        }
    }
}

impl std::error::Error for AuthError {}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Mock login: any non-empty email/password pair is accepted after `delay`.
pub async fn login<S: SessionRepository>(
    store: &S,
    email: &str,
    password: &str,
    delay: Duration,
) -> Result<AuthSession> {
    if is_blank(email) || is_blank(password) {
        return Err(AuthError::MissingFields("Please enter both email and password").into());
    }

    start_session(store, email.trim(), delay).await
}

/// Mock signup: name, email and password are required and the password
/// must match its confirmation. Nothing is stored for a rejected form.
pub async fn signup<S: SessionRepository>(
    store: &S,
    form: &SignupForm,
    delay: Duration,
) -> Result<AuthSession> {
    if is_blank(&form.full_name) || is_blank(&form.email) || is_blank(&form.password) {
        return Err(AuthError::MissingFields("Please fill in all required fields").into());
    }
    if form.password != form.confirm_password {
        return Err(AuthError::PasswordMismatch.into());
    }

    start_session(store, form.email.trim(), delay).await
}

async fn start_session<S: SessionRepository>(
    store: &S,
    email: &str,
    delay: Duration,
) -> Result<AuthSession> {
    tracing::debug!("simulating auth round trip of {:?}", delay);
    tokio::time::sleep(delay).await;

    let session = AuthSession::new(email);
    store.save_session(&session)?;
    tracing::info!("signed in as {}", email);
    Ok(session)
}

pub fn logout<S: SessionRepository>(store: &S) -> Result<()> {
    store.clear_session()
}

/// The signed-in user, if any.
pub fn current_session<S: SessionRepository>(store: &S) -> Result<Option<AuthSession>> {
    Ok(store
        .load_session()?
        .filter(|session| session.authenticated))
}
