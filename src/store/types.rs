use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::profile::ProfileForm;

pub const STATE_VERSION: u32 = 1;

/// Everything the app keeps between runs: one profile slot and one session slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredState {
    pub version: u32,
    #[serde(default)]
    pub credit_data: Option<ProfileForm>,
    #[serde(default)]
    pub session: Option<AuthSession>,
}

impl Default for StoredState {
    fn default() -> Self {
        Self::new()
    }
}

impl StoredState {
    pub fn new() -> Self {
        Self {
            version: STATE_VERSION,
            credit_data: None,
            session: None,
        }
    }
}

/// A signed-in user. Written by login/signup, removed by logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub authenticated: bool,
    pub email: String,
    pub signed_in_at: DateTime<Utc>,
}

impl AuthSession {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            authenticated: true,
            email: email.into(),
            signed_in_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_empty() {
        let state = StoredState::new();
        assert_eq!(state.version, STATE_VERSION);
        assert!(state.credit_data.is_none());
        assert!(state.session.is_none());
    }

    #[test]
    fn test_missing_slots_default_to_none() {
        let state: StoredState = serde_json::from_str(r#"{"version": 1}"#).unwrap();
        assert!(state.credit_data.is_none());
        assert!(state.session.is_none());
    }

    #[test]
    fn test_session_is_authenticated() {
        let session = AuthSession::new("a@b.com");
        assert!(session.authenticated);
        assert_eq!(session.email, "a@b.com");
    }
}
