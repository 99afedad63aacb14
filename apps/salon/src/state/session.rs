//! # Session State
//!
//! Process-wide login session with explicit init on login and teardown on
//! sign-out.
//!
//! ## Authentication Seam
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Session Lifecycle                                │
//! │                                                                         │
//! │  login(username, password)                                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Authenticator::authenticate() ──► StaticAuthenticator (config creds)   │
//! │         │                           └─ the seam a real auth service     │
//! │         │                              would implement instead          │
//! │         ▼                                                               │
//! │  Session { username, role, logged_in_at }                               │
//! │         │                                                               │
//! │  gated commands call require() ── no session ──► AUTH_REQUIRED          │
//! │         │                                                               │
//! │  logout() ──► session dropped                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use ts_rs::TS;

use crate::error::AppError;
use crate::state::AppConfig;

/// An active login session.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Who is logged in.
    pub username: String,

    /// Role label shown in the header chrome.
    pub role: String,

    /// When the session was established.
    #[ts(as = "String")]
    pub logged_in_at: DateTime<Utc>,
}

/// The credential check collaborator.
///
/// Authentication design is out of scope; this trait is where a real auth
/// service would plug in.
pub trait Authenticator: Send + Sync {
    /// Returns true when the credentials are valid.
    fn authenticate(&self, username: &str, password: &str) -> bool;
}

/// Default authenticator: exact match against the configured credentials.
#[derive(Debug)]
pub struct StaticAuthenticator {
    username: String,
    password: String,
}

impl StaticAuthenticator {
    /// Builds the authenticator from the app config's login credentials.
    pub fn from_config(config: &AppConfig) -> Self {
        StaticAuthenticator {
            username: config.login_username.clone(),
            password: config.login_password.clone(),
        }
    }
}

impl Authenticator for StaticAuthenticator {
    fn authenticate(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}

/// Managed session state.
///
/// A `Mutex<Option<Session>>` rather than `RwLock`: session reads are cheap
/// and writes (login/logout) are rare.
pub struct SessionState {
    authenticator: Box<dyn Authenticator>,
    current: Mutex<Option<Session>>,
}

impl SessionState {
    /// Creates logged-out session state with the given authenticator.
    pub fn new(authenticator: Box<dyn Authenticator>) -> Self {
        SessionState {
            authenticator,
            current: Mutex::new(None),
        }
    }

    /// Attempts a login. On success the session is initialized and returned.
    pub fn login(&self, username: &str, password: &str) -> Result<Session, AppError> {
        if !self.authenticator.authenticate(username, password) {
            return Err(AppError::auth_failed());
        }

        let session = Session {
            username: username.to_string(),
            role: "admin".to_string(),
            logged_in_at: Utc::now(),
        };

        *self.current.lock().expect("Session mutex poisoned") = Some(session.clone());
        info!(username, "Logged in");

        Ok(session)
    }

    /// Tears the session down. A no-op when already logged out.
    pub fn logout(&self) {
        let mut current = self.current.lock().expect("Session mutex poisoned");
        if let Some(session) = current.take() {
            info!(username = %session.username, "Logged out");
        }
    }

    /// Returns the active session, if any.
    pub fn current(&self) -> Option<Session> {
        self.current.lock().expect("Session mutex poisoned").clone()
    }

    /// True while a session is active.
    pub fn is_authenticated(&self) -> bool {
        self.current.lock().expect("Session mutex poisoned").is_some()
    }

    /// Returns the active session or the AUTH_REQUIRED error.
    ///
    /// Gated commands call this first, before touching any other state or
    /// the network.
    pub fn require(&self) -> Result<Session, AppError> {
        self.current().ok_or_else(AppError::auth_required)
    }
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn state() -> SessionState {
        SessionState::new(Box::new(StaticAuthenticator::from_config(
            &AppConfig::default(),
        )))
    }

    #[test]
    fn test_login_with_valid_credentials() {
        let state = state();
        let session = state.login("admin", "12345").unwrap();
        assert_eq!(session.username, "admin");
        assert_eq!(session.role, "admin");
        assert!(state.is_authenticated());
        assert!(state.require().is_ok());
    }

    #[test]
    fn test_login_with_bad_credentials() {
        let state = state();
        let err = state.login("admin", "wrong").unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthFailed);
        assert_eq!(err.message, "Invalid credentials. Please try again.");
        assert!(!state.is_authenticated());
    }

    #[test]
    fn test_logout_tears_down() {
        let state = state();
        state.login("admin", "12345").unwrap();
        state.logout();
        assert!(state.current().is_none());

        let err = state.require().unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthRequired);
    }
}
