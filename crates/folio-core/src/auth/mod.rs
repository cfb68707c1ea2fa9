//! Admin sessions: the session type, where it is kept, and the Supabase
//! client that issues it.

mod client;
mod events;

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::unix_timestamp_now;

pub use client::{describe_failure, validate_credentials, SupabaseAuthClient};
pub use events::{SessionChange, SessionEvents, Subscription};

/// Sessions this close to expiry are treated as expired
const EXPIRY_MARGIN_SECONDS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

/// A signed-in admin. Tokens never show up in `Debug` output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix seconds
    pub expires_at: i64,
    pub user: AuthUser,
}

impl AuthSession {
    #[must_use]
    pub fn is_expired(&self) -> bool {
        unix_timestamp_now() + EXPIRY_MARGIN_SECONDS >= self.expires_at
    }

    /// Email if known, otherwise the user id
    #[must_use]
    pub fn identity(&self) -> &str {
        self.user.email.as_deref().unwrap_or(&self.user.id)
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("user", &self.user)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Auth is misconfigured: {0}")]
    Config(&'static str),
    #[error("Auth request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unreadable auth payload: {0}")]
    Json(#[from] serde_json::Error),
    /// Message reported by the auth service, shown to the admin as is
    #[error("{0}")]
    Api(String),
    #[error("Session storage failed: {0}")]
    SecureStorage(String),
    #[error("Not signed in")]
    NotSignedIn,
    #[error("Session expired, please sign in again")]
    SessionExpired,
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Where a signed-in session survives between runs.
pub trait SessionPersistence: Clone + Send + Sync + 'static {
    fn load_session(&self) -> AuthResult<Option<AuthSession>>;
    fn save_session(&self, session: &AuthSession) -> AuthResult<()>;
    fn clear_session(&self) -> AuthResult<()>;
}

/// Keeps the session for the life of the process only.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    slot: Arc<Mutex<Option<AuthSession>>>,
}

impl SessionPersistence for MemorySessionStore {
    fn load_session(&self) -> AuthResult<Option<AuthSession>> {
        Ok(self.slot.lock().clone())
    }

    fn save_session(&self, session: &AuthSession) -> AuthResult<()> {
        self.slot.lock().replace(session.clone());
        Ok(())
    }

    fn clear_session(&self) -> AuthResult<()> {
        *self.slot.lock() = None;
        Ok(())
    }
}
