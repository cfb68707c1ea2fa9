//! Session guard gating the admin surface.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::auth::{AuthSession, SessionChange, Subscription};
use crate::error::Result;
use crate::gateway::Gateway;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    /// Checking for an existing session
    Loading,
    Authenticated(AuthSession),
    /// Showing the login form, with the last sign-in error if any
    Unauthenticated { error: Option<String> },
}

impl GuardState {
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    #[must_use]
    pub const fn session(&self) -> Option<&AuthSession> {
        match self {
            Self::Authenticated(session) => Some(session),
            Self::Loading | Self::Unauthenticated { .. } => None,
        }
    }
}

/// Tracks whether an admin is signed in.
///
/// Cloned handles share one state and one session-change subscription,
/// which is released by [`teardown`](Self::teardown) or when the last
/// handle is dropped.
#[derive(Clone)]
pub struct SessionGuard {
    gateway: Gateway,
    state: Arc<watch::Sender<GuardState>>,
    subscription: Arc<Mutex<Option<Subscription>>>,
}

impl SessionGuard {
    #[must_use]
    pub fn new(gateway: Gateway) -> Self {
        let (state, _) = watch::channel(GuardState::Loading);
        Self {
            gateway,
            state: Arc::new(state),
            subscription: Arc::new(Mutex::new(None)),
        }
    }

    /// Check for an existing session and start following session changes.
    pub async fn mount(&self) -> GuardState {
        self.state.send_replace(GuardState::Loading);
        self.subscribe();

        let next = match self.gateway.get_session().await {
            Ok(Some(session)) => {
                tracing::info!("Restored admin session for {}", session.identity());
                GuardState::Authenticated(session)
            }
            Ok(None) => GuardState::Unauthenticated { error: None },
            Err(error) => {
                tracing::warn!("Session check failed: {}", error);
                GuardState::Unauthenticated {
                    error: Some(error.to_string()),
                }
            }
        };
        self.state.send_replace(next.clone());
        next
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        match self.gateway.sign_in(email, password).await {
            Ok(session) => {
                self.state
                    .send_replace(GuardState::Authenticated(session.clone()));
                Ok(session)
            }
            Err(error) => {
                self.state.send_replace(GuardState::Unauthenticated {
                    error: Some(error.to_string()),
                });
                Err(error)
            }
        }
    }

    /// Sign out and return to the login form, even if the remote call fails.
    pub async fn sign_out(&self) -> Result<()> {
        let result = self.gateway.sign_out().await;
        self.state
            .send_replace(GuardState::Unauthenticated { error: None });
        result
    }

    /// Release the session-change subscription.
    pub fn teardown(&self) {
        if self.subscription.lock().take().is_some() {
            tracing::debug!("Session guard unsubscribed");
        }
    }

    #[must_use]
    pub fn state(&self) -> GuardState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Receiver that observes every state change.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<GuardState> {
        self.state.subscribe()
    }

    #[must_use]
    pub const fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// Resolves once the guard is unauthenticated, immediately if it already is.
    pub async fn session_lost(&self) {
        let mut receiver = self.watch();
        let lost = receiver
            .wait_for(|state| matches!(state, GuardState::Unauthenticated { .. }))
            .await
            .is_ok();
        if !lost {
            std::future::pending::<()>().await;
        }
    }

    fn subscribe(&self) {
        let mut subscription = self.subscription.lock();
        if subscription.is_some() {
            return;
        }

        let state = Arc::clone(&self.state);
        *subscription = Some(self.gateway.on_session_change(move |change| match change {
            SessionChange::SignedIn(session) => {
                state.send_replace(GuardState::Authenticated(session.clone()));
            }
            SessionChange::SignedOut => {
                state.send_if_modified(|current| {
                    if matches!(current, GuardState::Unauthenticated { .. }) {
                        false
                    } else {
                        *current = GuardState::Unauthenticated { error: None };
                        true
                    }
                });
            }
        }));
    }
}

impl fmt::Debug for SessionGuard {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SessionGuard")
            .field("state", &*self.state.borrow())
            .field("subscribed", &self.subscription.lock().is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    fn guard(backend: &MemoryBackend) -> SessionGuard {
        SessionGuard::new(Gateway::from_backend(backend.clone()))
    }

    #[tokio::test]
    async fn mount_without_session_shows_login() {
        let backend = MemoryBackend::new();
        let guard = guard(&backend);
        assert_eq!(guard.state(), GuardState::Loading);

        let state = guard.mount().await;
        assert_eq!(state, GuardState::Unauthenticated { error: None });
    }

    #[tokio::test]
    async fn mount_with_session_is_authenticated() {
        let backend = MemoryBackend::new();
        backend.sign_in_as("admin@example.com");
        let guard = guard(&backend);

        assert!(guard.mount().await.is_authenticated());
    }

    #[tokio::test]
    async fn failed_sign_in_keeps_login_with_message() {
        let backend = MemoryBackend::new().with_account("admin@example.com", "secret");
        let guard = guard(&backend);
        guard.mount().await;

        assert!(guard.sign_in("admin@example.com", "nope").await.is_err());
        assert_eq!(
            guard.state(),
            GuardState::Unauthenticated {
                error: Some("Invalid login credentials".to_string())
            }
        );

        guard.sign_in("admin@example.com", "secret").await.unwrap();
        assert!(guard.is_authenticated());
    }

    #[tokio::test]
    async fn session_change_from_other_handle_forces_state() {
        let backend = MemoryBackend::new();
        backend.sign_in_as("admin@example.com");
        let gateway = Gateway::from_backend(backend.clone());
        let guard = SessionGuard::new(gateway.clone());
        guard.mount().await;

        gateway.sign_out().await.unwrap();
        assert_eq!(guard.state(), GuardState::Unauthenticated { error: None });
    }

    #[tokio::test]
    async fn teardown_releases_subscription() {
        let backend = MemoryBackend::new();
        backend.sign_in_as("admin@example.com");
        let gateway = Gateway::from_backend(backend.clone());
        let guard = SessionGuard::new(gateway.clone());
        guard.mount().await;

        guard.teardown();
        gateway.sign_out().await.unwrap();
        assert!(guard.is_authenticated());
    }
}
