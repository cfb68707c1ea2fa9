//! Controllers behind the admin panel.

mod form;
mod list;
mod notice;
mod session;

pub use form::{Draft, FormMode, FormSnapshot, ImageInputMode, ProjectForm};
pub use list::{ListSnapshot, PendingDelete, ProjectList, LOAD_ERROR};
pub use notice::{Notice, NoticeKind, Notices, NOTICE_TTL};
pub use session::{GuardState, SessionGuard};

use crate::auth::AuthSession;
use crate::gateway::Gateway;

/// Notice posted after a successful sign-in
pub const SIGNED_IN: &str = "Logged in successfully!";

/// The controllers of one admin panel, wired to a shared gateway and notice board.
#[derive(Debug, Clone)]
pub struct AdminPanel {
    pub guard: SessionGuard,
    pub list: ProjectList,
    pub form: ProjectForm,
    pub notices: Notices,
}

impl AdminPanel {
    #[must_use]
    pub fn new(gateway: Gateway) -> Self {
        let notices = Notices::default();
        let guard = SessionGuard::new(gateway.clone());
        let list = ProjectList::new(gateway, notices.clone());
        let form = ProjectForm::new(guard.clone(), list.clone(), notices.clone());
        Self {
            guard,
            list,
            form,
            notices,
        }
    }

    /// Check the session and, when signed in, load the list.
    ///
    /// Fails with the load error when the admin is signed in but the list
    /// could not be fetched; the list snapshot carries [`LOAD_ERROR`] as well.
    pub async fn open(&self) -> crate::Result<GuardState> {
        let state = self.guard.mount().await;
        if state.is_authenticated() {
            self.list.refresh().await?;
        }
        Ok(state)
    }

    /// Sign in through the guard and announce it on the notice board.
    pub async fn sign_in(&self, email: &str, password: &str) -> crate::Result<AuthSession> {
        let session = self.guard.sign_in(email, password).await?;
        tracing::info!("Admin signed in as {}", session.identity());
        self.notices.success(SIGNED_IN);
        Ok(session)
    }

    /// Discard any open draft and stop following session changes.
    pub fn close(&self) {
        self.form.cancel();
        self.guard.teardown();
    }

    pub async fn sign_out(&self) -> crate::Result<()> {
        self.form.cancel();
        self.guard.sign_out().await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::backend::{MemoryBackend, Operation};
    use crate::models::ProjectFields;

    fn signed_in_backend() -> MemoryBackend {
        let backend = MemoryBackend::new().with_account("admin@example.com", "secret");
        backend.seed(ProjectFields {
            title: "Folio".to_string(),
            description: "Portfolio".to_string(),
            ..ProjectFields::default()
        });
        backend.sign_in_as("admin@example.com");
        backend
    }

    #[tokio::test]
    async fn open_reports_list_failure_with_its_message() {
        let backend = signed_in_backend();
        backend.fail(Operation::List, "connection reset");
        let panel = AdminPanel::new(Gateway::from_backend(backend));

        let error = panel.open().await.unwrap_err();
        assert_eq!(error.to_string(), "connection reset");
        assert!(panel.guard.state().is_authenticated());
        assert_eq!(panel.list.snapshot().error.as_deref(), Some(LOAD_ERROR));
    }

    #[tokio::test]
    async fn open_signed_out_skips_the_list() {
        let backend = MemoryBackend::new();
        let panel = AdminPanel::new(Gateway::from_backend(backend.clone()));

        assert_eq!(
            panel.open().await.unwrap(),
            GuardState::Unauthenticated { error: None }
        );
        assert_eq!(backend.calls(Operation::List), 0);
    }

    #[tokio::test]
    async fn sign_in_posts_success_notice() {
        let backend = MemoryBackend::new().with_account("admin@example.com", "secret");
        let panel = AdminPanel::new(Gateway::from_backend(backend));

        panel.sign_in("admin@example.com", "secret").await.unwrap();
        let notice = panel.notices.current().unwrap();
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.text, SIGNED_IN);
    }

    #[tokio::test]
    async fn failed_sign_in_posts_nothing() {
        let backend = MemoryBackend::new().with_account("admin@example.com", "secret");
        let panel = AdminPanel::new(Gateway::from_backend(backend));

        assert!(panel.sign_in("admin@example.com", "wrong").await.is_err());
        assert_eq!(panel.notices.current(), None);
        assert!(!panel.guard.state().is_authenticated());
    }
}
