//! Project list kept in step with the record store.
//!
//! The list is never patched locally: every successful mutation is
//! followed by a full [`ProjectList::refresh`].

use std::sync::Arc;

use parking_lot::Mutex;

use super::notice::Notices;
use crate::error::{Error, Result};
use crate::gateway::Gateway;
use crate::models::{Project, ProjectId};

/// Message shown when the list cannot be loaded
pub const LOAD_ERROR: &str = "Failed to load projects. Please try again later.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListSnapshot {
    pub projects: Vec<Project>,
    pub loading: bool,
    pub error: Option<String>,
    /// A delete or featured toggle is in flight
    pub busy: bool,
}

/// Confirmation token for a delete; only [`ProjectList::confirm_delete`] consumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a delete only happens once the pending delete is confirmed"]
pub struct PendingDelete {
    pub id: ProjectId,
    pub title: String,
}

/// Snapshot plus refresh bookkeeping; a refresh only lands if no newer one
/// has landed before it.
#[derive(Debug, Default)]
struct ListState {
    view: ListSnapshot,
    /// Last refresh started
    issued: u64,
    /// Last refresh whose result was applied
    applied: u64,
}

#[derive(Debug, Clone)]
pub struct ProjectList {
    gateway: Gateway,
    notices: Notices,
    state: Arc<Mutex<ListState>>,
}

impl ProjectList {
    #[must_use]
    pub fn new(gateway: Gateway, notices: Notices) -> Self {
        Self {
            gateway,
            notices,
            state: Arc::new(Mutex::new(ListState::default())),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> ListSnapshot {
        self.state.lock().view.clone()
    }

    #[must_use]
    pub fn projects(&self) -> Vec<Project> {
        self.state.lock().view.projects.clone()
    }

    /// Reload the whole list from the record store.
    ///
    /// On failure the previous projects stay and `error` carries [`LOAD_ERROR`].
    /// When refreshes overlap, a reply older than one already applied is
    /// dropped and `loading` stays set until the latest one returns.
    pub async fn refresh(&self) -> Result<()> {
        let ticket = {
            let mut state = self.state.lock();
            state.issued += 1;
            state.view.loading = true;
            state.view.error = None;
            state.issued
        };

        let result = self.gateway.list_projects().await;

        let mut state = self.state.lock();
        if ticket < state.applied {
            tracing::debug!("Dropping stale project list #{}", ticket);
            return result.map(drop);
        }
        state.applied = ticket;
        if ticket == state.issued {
            state.view.loading = false;
        }
        match result {
            Ok(projects) => {
                state.view.projects = projects;
                Ok(())
            }
            Err(error) => {
                tracing::error!("Failed to load projects: {}", error);
                state.view.error = Some(LOAD_ERROR.to_string());
                Err(error)
            }
        }
    }

    /// First step of a delete; nothing is sent until the token is confirmed.
    pub fn request_delete(&self, project: &Project) -> PendingDelete {
        PendingDelete {
            id: project.id.clone(),
            title: project.title.clone(),
        }
    }

    pub async fn confirm_delete(&self, pending: PendingDelete) -> Result<()> {
        self.begin_mutation()?;
        let result = self.gateway.delete_project(&pending.id).await;

        let outcome = match result {
            Ok(()) => {
                // A failed reload is reported through the list's own error.
                let _ = self.refresh().await;
                self.notices.success("Project deleted successfully!");
                Ok(())
            }
            Err(error) => {
                self.notices
                    .error(format!("Failed to delete project: {error}"));
                Err(error)
            }
        };
        self.end_mutation();
        outcome
    }

    /// Flip `featured`, writing the rest of the record back unchanged.
    pub async fn toggle_featured(&self, project: &Project) -> Result<Project> {
        self.begin_mutation()?;
        let mut fields = project.fields();
        fields.featured = !fields.featured;
        let result = self.gateway.update_project(&project.id, fields).await;

        let outcome = match result {
            Ok(updated) => {
                // A failed reload is reported through the list's own error.
                let _ = self.refresh().await;
                Ok(updated)
            }
            Err(error) => {
                self.notices
                    .error(format!("Failed to update project: {error}"));
                Err(error)
            }
        };
        self.end_mutation();
        outcome
    }

    fn begin_mutation(&self) -> Result<()> {
        let mut state = self.state.lock();
        if state.view.busy {
            return Err(Error::InProgress("A project change"));
        }
        state.view.busy = true;
        Ok(())
    }

    fn end_mutation(&self) {
        self.state.lock().view.busy = false;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use std::collections::VecDeque;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::backend::{MemoryBackend, Operation, ProjectStore, Services};
    use crate::models::ProjectFields;

    /// Record store answering each `list` with the next staged reply after its delay.
    struct StagedLists {
        replies: Mutex<VecDeque<(Duration, Vec<Project>)>>,
    }

    #[async_trait]
    impl ProjectStore for StagedLists {
        async fn list(&self) -> Result<Vec<Project>> {
            let (delay, projects) = self.replies.lock().pop_front().unwrap_or_default();
            tokio::time::sleep(delay).await;
            Ok(projects)
        }

        async fn get(&self, id: &ProjectId) -> Result<Project> {
            Err(Error::NotFound(id.to_string()))
        }

        async fn insert(&self, _fields: &ProjectFields) -> Result<Project> {
            Err(Error::Remote("read only".to_string()))
        }

        async fn update(&self, _id: &ProjectId, _fields: &ProjectFields) -> Result<Project> {
            Err(Error::Remote("read only".to_string()))
        }

        async fn delete(&self, _id: &ProjectId) -> Result<()> {
            Err(Error::Remote("read only".to_string()))
        }
    }

    fn staged_list(replies: Vec<(u64, Project)>) -> ProjectList {
        let replies = replies
            .into_iter()
            .map(|(millis, project)| (Duration::from_millis(millis), vec![project]))
            .collect();
        let gateway = Gateway::new(Services {
            auth: Arc::new(MemoryBackend::new()),
            projects: Arc::new(StagedLists {
                replies: Mutex::new(replies),
            }),
            blobs: Arc::new(MemoryBackend::new()),
        });
        ProjectList::new(gateway, Notices::default())
    }

    fn spawn_refresh(list: &ProjectList) -> tokio::task::JoinHandle<Result<()>> {
        let list = list.clone();
        tokio::spawn(async move { list.refresh().await })
    }

    fn fields(title: &str) -> ProjectFields {
        ProjectFields {
            title: title.to_string(),
            description: format!("{title} description"),
            ..ProjectFields::default()
        }
    }

    fn list(backend: &MemoryBackend) -> (ProjectList, Notices) {
        let notices = Notices::default();
        let list = ProjectList::new(Gateway::from_backend(backend.clone()), notices.clone());
        (list, notices)
    }

    #[tokio::test]
    async fn refresh_failure_sets_fixed_message() {
        let backend = MemoryBackend::new();
        backend.seed(fields("one"));
        let (list, _notices) = list(&backend);
        list.refresh().await.unwrap();

        backend.fail(Operation::List, "timeout");
        assert!(list.refresh().await.is_err());

        let snapshot = list.snapshot();
        assert_eq!(snapshot.error.as_deref(), Some(LOAD_ERROR));
        assert!(!snapshot.loading);
        assert_eq!(snapshot.projects.len(), 1);

        backend.recover(Operation::List);
        list.refresh().await.unwrap();
        assert_eq!(list.snapshot().error, None);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_older_refresh_never_overwrites_newer_list() {
        let seeds = MemoryBackend::new();
        let older = seeds.seed(fields("older"));
        let newer = seeds.seed(fields("newer"));
        let list = staged_list(vec![(200, older), (50, newer.clone())]);

        let first = spawn_refresh(&list);
        tokio::time::sleep(Duration::from_millis(1)).await;
        list.refresh().await.unwrap();
        assert_eq!(list.projects(), vec![newer.clone()]);
        assert!(!list.snapshot().loading);

        first.await.unwrap().unwrap();
        assert_eq!(list.projects(), vec![newer]);
        assert!(!list.snapshot().loading);
    }

    #[tokio::test(start_paused = true)]
    async fn loading_stays_set_until_latest_refresh_returns() {
        let seeds = MemoryBackend::new();
        let older = seeds.seed(fields("older"));
        let newer = seeds.seed(fields("newer"));
        let list = staged_list(vec![(50, older.clone()), (200, newer.clone())]);

        let first = spawn_refresh(&list);
        tokio::time::sleep(Duration::from_millis(1)).await;
        let second = spawn_refresh(&list);

        first.await.unwrap().unwrap();
        let snapshot = list.snapshot();
        assert_eq!(snapshot.projects, vec![older]);
        assert!(snapshot.loading);

        second.await.unwrap().unwrap();
        let snapshot = list.snapshot();
        assert_eq!(snapshot.projects, vec![newer]);
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn delete_requires_confirmation() {
        let backend = MemoryBackend::new();
        backend.sign_in_as("admin@example.com");
        let project = backend.seed(fields("one"));
        let (list, notices) = list(&backend);
        list.refresh().await.unwrap();
        backend.reset_calls();

        let pending = list.request_delete(&project);
        assert_eq!(backend.total_calls(), 0);

        list.confirm_delete(pending).await.unwrap();
        assert_eq!(backend.calls(Operation::Delete), 1);
        assert_eq!(backend.calls(Operation::List), 1);
        assert!(list.projects().is_empty());
        assert_eq!(
            notices.current().unwrap().text,
            "Project deleted successfully!"
        );
    }

    #[tokio::test]
    async fn failed_delete_reports_and_skips_refresh() {
        let backend = MemoryBackend::new();
        backend.sign_in_as("admin@example.com");
        let project = backend.seed(fields("one"));
        let (list, notices) = list(&backend);
        backend.fail(Operation::Delete, "permission denied");

        let pending = list.request_delete(&project);
        assert!(list.confirm_delete(pending).await.is_err());
        assert_eq!(backend.calls(Operation::List), 0);
        assert_eq!(
            notices.current().unwrap().text,
            "Failed to delete project: permission denied"
        );
        assert!(!list.snapshot().busy);
    }

    #[tokio::test]
    async fn deleting_twice_is_not_found() {
        let backend = MemoryBackend::new();
        backend.sign_in_as("admin@example.com");
        let project = backend.seed(fields("one"));
        let (list, _notices) = list(&backend);

        list.confirm_delete(list.request_delete(&project))
            .await
            .unwrap();
        let error = list
            .confirm_delete(list.request_delete(&project))
            .await
            .unwrap_err();
        assert!(matches!(error, Error::NotFound(_)));
    }
}
