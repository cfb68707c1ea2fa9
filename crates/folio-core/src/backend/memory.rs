//! In-process backend used by tests and the offline preview.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use uuid::Uuid;

use super::{AuthService, BlobStore, ProjectStore};
use crate::auth::{AuthError, AuthResult, AuthSession, AuthUser};
use crate::error::{Error, Result};
use crate::models::{display_order, Project, ProjectFields, ProjectId};
use crate::util::unix_timestamp_now;

const URL_PREFIX: &str = "memory://images/";
const SESSION_TTL_SECONDS: i64 = 3600;

/// Backend operations, for call counting and failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    SignIn,
    SignOut,
    Session,
    List,
    Get,
    Insert,
    Update,
    Delete,
    Put,
    Remove,
}

impl Operation {
    const fn requires_session(self) -> bool {
        matches!(
            self,
            Self::Insert | Self::Update | Self::Delete | Self::Put | Self::Remove
        )
    }
}

#[derive(Default)]
struct State {
    accounts: HashMap<String, String>,
    session: Option<AuthSession>,
    session_expired: bool,
    projects: BTreeMap<u64, Project>,
    next_id: u64,
    last_created_at: Option<DateTime<Utc>>,
    blobs: BTreeMap<String, Vec<u8>>,
    calls: BTreeMap<Operation, usize>,
    failures: HashMap<Operation, String>,
}

impl State {
    fn next_created_at(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let created_at = match self.last_created_at {
            Some(last) if now <= last => last + TimeDelta::milliseconds(1),
            _ => now,
        };
        self.last_created_at = Some(created_at);
        created_at
    }

    fn insert(&mut self, fields: ProjectFields) -> Project {
        self.next_id += 1;
        let id = self.next_id;
        let project = Project::from_fields(
            ProjectId::new(id.to_string()),
            self.next_created_at(),
            fields,
        );
        self.projects.insert(id, project.clone());
        project
    }

    fn key_of(&self, id: &ProjectId) -> Option<u64> {
        self.projects
            .iter()
            .find_map(|(key, project)| (&project.id == id).then_some(*key))
    }

    fn check_session(&self) -> Result<()> {
        if self.session.is_some() {
            Ok(())
        } else if self.session_expired {
            Err(AuthError::SessionExpired.into())
        } else {
            Err(AuthError::NotSignedIn.into())
        }
    }
}

/// Auth, record and blob services kept in memory.
///
/// Clones share state, so a test can hand one clone to a gateway and keep
/// another to seed data, inject failures and count calls.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<State>>,
    latency: Option<Duration>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `email`/`password` on sign-in.
    #[must_use]
    pub fn with_account(self, email: &str, password: &str) -> Self {
        self.state
            .lock()
            .accounts
            .insert(email.trim().to_lowercase(), password.to_string());
        self
    }

    /// Delay every operation by `latency` before it takes effect.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Store a project without counting a call; timestamps increase per insert.
    pub fn seed(&self, fields: ProjectFields) -> Project {
        self.state.lock().insert(fields)
    }

    /// Start with an active session for `email`.
    pub fn sign_in_as(&self, email: &str) -> AuthSession {
        let session = new_session(email);
        let mut state = self.state.lock();
        state.session = Some(session.clone());
        state.session_expired = false;
        session
    }

    /// Drop the active session as if the server had revoked it.
    pub fn expire_session(&self) {
        let mut state = self.state.lock();
        state.session = None;
        state.session_expired = true;
    }

    /// Make every call of `operation` fail with `message` until [`recover`](Self::recover).
    pub fn fail(&self, operation: Operation, message: impl Into<String>) {
        self.state
            .lock()
            .failures
            .insert(operation, message.into());
    }

    pub fn recover(&self, operation: Operation) {
        self.state.lock().failures.remove(&operation);
    }

    /// Number of times `operation` was invoked, including failed calls.
    #[must_use]
    pub fn calls(&self, operation: Operation) -> usize {
        self.state.lock().calls.get(&operation).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total_calls(&self) -> usize {
        self.state.lock().calls.values().sum()
    }

    pub fn reset_calls(&self) {
        self.state.lock().calls.clear();
    }

    /// Stored projects in listing order, without counting a call.
    #[must_use]
    pub fn projects(&self) -> Vec<Project> {
        let mut projects: Vec<Project> = self.state.lock().projects.values().cloned().collect();
        projects.sort_by(display_order);
        projects
    }

    /// Paths of stored blobs.
    #[must_use]
    pub fn blob_paths(&self) -> Vec<String> {
        self.state.lock().blobs.keys().cloned().collect()
    }

    /// Record the call, apply latency, then report an injected failure if any.
    async fn enter(&self, operation: Operation) -> std::result::Result<(), Injected> {
        *self.state.lock().calls.entry(operation).or_default() += 1;
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let state = self.state.lock();
        if let Some(message) = state.failures.get(&operation) {
            tracing::debug!("Injected failure for {:?}: {}", operation, message);
            return Err(Injected::Failure(message.clone()));
        }
        if operation.requires_session() {
            state.check_session().map_err(Injected::Session)?;
        }
        Ok(())
    }
}

enum Injected {
    Failure(String),
    Session(Error),
}

impl Injected {
    fn into_error(self, wrap: impl FnOnce(String) -> Error) -> Error {
        match self {
            Self::Failure(message) => wrap(message),
            Self::Session(error) => error,
        }
    }

    fn into_auth_error(self) -> AuthError {
        match self {
            Self::Failure(message) => AuthError::Api(message),
            Self::Session(Error::Auth(error)) => error,
            Self::Session(error) => AuthError::Api(error.to_string()),
        }
    }
}

impl fmt::Debug for MemoryBackend {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        formatter
            .debug_struct("MemoryBackend")
            .field("projects", &state.projects.len())
            .field("blobs", &state.blobs.len())
            .field("signed_in", &state.session.is_some())
            .field("latency", &self.latency)
            .finish_non_exhaustive()
    }
}

fn new_session(email: &str) -> AuthSession {
    AuthSession {
        access_token: format!("memory-access-{}", Uuid::new_v4().simple()),
        refresh_token: format!("memory-refresh-{}", Uuid::new_v4().simple()),
        expires_at: unix_timestamp_now() + SESSION_TTL_SECONDS,
        user: AuthUser {
            id: Uuid::new_v4().to_string(),
            email: Some(email.trim().to_string()),
        },
    }
}

fn check_fields(fields: &ProjectFields) -> Result<()> {
    if fields.title.trim().is_empty() || fields.description.trim().is_empty() {
        return Err(Error::Validation(
            "null value violates not-null constraint".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl AuthService for MemoryBackend {
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        self.enter(Operation::SignIn)
            .await
            .map_err(Injected::into_auth_error)?;

        let known = self
            .state
            .lock()
            .accounts
            .get(&email.trim().to_lowercase())
            .is_some_and(|expected| expected == password);
        if !known {
            return Err(AuthError::Api("Invalid login credentials".to_string()));
        }
        Ok(self.sign_in_as(email))
    }

    async fn sign_out(&self) -> AuthResult<()> {
        self.enter(Operation::SignOut)
            .await
            .map_err(Injected::into_auth_error)?;
        let mut state = self.state.lock();
        state.session = None;
        state.session_expired = false;
        Ok(())
    }

    async fn session(&self) -> AuthResult<Option<AuthSession>> {
        self.enter(Operation::Session)
            .await
            .map_err(Injected::into_auth_error)?;
        Ok(self.state.lock().session.clone())
    }
}

#[async_trait]
impl ProjectStore for MemoryBackend {
    async fn list(&self) -> Result<Vec<Project>> {
        self.enter(Operation::List)
            .await
            .map_err(|injected| injected.into_error(Error::Remote))?;
        Ok(self.projects())
    }

    async fn get(&self, id: &ProjectId) -> Result<Project> {
        self.enter(Operation::Get)
            .await
            .map_err(|injected| injected.into_error(Error::Remote))?;
        let state = self.state.lock();
        state
            .key_of(id)
            .and_then(|key| state.projects.get(&key).cloned())
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    async fn insert(&self, fields: &ProjectFields) -> Result<Project> {
        self.enter(Operation::Insert)
            .await
            .map_err(|injected| injected.into_error(Error::Remote))?;
        check_fields(fields)?;
        Ok(self.state.lock().insert(fields.clone()))
    }

    async fn update(&self, id: &ProjectId, fields: &ProjectFields) -> Result<Project> {
        self.enter(Operation::Update)
            .await
            .map_err(|injected| injected.into_error(Error::Remote))?;
        check_fields(fields)?;

        let mut state = self.state.lock();
        let key = state
            .key_of(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        let slot = state
            .projects
            .get_mut(&key)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        *slot = Project::from_fields(slot.id.clone(), slot.created_at, fields.clone());
        Ok(slot.clone())
    }

    async fn delete(&self, id: &ProjectId) -> Result<()> {
        self.enter(Operation::Delete)
            .await
            .map_err(|injected| injected.into_error(Error::Remote))?;

        let mut state = self.state.lock();
        let key = state
            .key_of(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        state.projects.remove(&key);
        Ok(())
    }
}

#[async_trait]
impl BlobStore for MemoryBackend {
    async fn put(&self, path: &str, _content_type: &str, bytes: Vec<u8>) -> Result<String> {
        self.enter(Operation::Put)
            .await
            .map_err(|injected| injected.into_error(Error::Upload))?;

        let path = path.trim_matches('/').to_string();
        let mut state = self.state.lock();
        if state.blobs.contains_key(&path) {
            return Err(Error::Upload("The resource already exists".to_string()));
        }
        state.blobs.insert(path.clone(), bytes);
        Ok(format!("{URL_PREFIX}{path}"))
    }

    async fn remove(&self, path: &str) -> Result<()> {
        self.enter(Operation::Remove)
            .await
            .map_err(|injected| injected.into_error(Error::Upload))?;
        self.state.lock().blobs.remove(path.trim_matches('/'));
        Ok(())
    }

    fn object_path(&self, url: &str) -> Option<String> {
        url.strip_prefix(URL_PREFIX)
            .map(|path| path.trim_matches('/'))
            .filter(|path| !path.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str) -> ProjectFields {
        ProjectFields {
            title: title.to_string(),
            description: "description".to_string(),
            ..ProjectFields::default()
        }
    }

    #[test]
    fn seeded_timestamps_strictly_increase() {
        let backend = MemoryBackend::new();
        let first = backend.seed(fields("one"));
        let second = backend.seed(fields("two"));
        assert!(second.created_at > first.created_at);
        assert_ne!(first.id, second.id);
        assert_eq!(backend.total_calls(), 0);
    }

    #[tokio::test]
    async fn writes_require_a_session() {
        let backend = MemoryBackend::new();
        let error = backend.insert(&fields("one")).await.unwrap_err();
        assert!(matches!(error, Error::Auth(AuthError::NotSignedIn)));

        backend.sign_in_as("admin@example.com");
        backend.expire_session();
        let error = backend.insert(&fields("one")).await.unwrap_err();
        assert!(error.is_session_loss());
        assert_eq!(backend.calls(Operation::Insert), 2);
    }

    #[tokio::test]
    async fn sign_in_checks_credentials() {
        let backend = MemoryBackend::new().with_account("admin@example.com", "secret");
        let error = backend
            .sign_in("admin@example.com", "wrong")
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "Invalid login credentials");

        let session = backend.sign_in("Admin@Example.com", "secret").await.unwrap();
        assert_eq!(session.identity(), "Admin@Example.com");
        assert!(backend.session().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn injected_failures_last_until_recovered() {
        let backend = MemoryBackend::new();
        backend.fail(Operation::List, "connection reset");
        assert_eq!(
            backend.list().await.unwrap_err().to_string(),
            "connection reset"
        );

        backend.recover(Operation::List);
        assert!(backend.list().await.unwrap().is_empty());
        assert_eq!(backend.calls(Operation::List), 2);
    }

    #[tokio::test]
    async fn blobs_are_served_from_memory_urls() {
        let backend = MemoryBackend::new();
        backend.sign_in_as("admin@example.com");

        let url = backend
            .put("project-images/a.png", "image/png", vec![1, 2, 3])
            .await
            .unwrap();
        assert_eq!(url, "memory://images/project-images/a.png");
        assert_eq!(
            backend.object_path(&url).as_deref(),
            Some("project-images/a.png")
        );

        backend.remove("project-images/a.png").await.unwrap();
        assert!(backend.blob_paths().is_empty());
        assert_eq!(backend.object_path("https://example.com/a.png"), None);
    }
}
