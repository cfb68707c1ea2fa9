//! Supabase-hosted auth, records and storage.

use async_trait::async_trait;

use super::{AuthService, BlobStore, ProjectStore};
use crate::auth::{AuthResult, AuthSession, SessionPersistence, SupabaseAuthClient};
use crate::config::BackendConfig;
use crate::error::Result;
use crate::models::{Project, ProjectFields, ProjectId};
use crate::records::SupabaseRecords;
use crate::storage::SupabaseStorage;

/// One Supabase project serving all three backend services.
///
/// Reads go out with the anon key; writes and uploads carry the access token
/// of the persisted admin session.
#[derive(Clone)]
pub struct SupabaseBackend<S: SessionPersistence> {
    auth: SupabaseAuthClient<S>,
    records: SupabaseRecords,
    storage: SupabaseStorage,
}

impl<S: SessionPersistence> SupabaseBackend<S> {
    pub fn new(config: &BackendConfig, store: S) -> Result<Self> {
        Ok(Self {
            auth: SupabaseAuthClient::new(
                config.base_url(),
                config.supabase_anon_key.clone(),
                store,
            )?,
            records: SupabaseRecords::new(config)?,
            storage: SupabaseStorage::new(config)?,
        })
    }
}

#[async_trait]
impl<S: SessionPersistence> AuthService for SupabaseBackend<S> {
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        self.auth.sign_in(email, password).await
    }

    async fn sign_out(&self) -> AuthResult<()> {
        self.auth.sign_out().await
    }

    async fn session(&self) -> AuthResult<Option<AuthSession>> {
        self.auth.restore_session().await
    }
}

#[async_trait]
impl<S: SessionPersistence> ProjectStore for SupabaseBackend<S> {
    async fn list(&self) -> Result<Vec<Project>> {
        self.records.list(None).await
    }

    async fn get(&self, id: &ProjectId) -> Result<Project> {
        self.records.get(None, id).await
    }

    async fn insert(&self, fields: &ProjectFields) -> Result<Project> {
        let token = self.auth.access_token().await?;
        self.records.insert(&token, fields).await
    }

    async fn update(&self, id: &ProjectId, fields: &ProjectFields) -> Result<Project> {
        let token = self.auth.access_token().await?;
        self.records.update(&token, id, fields).await
    }

    async fn delete(&self, id: &ProjectId) -> Result<()> {
        let token = self.auth.access_token().await?;
        self.records.delete(&token, id).await
    }
}

#[async_trait]
impl<S: SessionPersistence> BlobStore for SupabaseBackend<S> {
    async fn put(&self, path: &str, content_type: &str, bytes: Vec<u8>) -> Result<String> {
        let token = self.auth.access_token().await?;
        self.storage.upload(&token, path, content_type, bytes).await
    }

    async fn remove(&self, path: &str) -> Result<()> {
        let token = self.auth.access_token().await?;
        self.storage.remove(&token, path).await
    }

    fn object_path(&self, url: &str) -> Option<String> {
        self.storage.object_path(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemorySessionStore;
    use crate::error::Error;

    fn backend() -> SupabaseBackend<MemorySessionStore> {
        let config = BackendConfig::new("https://demo.supabase.co", "anon").unwrap();
        SupabaseBackend::new(&config, MemorySessionStore::default()).unwrap()
    }

    #[tokio::test]
    async fn writes_without_session_fail_before_any_request() {
        let backend = backend();
        let error = backend
            .delete(&ProjectId::new("1"))
            .await
            .unwrap_err();
        assert!(error.is_session_loss());

        let error = backend
            .put("project-images/a.png", "image/png", Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(error, Error::Auth(_)));
    }

    #[tokio::test]
    async fn session_is_absent_without_stored_session() {
        assert!(backend().session().await.unwrap().is_none());
    }
}
