//! Remote services behind the gateway.
//!
//! Each trait is one opaque hosted service; [`SupabaseBackend`] implements
//! all three against a Supabase project and [`MemoryBackend`] keeps them in
//! process for tests and the offline preview.

mod memory;
mod supabase;

use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::{AuthResult, AuthSession};
use crate::error::Result;
use crate::models::{Project, ProjectFields, ProjectId};

pub use memory::{MemoryBackend, Operation};
pub use supabase::SupabaseBackend;

/// Authentication service
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession>;
    async fn sign_out(&self) -> AuthResult<()>;
    /// Current session, if one exists
    async fn session(&self) -> AuthResult<Option<AuthSession>>;
}

/// Record store holding the projects table
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Every project, featured first, newest first within each group
    async fn list(&self) -> Result<Vec<Project>>;
    async fn get(&self, id: &ProjectId) -> Result<Project>;
    /// Insert a record; the store assigns `id` and `created_at`
    async fn insert(&self, fields: &ProjectFields) -> Result<Project>;
    /// Replace every writable field of a record
    async fn update(&self, id: &ProjectId, fields: &ProjectFields) -> Result<Project>;
    async fn delete(&self, id: &ProjectId) -> Result<()>;
}

/// Blob store for uploaded images
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store bytes at `path` and return their public URL
    async fn put(&self, path: &str, content_type: &str, bytes: Vec<u8>) -> Result<String>;
    async fn remove(&self, path: &str) -> Result<()>;
    /// Object path behind a public URL, `None` for URLs this store does not serve
    fn object_path(&self, url: &str) -> Option<String>;
}

/// The three services a gateway talks to.
#[derive(Clone)]
pub struct Services {
    pub auth: Arc<dyn AuthService>,
    pub projects: Arc<dyn ProjectStore>,
    pub blobs: Arc<dyn BlobStore>,
}

impl Services {
    /// Use one value for all three services.
    pub fn from_backend<B>(backend: B) -> Self
    where
        B: AuthService + ProjectStore + BlobStore + 'static,
    {
        let backend = Arc::new(backend);
        Self {
            auth: backend.clone(),
            projects: backend.clone(),
            blobs: backend,
        }
    }
}
