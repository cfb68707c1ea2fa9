//! Backend gateway used by every admin controller.
//!
//! The gateway validates requests locally, so a rejected draft or image
//! never reaches the network, then delegates to the injected services.
//! Sign-in, sign-out and any call rejected for a lost session are published
//! to session-change subscribers.

use std::fmt;
use std::sync::Arc;

use futures::future::try_join_all;

use crate::auth::{
    validate_credentials, AuthSession, SessionChange, SessionEvents, SessionPersistence,
    Subscription,
};
use crate::backend::{AuthService, BlobStore, ProjectStore, Services, SupabaseBackend};
use crate::config::{BackendConfig, DEFAULT_STORAGE_FOLDER};
use crate::error::Result;
use crate::models::{display_order, ImageFile, Project, ProjectFields, ProjectId};
use crate::storage::build_object_path;

#[derive(Clone)]
pub struct Gateway {
    auth: Arc<dyn AuthService>,
    projects: Arc<dyn ProjectStore>,
    blobs: Arc<dyn BlobStore>,
    events: SessionEvents,
    storage_folder: String,
}

impl Gateway {
    #[must_use]
    pub fn new(services: Services) -> Self {
        Self {
            auth: services.auth,
            projects: services.projects,
            blobs: services.blobs,
            events: SessionEvents::default(),
            storage_folder: DEFAULT_STORAGE_FOLDER.to_string(),
        }
    }

    /// Gateway over a single value implementing every service.
    pub fn from_backend<B>(backend: B) -> Self
    where
        B: AuthService + ProjectStore + BlobStore + 'static,
    {
        Self::new(Services::from_backend(backend))
    }

    /// Gateway over a Supabase project, persisting the session in `store`.
    pub fn supabase<S: SessionPersistence>(config: &BackendConfig, store: S) -> Result<Self> {
        let backend = SupabaseBackend::new(config, store)?;
        Ok(Self::from_backend(backend).with_storage_folder(&config.storage_folder))
    }

    /// Folder that receives uploaded images.
    #[must_use]
    pub fn with_storage_folder(mut self, folder: &str) -> Self {
        let folder = folder.trim().trim_matches('/');
        if !folder.is_empty() {
            self.storage_folder = folder.to_string();
        }
        self
    }

    #[must_use]
    pub fn storage_folder(&self) -> &str {
        &self.storage_folder
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        validate_credentials(email, password)?;

        let session = self.auth.sign_in(email.trim(), password).await?;
        tracing::info!("Signed in as {}", session.identity());
        self.events.publish(&SessionChange::SignedIn(session.clone()));
        Ok(session)
    }

    /// Sign out; subscribers learn about it even when the remote call fails.
    pub async fn sign_out(&self) -> Result<()> {
        let result = self.auth.sign_out().await;
        if let Err(error) = &result {
            tracing::warn!("Remote sign-out failed: {}", error);
        }
        tracing::info!("Signed out");
        self.events.publish(&SessionChange::SignedOut);
        Ok(result?)
    }

    pub async fn get_session(&self) -> Result<Option<AuthSession>> {
        Ok(self.auth.session().await?)
    }

    /// Register a callback for session changes.
    pub fn on_session_change(
        &self,
        callback: impl Fn(&SessionChange) + Send + Sync + 'static,
    ) -> Subscription {
        self.events.subscribe(callback)
    }

    /// All projects, featured first and newest first within each group.
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let mut projects = self.observe(self.projects.list().await)?;
        projects.sort_by(display_order);
        tracing::debug!("Loaded {} project(s)", projects.len());
        Ok(projects)
    }

    pub async fn get_project(&self, id: &ProjectId) -> Result<Project> {
        self.observe(self.projects.get(id).await)
    }

    pub async fn create_project(&self, fields: ProjectFields) -> Result<Project> {
        let fields = fields.normalized();
        fields.validate()?;

        let project = self.observe(self.projects.insert(&fields).await)?;
        tracing::info!("Created project {} ({})", project.id, project.title);
        Ok(project)
    }

    /// Replace every writable field of project `id`.
    ///
    /// Optional fields missing from `fields` are cleared, never left as they were.
    pub async fn update_project(&self, id: &ProjectId, fields: ProjectFields) -> Result<Project> {
        let fields = fields.normalized();
        fields.validate()?;

        let project = self.observe(self.projects.update(id, &fields).await)?;
        tracing::info!("Updated project {}", project.id);
        Ok(project)
    }

    pub async fn delete_project(&self, id: &ProjectId) -> Result<()> {
        self.observe(self.projects.delete(id).await)?;
        tracing::info!("Deleted project {}", id);
        Ok(())
    }

    /// Upload one image and return its public URL.
    pub async fn upload_image(&self, file: &ImageFile) -> Result<String> {
        file.validate()?;
        self.put_image(file).await
    }

    /// Upload a batch of images concurrently, returning URLs in input order.
    ///
    /// Every file is checked before the first upload starts; one bad file
    /// rejects the whole batch.
    pub async fn upload_gallery(&self, files: &[ImageFile]) -> Result<Vec<String>> {
        for file in files {
            file.validate_in_batch()?;
        }

        let urls = try_join_all(files.iter().map(|file| self.put_image(file))).await?;
        tracing::info!("Uploaded {} gallery image(s)", urls.len());
        Ok(urls)
    }

    /// Remove an uploaded image by its public URL; foreign URLs are ignored.
    pub async fn delete_image(&self, url: &str) -> Result<()> {
        let Some(path) = self.blobs.object_path(url) else {
            tracing::debug!("Skipping removal of foreign image URL {}", url);
            return Ok(());
        };
        self.observe(self.blobs.remove(&path).await)?;
        tracing::info!("Removed image {}", path);
        Ok(())
    }

    async fn put_image(&self, file: &ImageFile) -> Result<String> {
        let path = build_object_path(&self.storage_folder, file);
        tracing::debug!("Uploading {} ({} bytes) to {}", file.name, file.size(), path);
        self.observe(
            self.blobs
                .put(&path, &file.content_type, file.bytes.clone())
                .await,
        )
    }

    fn observe<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(error) = &result {
            if error.is_session_loss() {
                tracing::warn!("Admin session lost: {}", error);
                self.events.publish(&SessionChange::SignedOut);
            } else {
                tracing::warn!("Backend call failed: {}", error);
            }
        }
        result
    }
}

impl fmt::Debug for Gateway {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Gateway")
            .field("storage_folder", &self.storage_folder)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::backend::{MemoryBackend, Operation};
    use crate::error::Error;

    fn signed_in() -> (MemoryBackend, Gateway) {
        let backend = MemoryBackend::new();
        backend.sign_in_as("admin@example.com");
        let gateway = Gateway::from_backend(backend.clone());
        (backend, gateway)
    }

    fn record_changes(gateway: &Gateway) -> (Arc<Mutex<Vec<SessionChange>>>, Subscription) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let subscription = gateway.on_session_change(move |change| sink.lock().push(change.clone()));
        (seen, subscription)
    }

    #[tokio::test]
    async fn sign_in_with_blank_fields_never_reaches_backend() {
        let backend = MemoryBackend::new();
        let gateway = Gateway::from_backend(backend.clone());

        let error = gateway.sign_in("", "secret").await.unwrap_err();
        assert_eq!(error.to_string(), "Email is required");
        assert_eq!(backend.calls(Operation::SignIn), 0);
    }

    #[tokio::test]
    async fn sign_in_and_out_publish_changes() {
        let backend = MemoryBackend::new().with_account("admin@example.com", "secret");
        let gateway = Gateway::from_backend(backend);
        let (seen, _subscription) = record_changes(&gateway);

        gateway.sign_in("admin@example.com", "secret").await.unwrap();
        gateway.sign_out().await.unwrap();

        let seen = seen.lock();
        assert!(matches!(seen[0], SessionChange::SignedIn(_)));
        assert_eq!(seen[1], SessionChange::SignedOut);
    }

    #[tokio::test]
    async fn rejected_session_publishes_sign_out() {
        let (backend, gateway) = signed_in();
        let (seen, _subscription) = record_changes(&gateway);
        backend.expire_session();

        let fields = ProjectFields {
            title: "Folio".to_string(),
            description: "Portfolio".to_string(),
            ..ProjectFields::default()
        };
        let error = gateway.create_project(fields).await.unwrap_err();
        assert!(error.is_session_loss());
        assert_eq!(*seen.lock(), vec![SessionChange::SignedOut]);
    }

    #[tokio::test]
    async fn create_trims_fields_before_storing() {
        let (_backend, gateway) = signed_in();
        let project = gateway
            .create_project(ProjectFields {
                title: "  Folio ".to_string(),
                description: "Portfolio".to_string(),
                github: Some("  ".to_string()),
                ..ProjectFields::default()
            })
            .await
            .unwrap();
        assert_eq!(project.title, "Folio");
        assert_eq!(project.github, None);
    }

    #[tokio::test]
    async fn gallery_urls_follow_input_order() {
        let (backend, gateway) = signed_in();
        let files: Vec<ImageFile> = ["a.png", "b.jpg", "c.webp"]
            .iter()
            .map(|name| ImageFile::new(*name, "image/png", vec![0; 16]))
            .collect();

        let urls = gateway.upload_gallery(&files).await.unwrap();
        assert_eq!(urls.len(), 3);
        assert!(urls[0].ends_with(".png"));
        assert!(urls[1].ends_with(".jpg"));
        assert!(urls[2].ends_with(".webp"));
        assert!(urls
            .iter()
            .all(|url| url.starts_with("memory://images/project-images/")));
        assert_eq!(backend.calls(Operation::Put), 3);
    }

    #[tokio::test]
    async fn delete_image_ignores_foreign_urls() {
        let (backend, gateway) = signed_in();
        let url = gateway
            .upload_image(&ImageFile::new("a.png", "image/png", vec![1]))
            .await
            .unwrap();

        gateway
            .delete_image("https://cdn.example.com/a.png")
            .await
            .unwrap();
        assert_eq!(backend.calls(Operation::Remove), 0);

        gateway.delete_image(&url).await.unwrap();
        assert!(backend.blob_paths().is_empty());
    }

    #[tokio::test]
    async fn get_missing_project_is_not_found() {
        let (_backend, gateway) = signed_in();
        let error = gateway
            .get_project(&ProjectId::new("404"))
            .await
            .unwrap_err();
        assert!(matches!(error, Error::NotFound(_)));
    }

    #[test]
    fn storage_folder_ignores_blank_override() {
        let gateway = Gateway::from_backend(MemoryBackend::new()).with_storage_folder(" / ");
        assert_eq!(gateway.storage_folder(), DEFAULT_STORAGE_FOLDER);
        let gateway = gateway.with_storage_folder("/portfolio/");
        assert_eq!(gateway.storage_folder(), "portfolio");
    }
}
