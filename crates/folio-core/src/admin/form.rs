//! Create/edit form for a single project.

use std::sync::Arc;

use parking_lot::Mutex;

use super::list::ProjectList;
use super::notice::Notices;
use super::session::SessionGuard;
use crate::auth::AuthError;
use crate::error::{Error, Result};
use crate::gateway::Gateway;
use crate::models::{join_tags, parse_tags, ImageFile, Project, ProjectFields, ProjectId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Closed,
    Creating,
    Editing(Project),
}

impl FormMode {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// How the primary image is supplied in the form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageInputMode {
    #[default]
    Url,
    Upload,
}

/// Editable copy of a project's fields, in the shape the form edits them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
    pub image: String,
    pub images: Vec<String>,
    /// Comma separated
    pub tags: String,
    pub github: String,
    pub live: String,
    pub featured: bool,
}

impl Draft {
    #[must_use]
    pub fn from_project(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone(),
            image: project.image.clone().unwrap_or_default(),
            images: project.images.clone(),
            tags: join_tags(&project.tags),
            github: project.github.clone().unwrap_or_default(),
            live: project.live.clone().unwrap_or_default(),
            featured: project.featured,
        }
    }

    /// Record fields for this draft; blank optionals become absent.
    #[must_use]
    pub fn to_fields(&self) -> ProjectFields {
        ProjectFields {
            title: self.title.clone(),
            description: self.description.clone(),
            image: Some(self.image.clone()),
            images: self.images.clone(),
            tags: parse_tags(&self.tags),
            github: Some(self.github.clone()),
            live: Some(self.live.clone()),
            featured: self.featured,
        }
        .normalized()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    pub mode: FormMode,
    pub draft: Draft,
    pub image_input: ImageInputMode,
    pub saving: bool,
    pub uploading_image: bool,
    pub uploading_gallery: bool,
    pub last_error: Option<String>,
}

impl FormSnapshot {
    fn reset(&mut self, mode: FormMode) {
        self.draft = match &mode {
            FormMode::Editing(project) => Draft::from_project(project),
            FormMode::Closed | FormMode::Creating => Draft::default(),
        };
        self.mode = mode;
        self.image_input = ImageInputMode::Url;
        self.last_error = None;
    }
}

/// Drives the project form: draft edits, uploads and saving.
#[derive(Debug, Clone)]
pub struct ProjectForm {
    gateway: Gateway,
    guard: SessionGuard,
    list: ProjectList,
    notices: Notices,
    state: Arc<Mutex<FormSnapshot>>,
}

impl ProjectForm {
    #[must_use]
    pub fn new(guard: SessionGuard, list: ProjectList, notices: Notices) -> Self {
        Self {
            gateway: guard.gateway().clone(),
            guard,
            list,
            notices,
            state: Arc::new(Mutex::new(FormSnapshot::default())),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> FormSnapshot {
        self.state.lock().clone()
    }

    #[must_use]
    pub fn mode(&self) -> FormMode {
        self.state.lock().mode.clone()
    }

    #[must_use]
    pub fn draft(&self) -> Draft {
        self.state.lock().draft.clone()
    }

    pub fn open_create(&self) {
        self.state.lock().reset(FormMode::Creating);
    }

    pub fn open_edit(&self, project: Project) {
        self.state.lock().reset(FormMode::Editing(project));
    }

    /// Close the form and discard the draft.
    pub fn cancel(&self) {
        self.state.lock().reset(FormMode::Closed);
    }

    pub fn edit_draft(&self, edit: impl FnOnce(&mut Draft)) {
        edit(&mut self.state.lock().draft);
    }

    pub fn set_image_input(&self, mode: ImageInputMode) {
        self.state.lock().image_input = mode;
    }

    /// Drop one gallery image from the draft; nothing is sent until save.
    pub fn remove_gallery_image(&self, url: &str) {
        self.state.lock().draft.images.retain(|image| image != url);
    }

    /// Persist the draft and refresh the list.
    ///
    /// The form closes on success. On failure it stays open with the draft
    /// intact, unless the admin session ended, which closes it.
    pub async fn save(&self) -> Result<Project> {
        let (target, fields) = self.begin_save()?;

        let outcome = tokio::select! {
            biased;
            result = self.persist(target.as_ref(), fields) => Some(result),
            () = self.guard.session_lost() => None,
        };

        match outcome {
            Some(Ok(project)) => {
                // A failed reload is reported through the list's own error.
                let _ = self.list.refresh().await;
                self.state.lock().reset(FormMode::Closed);
                self.finish_save(None);
                self.notices.success(if target.is_some() {
                    "Project updated successfully!"
                } else {
                    "Project created successfully!"
                });
                Ok(project)
            }
            Some(Err(error)) => {
                let message = format!("Failed to save project: {error}");
                if error.is_session_loss() {
                    self.state.lock().reset(FormMode::Closed);
                }
                self.finish_save(Some(message.clone()));
                self.notices.error(message);
                Err(error)
            }
            None => {
                let error = Error::Auth(AuthError::SessionExpired);
                tracing::warn!("Save aborted, admin session ended");
                self.state.lock().reset(FormMode::Closed);
                self.finish_save(Some(error.to_string()));
                self.notices.error(format!("Failed to save project: {error}"));
                Err(error)
            }
        }
    }

    /// Upload the primary image and put its URL in the draft.
    pub async fn upload_image(&self, file: ImageFile) -> Result<String> {
        {
            let mut state = self.state.lock();
            if state.uploading_image {
                return Err(Error::InProgress("Image upload"));
            }
            state.uploading_image = true;
        }

        let result = self.gateway.upload_image(&file).await;

        let mut state = self.state.lock();
        state.uploading_image = false;
        match result {
            Ok(url) => {
                state.draft.image.clone_from(&url);
                state.last_error = None;
                drop(state);
                self.notices.success("Image uploaded successfully!");
                Ok(url)
            }
            Err(error) => {
                let message = match &error {
                    Error::Validation(message) => message.clone(),
                    other => format!("Upload failed: {other}"),
                };
                state.last_error = Some(message.clone());
                drop(state);
                self.notices.error(message);
                Err(error)
            }
        }
    }

    /// Upload a batch of gallery images and append their URLs to the draft.
    pub async fn upload_gallery(&self, files: Vec<ImageFile>) -> Result<Vec<String>> {
        if files.is_empty() {
            return Ok(Vec::new());
        }
        {
            let mut state = self.state.lock();
            if state.uploading_gallery {
                return Err(Error::InProgress("Gallery upload"));
            }
            state.uploading_gallery = true;
        }

        let result = self.gateway.upload_gallery(&files).await;

        let mut state = self.state.lock();
        state.uploading_gallery = false;
        match result {
            Ok(urls) => {
                state.draft.images.extend(urls.iter().cloned());
                state.last_error = None;
                drop(state);
                self.notices
                    .success(format!("{} image(s) uploaded to gallery!", urls.len()));
                Ok(urls)
            }
            Err(error) => {
                let message = match &error {
                    Error::Validation(message) => message.clone(),
                    other => format!("Gallery upload failed: {other}"),
                };
                state.last_error = Some(message.clone());
                drop(state);
                self.notices.error(message);
                Err(error)
            }
        }
    }

    fn begin_save(&self) -> Result<(Option<ProjectId>, ProjectFields)> {
        let mut state = self.state.lock();
        if state.saving {
            return Err(Error::InProgress("Save"));
        }

        let target = match &state.mode {
            FormMode::Closed => {
                return Err(Error::Validation("No project form is open".to_string()));
            }
            FormMode::Creating => None,
            FormMode::Editing(project) => Some(project.id.clone()),
        };

        let fields = state.draft.to_fields();
        if let Err(error) = fields.validate() {
            state.last_error = Some(error.to_string());
            drop(state);
            self.notices.error(error.to_string());
            return Err(error);
        }

        state.saving = true;
        state.last_error = None;
        Ok((target, fields))
    }

    fn finish_save(&self, error: Option<String>) {
        let mut state = self.state.lock();
        state.saving = false;
        state.last_error = error;
    }

    async fn persist(&self, target: Option<&ProjectId>, fields: ProjectFields) -> Result<Project> {
        match target {
            Some(id) => self.gateway.update_project(id, fields).await,
            None => self.gateway.create_project(fields).await,
        }
    }
}
