//! Picks the backend the app talks to.

use folio_core::backend::MemoryBackend;
use folio_core::{Gateway, ProjectFields};

use super::KeyringSessionStore;
use crate::bootstrap_config::{load_bootstrap_config, resolve_backend_config};

/// Account accepted by the offline preview backend
pub const PREVIEW_ADMIN_EMAIL: &str = "admin@folio.local";
pub const PREVIEW_ADMIN_PASSWORD: &str = "preview";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendMode {
    Supabase { url: String },
    /// In-process store seeded with sample projects; nothing is persisted
    Preview,
}

/// Build the gateway from runtime or embedded config, falling back to the
/// in-memory preview when no Supabase project is configured.
pub fn connect() -> (Gateway, BackendMode) {
    let config = match resolve_backend_config(&load_bootstrap_config()) {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("Invalid backend configuration: {}", error);
            None
        }
    };

    if let Some(config) = config {
        match Gateway::supabase(&config, KeyringSessionStore::default()) {
            Ok(gateway) => {
                tracing::info!("Using Supabase backend at {}", config.base_url());
                return (
                    gateway,
                    BackendMode::Supabase {
                        url: config.base_url().to_string(),
                    },
                );
            }
            Err(error) => tracing::error!("Failed to create Supabase gateway: {}", error),
        }
    }

    tracing::warn!("No backend configured, running the offline preview");
    (Gateway::from_backend(preview_backend()), BackendMode::Preview)
}

fn preview_backend() -> MemoryBackend {
    let backend = MemoryBackend::new().with_account(PREVIEW_ADMIN_EMAIL, PREVIEW_ADMIN_PASSWORD);
    for fields in sample_projects() {
        backend.seed(fields);
    }
    backend
}

fn sample_projects() -> Vec<ProjectFields> {
    vec![
        ProjectFields {
            title: "Folio".to_string(),
            description: "This portfolio: a landing page with a Supabase-backed projects admin."
                .to_string(),
            tags: vec!["Rust".to_string(), "Dioxus".to_string(), "Supabase".to_string()],
            github: Some("https://github.com/Hyscop/folio".to_string()),
            ..ProjectFields::default()
        },
        ProjectFields {
            title: "Command Widget".to_string(),
            description: "A tiny shell in the contact section that knows five words.".to_string(),
            tags: vec!["UI".to_string()],
            featured: true,
            ..ProjectFields::default()
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn preview_backend_lists_featured_first_and_accepts_preview_login() {
        let gateway = Gateway::from_backend(preview_backend());
        let titles = gateway
            .list_projects()
            .await
            .unwrap()
            .into_iter()
            .map(|project| project.title)
            .collect::<Vec<_>>();
        assert_eq!(titles, vec!["Command Widget", "Folio"]);

        let session = gateway
            .sign_in(PREVIEW_ADMIN_EMAIL, PREVIEW_ADMIN_PASSWORD)
            .await
            .unwrap();
        assert_eq!(session.identity(), PREVIEW_ADMIN_EMAIL);
    }
}
