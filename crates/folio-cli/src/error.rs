use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] folio_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Project ID cannot be empty")]
    EmptyProjectId,
    #[error("Project not found for id/prefix: {0}")]
    ProjectNotFound(String),
    #[error("{0}")]
    AmbiguousProjectId(String),
    #[error("Bad profile config: {0}")]
    Config(String),
    #[error("Sign-in failed: {0}")]
    Auth(String),
    #[error("Not signed in. Run `folio auth login --email <EMAIL> --password <PASSWORD>` first.")]
    NotSignedIn,
    #[error(
        "Supabase is not configured. Run `folio config init` or set SUPABASE_URL and SUPABASE_ANON_KEY."
    )]
    NotConfigured,
}
