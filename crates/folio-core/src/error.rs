//! Error types for folio-core

use thiserror::Error;

use crate::auth::AuthError;

/// Result type alias using folio-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in folio-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Client-side validation failure; never reaches the network
    #[error("{0}")]
    Validation(String),

    /// Project not found
    #[error("Project not found: {0}")]
    NotFound(String),

    /// Record store failure
    #[error("{0}")]
    Remote(String),

    /// Blob store failure
    #[error("{0}")]
    Upload(String),

    /// Authentication failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The same operation is already running
    #[error("{0} is already in progress")]
    InProgress(&'static str),

    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// True for failures that mean the admin session is no longer usable.
    #[must_use]
    pub const fn is_session_loss(&self) -> bool {
        matches!(
            self,
            Self::Auth(AuthError::NotSignedIn | AuthError::SessionExpired)
        )
    }
}
