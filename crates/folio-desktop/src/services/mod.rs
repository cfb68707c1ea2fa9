//! Application services
//!
//! Backend selection and session persistence for the desktop app.

mod backend;
mod session_store;

pub use backend::{connect, BackendMode, PREVIEW_ADMIN_EMAIL, PREVIEW_ADMIN_PASSWORD};
pub use session_store::KeyringSessionStore;
