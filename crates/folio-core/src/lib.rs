//! folio-core - Core library for Folio
//!
//! This crate contains the project models, the Supabase-backed gateway and
//! the admin workflow controllers shared by the Folio interfaces (desktop
//! and CLI), plus the small stateful pieces of the landing page.

pub mod admin;
pub mod auth;
pub mod backend;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod records;
pub mod site;
pub mod storage;
pub mod util;

pub use error::{Error, Result};
pub use gateway::Gateway;
pub use models::{ImageFile, Project, ProjectFields, ProjectId};
