pub mod auth_cmd;
pub mod common;
pub mod completions;
pub mod config;
pub mod projects;
pub mod terminal;
pub mod upload;
