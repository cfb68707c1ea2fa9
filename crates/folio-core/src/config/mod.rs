//! Backend configuration for client apps.
//!
//! Provides a unified `BackendConfig` used by desktop and CLI to reach the
//! Supabase project that stores the portfolio's projects and images.

use std::env;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::{is_http_url, normalize_text_option};

const ENV_SUPABASE_URL: &str = "SUPABASE_URL";
const ENV_SUPABASE_ANON_KEY: &str = "SUPABASE_ANON_KEY";
const ENV_STORAGE_BUCKET: &str = "FOLIO_STORAGE_BUCKET";
const ENV_STORAGE_FOLDER: &str = "FOLIO_STORAGE_FOLDER";
const ENV_PROJECTS_TABLE: &str = "FOLIO_PROJECTS_TABLE";

pub const DEFAULT_STORAGE_BUCKET: &str = "images";
pub const DEFAULT_STORAGE_FOLDER: &str = "project-images";
pub const DEFAULT_PROJECTS_TABLE: &str = "projects";

/// Supabase project settings.
///
/// These are safe-to-ship public values (the anon key is public by design of
/// Supabase row-level security). Service-role keys must never be stored here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Project base URL, e.g. `https://<ref>.supabase.co`
    pub supabase_url: String,
    pub supabase_anon_key: String,
    #[serde(default = "default_storage_bucket")]
    pub storage_bucket: String,
    /// Folder inside the bucket that receives uploaded images
    #[serde(default = "default_storage_folder")]
    pub storage_folder: String,
    #[serde(default = "default_projects_table")]
    pub projects_table: String,
}

impl BackendConfig {
    /// Build a config with the default bucket, folder and table names.
    pub fn new(supabase_url: impl AsRef<str>, supabase_anon_key: impl AsRef<str>) -> Result<Self> {
        Self {
            supabase_url: supabase_url.as_ref().to_string(),
            supabase_anon_key: supabase_anon_key.as_ref().to_string(),
            storage_bucket: default_storage_bucket(),
            storage_folder: default_storage_folder(),
            projects_table: default_projects_table(),
        }
        .normalized()
    }

    /// Load configuration from environment variables.
    ///
    /// Returns `Ok(None)` when neither Supabase variable is set.
    /// Returns an error when only a partial configuration is provided.
    pub fn from_env() -> Result<Option<Self>> {
        parse_config(|key| env::var(key).ok())
    }

    /// Resolve a config from optional values, as stored in profiles or
    /// embedded at build time.
    pub fn from_parts(url: Option<String>, anon_key: Option<String>) -> Result<Option<Self>> {
        match (normalize_text_option(url), normalize_text_option(anon_key)) {
            (None, None) => Ok(None),
            (Some(url), Some(anon_key)) => Self::new(url, anon_key).map(Some),
            (None, Some(_)) => Err(Error::Config(format!(
                "configuration is incomplete. Missing: {ENV_SUPABASE_URL}"
            ))),
            (Some(_), None) => Err(Error::Config(format!(
                "configuration is incomplete. Missing: {ENV_SUPABASE_ANON_KEY}"
            ))),
        }
    }

    /// Replace the bucket, folder and table names with whichever of these
    /// are set and not blank.
    pub fn with_overrides(
        mut self,
        storage_bucket: Option<String>,
        storage_folder: Option<String>,
        projects_table: Option<String>,
    ) -> Result<Self> {
        if let Some(bucket) = normalize_text_option(storage_bucket) {
            self.storage_bucket = bucket;
        }
        if let Some(folder) = normalize_text_option(storage_folder) {
            self.storage_folder = folder;
        }
        if let Some(table) = normalize_text_option(projects_table) {
            self.projects_table = table;
        }
        self.normalized()
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.supabase_url
    }

    fn normalized(mut self) -> Result<Self> {
        let url = self.supabase_url.trim().trim_end_matches('/').to_string();
        if url.is_empty() {
            return Err(Error::Config(format!("{ENV_SUPABASE_URL} must not be empty")));
        }
        if !is_http_url(&url) {
            return Err(Error::Config(format!(
                "{ENV_SUPABASE_URL} must start with http:// or https://"
            )));
        }
        self.supabase_url = url;

        self.supabase_anon_key = self.supabase_anon_key.trim().to_string();
        if self.supabase_anon_key.is_empty() {
            return Err(Error::Config(format!(
                "{ENV_SUPABASE_ANON_KEY} must not be empty"
            )));
        }

        self.storage_bucket = normalize_text_option(Some(self.storage_bucket))
            .unwrap_or_else(default_storage_bucket);
        self.storage_folder = normalize_text_option(Some(self.storage_folder))
            .map(|folder| folder.trim_matches('/').to_string())
            .filter(|folder| !folder.is_empty())
            .unwrap_or_else(default_storage_folder);
        self.projects_table = normalize_text_option(Some(self.projects_table))
            .unwrap_or_else(default_projects_table);
        Ok(self)
    }
}

fn parse_config(lookup: impl Fn(&str) -> Option<String>) -> Result<Option<BackendConfig>> {
    BackendConfig::from_parts(lookup(ENV_SUPABASE_URL), lookup(ENV_SUPABASE_ANON_KEY))?
        .map(|config| {
            config.with_overrides(
                lookup(ENV_STORAGE_BUCKET),
                lookup(ENV_STORAGE_FOLDER),
                lookup(ENV_PROJECTS_TABLE),
            )
        })
        .transpose()
}

fn default_storage_bucket() -> String {
    DEFAULT_STORAGE_BUCKET.to_string()
}

fn default_storage_folder() -> String {
    DEFAULT_STORAGE_FOLDER.to_string()
}

fn default_projects_table() -> String {
    DEFAULT_PROJECTS_TABLE.to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn parse_from_map(map: &HashMap<&str, &str>) -> Result<Option<BackendConfig>> {
        parse_config(|key| map.get(key).map(|value| (*value).to_string()))
    }

    #[test]
    fn parse_config_none_returns_none() {
        let map = HashMap::new();
        assert!(parse_from_map(&map).unwrap().is_none());
    }

    #[test]
    fn parse_config_requires_anon_key() {
        let mut map = HashMap::new();
        map.insert(ENV_SUPABASE_URL, "https://demo.supabase.co");

        let err = parse_from_map(&map).unwrap_err();
        match err {
            Error::Config(message) => assert!(message.contains(ENV_SUPABASE_ANON_KEY)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_config_applies_defaults_and_trims_url() {
        let mut map = HashMap::new();
        map.insert(ENV_SUPABASE_URL, " https://demo.supabase.co/ ");
        map.insert(ENV_SUPABASE_ANON_KEY, " anon ");

        let config = parse_from_map(&map).unwrap().unwrap();
        assert_eq!(config.base_url(), "https://demo.supabase.co");
        assert_eq!(config.supabase_anon_key, "anon");
        assert_eq!(config.storage_bucket, DEFAULT_STORAGE_BUCKET);
        assert_eq!(config.storage_folder, DEFAULT_STORAGE_FOLDER);
        assert_eq!(config.projects_table, DEFAULT_PROJECTS_TABLE);
    }

    #[test]
    fn parse_config_honors_overrides() {
        let mut map = HashMap::new();
        map.insert(ENV_SUPABASE_URL, "https://demo.supabase.co");
        map.insert(ENV_SUPABASE_ANON_KEY, "anon");
        map.insert(ENV_STORAGE_BUCKET, "media");
        map.insert(ENV_STORAGE_FOLDER, "/portfolio/");
        map.insert(ENV_PROJECTS_TABLE, "works");

        let config = parse_from_map(&map).unwrap().unwrap();
        assert_eq!(config.storage_bucket, "media");
        assert_eq!(config.storage_folder, "portfolio");
        assert_eq!(config.projects_table, "works");
    }

    #[test]
    fn parse_config_rejects_url_without_scheme() {
        let mut map = HashMap::new();
        map.insert(ENV_SUPABASE_URL, "demo.supabase.co");
        map.insert(ENV_SUPABASE_ANON_KEY, "anon");

        assert!(matches!(parse_from_map(&map), Err(Error::Config(_))));
    }

    #[test]
    fn deserialize_fills_defaults() {
        let config: BackendConfig = serde_json::from_str(
            r#"{"supabase_url":"https://demo.supabase.co","supabase_anon_key":"anon"}"#,
        )
        .unwrap();
        assert_eq!(config.storage_bucket, DEFAULT_STORAGE_BUCKET);
    }

    #[test]
    #[ignore = "Requires local Supabase env vars in process environment or .env"]
    fn from_env_loads_real_config() {
        let _ = dotenvy::dotenv();

        let config = BackendConfig::from_env()
            .expect("env parsing should not error")
            .expect("Supabase config should be present");
        assert!(is_http_url(config.base_url()));
    }
}
