//! Named Supabase profiles stored in `<config dir>/folio/cli-config.json`.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use folio_core::config::BackendConfig;
use folio_core::util::normalize_text_option;
use serde::{Deserialize, Serialize};

use crate::error::CliError;

const PROFILE_ENV: &str = "FOLIO_PROFILE";
const FALLBACK_PROFILE: &str = "default";
const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliProfilesConfig {
    #[serde(default = "format_version")]
    pub version: u32,
    #[serde(default)]
    pub active_profile: Option<String>,
    #[serde(default)]
    pub profiles: BTreeMap<String, CliProfile>,
}

impl Default for CliProfilesConfig {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            active_profile: None,
            profiles: BTreeMap::new(),
        }
    }
}

/// Supabase settings of one profile. Unset storage names use the library defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CliProfile {
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub storage_bucket: Option<String>,
    pub storage_folder: Option<String>,
    pub projects_table: Option<String>,
}

const fn format_version() -> u32 {
    FORMAT_VERSION
}

pub fn default_config_path() -> Result<PathBuf, CliError> {
    let dir = dirs::config_dir()
        .ok_or_else(|| CliError::Config("Could not locate the user config directory".into()))?;
    Ok(dir.join("folio").join("cli-config.json"))
}

fn file_error(action: &str, path: &Path, error: impl std::fmt::Display) -> CliError {
    CliError::Config(format!("Could not {action} {}: {error}", path.display()))
}

impl CliProfilesConfig {
    pub fn load() -> Result<Self, CliError> {
        Self::load_from_path(&default_config_path()?)
    }

    /// A missing file is an empty config.
    pub fn load_from_path(path: &Path) -> Result<Self, CliError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(error) => return Err(file_error("read", path, error)),
        };
        let config: Self =
            serde_json::from_str(&raw).map_err(|error| file_error("parse", path, error))?;
        Ok(config.cleaned())
    }

    pub fn save(&self) -> Result<PathBuf, CliError> {
        let path = default_config_path()?;
        self.save_to_path(&path)?;
        Ok(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), CliError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|error| file_error("create", dir, error))?;
        }
        let json = serde_json::to_string_pretty(&self.clone().cleaned())?;
        fs::write(path, json).map_err(|error| file_error("write", path, error))
    }

    /// `--profile`, then `FOLIO_PROFILE`, then the active profile, then `default`.
    pub fn resolve_profile_name(&self, explicit: Option<&str>) -> String {
        normalize_text_option(explicit.map(str::to_string))
            .or_else(|| normalize_text_option(std::env::var(PROFILE_ENV).ok()))
            .or_else(|| self.active_profile.clone())
            .unwrap_or_else(|| FALLBACK_PROFILE.to_string())
    }

    pub fn profile(&self, name: &str) -> Option<&CliProfile> {
        self.profiles.get(name)
    }

    pub fn profile_mut_or_default(&mut self, name: &str) -> &mut CliProfile {
        self.profiles.entry(name.to_string()).or_default()
    }

    fn cleaned(mut self) -> Self {
        self.active_profile = normalize_text_option(self.active_profile);
        self.profiles = self
            .profiles
            .into_iter()
            .map(|(name, profile)| (name, profile.cleaned()))
            .collect();
        self
    }
}

impl CliProfile {
    pub fn supabase_url(&self) -> Option<String> {
        normalize_text_option(self.supabase_url.clone())
    }

    pub fn supabase_anon_key(&self) -> Option<String> {
        normalize_text_option(self.supabase_anon_key.clone())
    }

    /// `Ok(None)` when the profile has neither URL nor key.
    pub fn backend_config(&self) -> folio_core::Result<Option<BackendConfig>> {
        BackendConfig::from_parts(self.supabase_url(), self.supabase_anon_key())?
            .map(|config| {
                config.with_overrides(
                    self.storage_bucket.clone(),
                    self.storage_folder.clone(),
                    self.projects_table.clone(),
                )
            })
            .transpose()
    }

    fn cleaned(self) -> Self {
        Self {
            supabase_url: normalize_text_option(self.supabase_url)
                .map(|url| url.trim_end_matches('/').to_string()),
            supabase_anon_key: normalize_text_option(self.supabase_anon_key),
            storage_bucket: normalize_text_option(self.storage_bucket),
            storage_folder: normalize_text_option(
                self.storage_folder
                    .map(|folder| folder.trim().trim_matches('/').to_string()),
            ),
            projects_table: normalize_text_option(self.projects_table),
        }
    }
}

/// The profile's backend, or the environment's when the profile has none.
pub fn resolve_backend_config(
    config: &CliProfilesConfig,
    profile_name: &str,
) -> folio_core::Result<Option<BackendConfig>> {
    let from_profile = match config.profile(profile_name) {
        Some(profile) => profile.backend_config()?,
        None => None,
    };
    match from_profile {
        Some(backend) => Ok(Some(backend)),
        None => BackendConfig::from_env(),
    }
}
