//! Supabase settings baked into the binary by `build.rs`.

use folio_core::config::BackendConfig;
use serde::Deserialize;

/// Public project URL, anon key and storage overrides. Only values that may
/// ship inside a binary belong here.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct DesktopBootstrapConfig {
    #[serde(default)]
    pub supabase_url: Option<String>,
    #[serde(default)]
    pub supabase_anon_key: Option<String>,
    #[serde(default)]
    pub storage_bucket: Option<String>,
    #[serde(default)]
    pub storage_folder: Option<String>,
    #[serde(default)]
    pub projects_table: Option<String>,
}

/// Settings written at build time. Unreadable JSON yields the empty config,
/// which starts the offline preview.
pub fn load_bootstrap_config() -> DesktopBootstrapConfig {
    let raw = include_str!(concat!(env!("OUT_DIR"), "/desktop-bootstrap.json"));
    parse_bootstrap_config(raw)
}

fn parse_bootstrap_config(raw: &str) -> DesktopBootstrapConfig {
    serde_json::from_str(raw).unwrap_or_else(|error| {
        tracing::warn!("Ignoring embedded settings: {}", error);
        DesktopBootstrapConfig::default()
    })
}

impl DesktopBootstrapConfig {
    pub fn backend_config(&self) -> folio_core::Result<Option<BackendConfig>> {
        BackendConfig::from_parts(self.supabase_url.clone(), self.supabase_anon_key.clone())?
            .map(|config| {
                config.with_overrides(
                    self.storage_bucket.clone(),
                    self.storage_folder.clone(),
                    self.projects_table.clone(),
                )
            })
            .transpose()
    }
}

/// Runtime environment wins over the embedded values.
pub fn resolve_backend_config(
    embedded: &DesktopBootstrapConfig,
) -> folio_core::Result<Option<BackendConfig>> {
    match BackendConfig::from_env()? {
        Some(config) => Ok(Some(config)),
        None => embedded.backend_config(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_json_falls_back_to_empty_config() {
        assert_eq!(
            parse_bootstrap_config("{not json"),
            DesktopBootstrapConfig::default()
        );
    }

    #[test]
    fn empty_config_means_not_configured() {
        assert_eq!(DesktopBootstrapConfig::default().backend_config().unwrap(), None);
    }

    #[test]
    fn embedded_overrides_apply_to_backend_config() {
        let config = parse_bootstrap_config(
            r#"{
                "supabase_url": "https://demo.supabase.co/",
                "supabase_anon_key": "anon",
                "storage_folder": "covers",
                "projects_table": null
            }"#,
        )
        .backend_config()
        .unwrap()
        .unwrap();
        assert_eq!(config.supabase_url, "https://demo.supabase.co");
        assert_eq!(config.storage_folder, "covers");
        assert_eq!(config.storage_bucket, "images");
        assert_eq!(config.projects_table, "projects");
    }

    #[test]
    fn partial_embedded_config_is_an_error() {
        let config = DesktopBootstrapConfig {
            supabase_anon_key: Some("anon".to_string()),
            ..Default::default()
        };
        assert!(config.backend_config().is_err());
    }
}
