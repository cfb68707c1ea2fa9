//! Supabase Storage client for the public image bucket.

use reqwest::{Client, StatusCode};

use crate::auth::{describe_failure, AuthError};
use crate::config::BackendConfig;
use crate::error::{Error, Result};

use super::paths::object_path_from_public_url;

const CACHE_CONTROL: &str = "max-age=3600";

#[derive(Clone, Debug)]
pub struct SupabaseStorage {
    storage_url: String,
    anon_key: String,
    bucket: String,
    client: Client,
}

impl SupabaseStorage {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|error| Error::Config(format!("Failed to build storage client: {error}")))?;

        Ok(Self {
            storage_url: format!("{}/storage/v1", config.base_url()),
            anon_key: config.supabase_anon_key.clone(),
            bucket: config.storage_bucket.clone(),
            client,
        })
    }

    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Upload bytes to `path` without overwriting and return the public URL.
    pub async fn upload(
        &self,
        access_token: &str,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String> {
        let path = normalize_object_path(path)?;
        let url = format!("{}/object/{}/{}", self.storage_url, self.bucket, path);

        let response = self
            .client
            .post(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .header("content-type", content_type)
            .header("cache-control", CACHE_CONTROL)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await
            .map_err(|error| storage_error("upload", path, error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body, Error::Upload));
        }

        tracing::debug!("Uploaded {} to bucket {}", path, self.bucket);
        Ok(self.public_url(path))
    }

    /// Public URL of an object in the bucket.
    #[must_use]
    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/object/public/{}/{}",
            self.storage_url,
            self.bucket,
            path.trim_matches('/')
        )
    }

    /// Object path of a URL served from this bucket.
    #[must_use]
    pub fn object_path(&self, url: &str) -> Option<String> {
        if !url.starts_with(&self.storage_url) {
            return None;
        }
        object_path_from_public_url(url, &self.bucket)
    }

    pub async fn remove(&self, access_token: &str, path: &str) -> Result<()> {
        let path = normalize_object_path(path)?;
        let url = format!("{}/object/{}", self.storage_url, self.bucket);
        let payload = serde_json::json!({ "prefixes": [path] });

        let response = self
            .client
            .delete(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .json(&payload)
            .send()
            .await
            .map_err(|error| storage_error("remove", path, error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body, Error::Upload));
        }

        tracing::debug!("Removed {} from bucket {}", path, self.bucket);
        Ok(())
    }
}

fn normalize_object_path(path: &str) -> Result<&str> {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        return Err(Error::Validation("Object path must not be empty".to_string()));
    }
    Ok(trimmed)
}

fn storage_error(operation: &str, path: &str, error: reqwest::Error) -> Error {
    tracing::warn!("Storage {} failed for {}: {}", operation, path, error);
    Error::Upload(format!("Storage {operation} failed: {error}"))
}

/// Map a non-success response, treating 401 as a lost session.
pub(crate) fn status_error(
    status: StatusCode,
    body: &str,
    wrap: impl FnOnce(String) -> Error,
) -> Error {
    if status == StatusCode::UNAUTHORIZED {
        return Error::Auth(AuthError::SessionExpired);
    }
    wrap(describe_failure(status, body))
}
