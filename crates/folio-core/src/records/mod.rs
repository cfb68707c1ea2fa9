//! PostgREST access to the projects table.

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::BackendConfig;
use crate::error::{Error, Result};
use crate::models::{Project, ProjectFields, ProjectId};
use crate::storage::status_error;

const LIST_ORDER: &str = "featured.desc,created_at.desc";
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const RETURN_REPRESENTATION: &str = "return=representation";

#[derive(Clone, Debug)]
pub struct SupabaseRecords {
    table_url: String,
    anon_key: String,
    client: Client,
}

impl SupabaseRecords {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|error| Error::Config(format!("Failed to build records client: {error}")))?;

        Ok(Self {
            table_url: format!("{}/rest/v1/{}", config.base_url(), config.projects_table),
            anon_key: config.supabase_anon_key.clone(),
            client,
        })
    }

    /// All projects, featured first and newest first within each group.
    ///
    /// Reads are public; `access_token` is `None` for anonymous visitors.
    pub async fn list(&self, access_token: Option<&str>) -> Result<Vec<Project>> {
        let request = self
            .client
            .get(&self.table_url)
            .query(&[("select", "*"), ("order", LIST_ORDER)]);
        let response = self.send(self.authorize(request, access_token)).await?;
        decode(response).await
    }

    pub async fn get(&self, access_token: Option<&str>, id: &ProjectId) -> Result<Project> {
        let request = self
            .client
            .get(&self.table_url)
            .query(&[("select", "*".to_string()), ("id", eq(id))])
            .header("Accept", SINGLE_OBJECT);

        let response = self.authorize(request, access_token).send().await.map_err(remote_error)?;
        // PostgREST answers 406 when the single-object filter matched nothing.
        if response.status() == StatusCode::NOT_ACCEPTABLE {
            return Err(Error::NotFound(id.to_string()));
        }
        decode(check(response).await?).await
    }

    pub async fn insert(&self, access_token: &str, fields: &ProjectFields) -> Result<Project> {
        let request = self
            .client
            .post(&self.table_url)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(fields);
        let response = self.send(self.authorize(request, Some(access_token))).await?;

        let mut rows: Vec<Project> = decode(response).await?;
        rows.pop()
            .ok_or_else(|| Error::Remote("Insert returned no project".to_string()))
    }

    /// Replace every editable field of an existing project.
    pub async fn update(
        &self,
        access_token: &str,
        id: &ProjectId,
        fields: &ProjectFields,
    ) -> Result<Project> {
        let request = self
            .client
            .patch(&self.table_url)
            .query(&[("id", eq(id))])
            .header("Prefer", RETURN_REPRESENTATION)
            .json(fields);
        let response = self.send(self.authorize(request, Some(access_token))).await?;

        let mut rows: Vec<Project> = decode(response).await?;
        rows.pop().ok_or_else(|| Error::NotFound(id.to_string()))
    }

    pub async fn delete(&self, access_token: &str, id: &ProjectId) -> Result<()> {
        let request = self
            .client
            .delete(&self.table_url)
            .query(&[("id", eq(id))])
            .header("Prefer", RETURN_REPRESENTATION);
        let response = self.send(self.authorize(request, Some(access_token))).await?;

        let rows: Vec<serde_json::Value> = decode(response).await?;
        if rows.is_empty() {
            return Err(Error::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn authorize(&self, request: RequestBuilder, access_token: Option<&str>) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token.unwrap_or(&self.anon_key))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(remote_error)?;
        check(response).await
    }
}

fn eq(id: &ProjectId) -> String {
    format!("eq.{id}")
}

async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(status_error(status, &body, Error::Remote))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text().await.map_err(remote_error)?;
    Ok(serde_json::from_str(&body)?)
}

fn remote_error(error: reqwest::Error) -> Error {
    tracing::warn!("Project request failed: {}", error);
    Error::Remote(format!("Request failed: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_url_uses_configured_table() {
        let mut config = BackendConfig::new("https://demo.supabase.co", "anon").unwrap();
        config.projects_table = "works".to_string();
        let records = SupabaseRecords::new(&config).unwrap();
        assert_eq!(records.table_url, "https://demo.supabase.co/rest/v1/works");
    }

    #[test]
    fn eq_filter_formats_id() {
        assert_eq!(eq(&ProjectId::new("42")), "eq.42");
    }

    #[test]
    fn rows_decode_into_projects() {
        let rows: Vec<Project> = serde_json::from_str(
            r#"[{
                "id": 7,
                "title": "Folio",
                "description": "Portfolio",
                "image": null,
                "images": null,
                "tags": ["rust"],
                "github": null,
                "live": "https://example.com",
                "featured": true,
                "created_at": "2024-05-01T10:00:00+00:00"
            }]"#,
        )
        .unwrap();
        assert_eq!(rows[0].id.as_str(), "7");
        assert!(rows[0].images.is_empty());
        assert!(rows[0].featured);
    }
}
