//! Supabase GoTrue client for password sign-in.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

use super::{AuthError, AuthResult, AuthSession, AuthUser, SessionPersistence};
use crate::util::{is_http_url, unix_timestamp_now};

/// How a token request proves who is asking
enum Grant<'a> {
    Password { email: &'a str, password: &'a str },
    Refresh(&'a str),
}

impl Grant<'_> {
    const fn kind(&self) -> &'static str {
        match self {
            Self::Password { .. } => "password",
            Self::Refresh(_) => "refresh_token",
        }
    }

    fn body(&self) -> serde_json::Value {
        match self {
            Self::Password { email, password } => json!({
                "email": email.trim(),
                "password": password,
            }),
            Self::Refresh(token) => json!({ "refresh_token": token }),
        }
    }
}

#[derive(Clone)]
pub struct SupabaseAuthClient<S: SessionPersistence> {
    /// `{project}/auth/v1`
    endpoint: String,
    anon_key: String,
    http: Client,
    store: S,
}

impl<S: SessionPersistence> SupabaseAuthClient<S> {
    pub fn new(url: impl AsRef<str>, anon_key: impl Into<String>, store: S) -> AuthResult<Self> {
        let base = url.as_ref().trim().trim_end_matches('/');
        if !is_http_url(base) {
            return Err(AuthError::Config("project URL must start with http:// or https://"));
        }
        let endpoint = if base.ends_with("/auth/v1") {
            base.to_string()
        } else {
            format!("{base}/auth/v1")
        };

        let anon_key = anon_key.into().trim().to_string();
        if anon_key.is_empty() {
            return Err(AuthError::Config("anon key is empty"));
        }

        Ok(Self {
            endpoint,
            anon_key,
            http: Client::builder().build()?,
            store,
        })
    }

    /// The persisted session, refreshed first when it is about to expire.
    ///
    /// A session that cannot be refreshed is forgotten.
    pub async fn restore_session(&self) -> AuthResult<Option<AuthSession>> {
        let Some(session) = self.store.load_session()? else {
            return Ok(None);
        };
        if !session.is_expired() {
            return Ok(Some(session));
        }

        tracing::debug!("Stored session expired, refreshing");
        match self.refresh_session(&session.refresh_token).await {
            Ok(session) => Ok(Some(session)),
            Err(error) => {
                tracing::warn!("Dropping stored session, refresh failed: {}", error);
                self.store.clear_session()?;
                Ok(None)
            }
        }
    }

    /// Bearer token for writes. Distinguishes "never signed in" from
    /// "signed in but the session is gone".
    pub async fn access_token(&self) -> AuthResult<String> {
        if self.store.load_session()?.is_none() {
            return Err(AuthError::NotSignedIn);
        }
        match self.restore_session().await? {
            Some(session) => Ok(session.access_token),
            None => Err(AuthError::SessionExpired),
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        validate_credentials(email, password)?;
        let session = self.exchange(Grant::Password { email, password }).await?;
        tracing::info!("Signed in as {}", session.identity());
        Ok(session)
    }

    pub async fn refresh_session(&self, refresh_token: &str) -> AuthResult<AuthSession> {
        if refresh_token.trim().is_empty() {
            return Err(AuthError::SessionExpired);
        }
        self.exchange(Grant::Refresh(refresh_token)).await
    }

    /// Revoke the session remotely, then forget it.
    ///
    /// A token the server already rejects counts as signed out.
    pub async fn sign_out(&self) -> AuthResult<()> {
        let Some(session) = self.store.load_session()? else {
            return Ok(());
        };

        let response = self
            .http
            .post(format!("{}/logout", self.endpoint))
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() && status != StatusCode::UNAUTHORIZED {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Api(describe_failure(status, &body)));
        }

        self.store.clear_session()
    }

    async fn exchange(&self, grant: Grant<'_>) -> AuthResult<AuthSession> {
        let response = self
            .http
            .post(format!("{}/token", self.endpoint))
            .query(&[("grant_type", grant.kind())])
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .json(&grant.body())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Api(describe_failure(status, &body)));
        }

        let session = response.json::<TokenResponse>().await?.into_session()?;
        self.store.save_session(&session)?;
        Ok(session)
    }
}

/// Reject blank credentials before they reach the network.
pub fn validate_credentials(email: &str, password: &str) -> AuthResult<()> {
    if email.trim().is_empty() {
        Err(AuthError::Api("Email is required".to_string()))
    } else if password.is_empty() {
        Err(AuthError::Api("Password is required".to_string()))
    } else {
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_at: Option<i64>,
    expires_in: Option<i64>,
    user: Option<AuthUser>,
}

impl TokenResponse {
    fn into_session(self) -> AuthResult<AuthSession> {
        let expires_at = self
            .expires_at
            .or_else(|| self.expires_in.map(|secs| unix_timestamp_now().saturating_add(secs)));

        let (Some(access_token), Some(refresh_token), Some(expires_at), Some(user)) =
            (self.access_token, self.refresh_token, expires_at, self.user)
        else {
            return Err(AuthError::Api(
                "Sign-in did not return a usable session".to_string(),
            ));
        };

        Ok(AuthSession {
            access_token,
            refresh_token,
            expires_at,
            user,
        })
    }
}

/// Error body shapes used across GoTrue, PostgREST and Storage
#[derive(Debug, Default, Deserialize)]
struct FailureBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

/// Human-readable message for a failed Supabase response, with the status code.
pub fn describe_failure(status: StatusCode, body: &str) -> String {
    let parsed = serde_json::from_str::<FailureBody>(body).unwrap_or_default();
    let detail = parsed
        .message
        .or(parsed.msg)
        .or(parsed.error_description)
        .or(parsed.error)
        .unwrap_or_else(|| body.trim().to_string());

    if detail.trim().is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", detail.trim(), status.as_u16())
    }
}
