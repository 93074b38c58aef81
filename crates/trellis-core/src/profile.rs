//! Current-user profile client.
//!
//! One-shot `GET <api_base>/api/v1/users/` with `Authorization: JWT <token>`.
//! Callers surface failures to the user; nothing here retries.

use std::fmt;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::ProfileConfig;

const USERS_PATH: &str = "api/v1/users/";

/// User identifier as returned by the API (numeric or string).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(u64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{n}"),
            UserId::Text(s) => f.write_str(s),
        }
    }
}

/// Authenticated user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: UserId,
    #[serde(rename = "fullname")]
    pub full_name: String,
}

/// HTTP client for the profile endpoint.
#[derive(Debug, Clone)]
pub struct ProfileClient {
    http: reqwest::Client,
    endpoint: Url,
    token: String,
}

impl ProfileClient {
    /// Builds a client from config and a token.
    ///
    /// # Errors
    /// Returns an error if `api_base` is invalid or the HTTP client fails to build.
    pub fn new(config: &ProfileConfig, token: impl Into<String>) -> Result<Self> {
        let endpoint = users_endpoint(&config.api_base_url()?)?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            endpoint,
            token: token.into(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetches the current user's profile.
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status or an
    /// unexpected body.
    pub async fn fetch_current_user(&self) -> Result<UserProfile> {
        let response = self
            .http
            .get(self.endpoint.clone())
            .header(reqwest::header::AUTHORIZATION, format!("JWT {}", self.token))
            .send()
            .await
            .with_context(|| format!("Request to {} failed", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Profile request returned {status}");
        }

        response
            .json::<UserProfile>()
            .await
            .context("Failed to decode profile response")
    }
}

/// Resolves the users endpoint against `base`, keeping any base path.
fn users_endpoint(base: &Url) -> Result<Url> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(USERS_PATH)
        .with_context(|| format!("Failed to build users endpoint from {base}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_from_host_only_base() {
        let base = Url::parse("http://localhost:3001").unwrap();
        assert_eq!(
            users_endpoint(&base).unwrap().as_str(),
            "http://localhost:3001/api/v1/users/"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let base = Url::parse("https://example.com/trello").unwrap();
        assert_eq!(
            users_endpoint(&base).unwrap().as_str(),
            "https://example.com/trello/api/v1/users/"
        );
    }

    #[test]
    fn test_profile_accepts_numeric_and_string_ids() {
        let p: UserProfile =
            serde_json::from_str(r#"{"_id":1,"fullname":"Moustapha Amadou Diouf"}"#).unwrap();
        assert_eq!(p.id, UserId::Number(1));
        assert_eq!(p.full_name, "Moustapha Amadou Diouf");

        let p: UserProfile =
            serde_json::from_str(r#"{"_id":"5a1b","fullname":"Ada","email":"a@b.c"}"#).unwrap();
        assert_eq!(p.id.to_string(), "5a1b");
    }
}
