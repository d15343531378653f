//! Main users client.

use crate::api::UsersApi;
use crate::error::{ClientError, Result};
use crate::types::ClientConfig;
use crate::users::UsersResource;
use async_trait::async_trait;
use reqwest::Client;
use roster_core::types::{NewUser, User, UserCollection};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Client for the backend's users resource.
///
/// The base URL is validated and normalized once, at construction.
///
/// # Example
///
/// ```ignore
/// use roster_client::{ClientConfig, UsersClient};
///
/// let client = UsersClient::new(ClientConfig::new("http://localhost:8000/"))?;
/// assert_eq!(client.base_url(), "http://localhost:8000");
///
/// let users = client.users().list().await?;
/// ```
#[derive(Debug, Clone)]
pub struct UsersClient {
    http: Client,
    base_url: String,
}

impl UsersClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = normalize_base_url(&config.base_url)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(format!("Roster/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        debug!(base_url = %base_url, "Users client created");

        Ok(Self { http, base_url })
    }

    /// The normalized base URL (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Operations on the `/users/` collection.
    pub fn users(&self) -> UsersResource<'_> {
        UsersResource::new(&self.http, &self.base_url)
    }
}

#[async_trait]
impl UsersApi for UsersClient {
    async fn list_users(&self) -> Result<UserCollection> {
        self.users().list().await
    }

    async fn create_user(&self, user: NewUser) -> Result<Option<User>> {
        self.users().create(&user).await
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
    }

    let url = trimmed.trim_end_matches('/').to_string();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }

    let parsed = Url::parse(&url).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", url, e)))?;
    if parsed.host_str().is_none() {
        return Err(ClientError::InvalidUrl(format!("{}: missing host", url)));
    }

    Ok(url)
}
