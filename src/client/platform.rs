//! Platform client module
//!
//! Provides `PlatformClient` for making requests to the ingestion platform's
//! management API.

use super::Auth;
use base64::Engine;
use eyre::{Context, Result, eyre};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Method};
use std::time::Duration;
use url::Url;

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the platform management API.
///
/// API paths are resolved relative to the base URL, so deployments served
/// under a path prefix (e.g. `https://host/platform/`) work the same as
/// root deployments.
///
/// # Example
/// ```no_run
/// use folder_source_provisioner::client::{Auth, PlatformClient};
/// use url::Url;
///
/// # async fn example() -> eyre::Result<()> {
/// let url = Url::parse("http://localhost:8080")?;
/// let client = PlatformClient::try_new(url, Auth::Apikey("key".to_string()))?;
///
/// let response = client.get("/api/me").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct PlatformClient {
    client: Client,
    url: Url,
}

impl PlatformClient {
    /// Create a new PlatformClient from a URL and Auth with the default timeout.
    pub fn try_new(url: Url, auth: Auth) -> Result<Self> {
        Self::try_new_with_timeout(url, auth, DEFAULT_TIMEOUT)
    }

    /// Create a new PlatformClient with an explicit request timeout.
    ///
    /// # Errors
    /// Returns an error if the auth header cannot be encoded or the HTTP
    /// client cannot be built.
    pub fn try_new_with_timeout(url: Url, auth: Auth, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        match auth {
            Auth::Basic(username, password) => {
                let credentials = base64::engine::general_purpose::STANDARD
                    .encode(format!("{}:{}", username, password));
                let mut value = HeaderValue::from_str(&format!("Basic {}", credentials))?;
                value.set_sensitive(true);
                headers.insert(header::AUTHORIZATION, value);
            }
            Auth::Apikey(apikey) => {
                let mut value = HeaderValue::from_str(&format!("Bearer {}", apikey))
                    .context("API key contains characters not allowed in a header")?;
                value.set_sensitive(true);
                headers.insert(header::AUTHORIZATION, value);
            }
            Auth::None => {}
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            url: with_trailing_slash(url),
        })
    }

    /// Get the base URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Verify the connection and authentication to the platform.
    ///
    /// Makes a GET request to /api/me, which only succeeds for an
    /// authenticated caller (or any caller when auth is disabled).
    pub async fn test_connection(&self) -> Result<reqwest::Response> {
        self.get("/api/me").await
    }

    /// Resolve an API path against the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        // Strip leading slash so the join stays under the base path
        let path_stripped = path.strip_prefix('/').unwrap_or(path);
        self.url
            .join(path_stripped)
            .with_context(|| format!("Invalid API path: {}", path))
    }

    /// Send a request to a given path with an optional JSON body.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<reqwest::Response> {
        let url = self.endpoint(path)?;
        log::trace!("{} {}", method, url);

        let request = self.client.request(method, url);
        let response = match body {
            Some(body) => request.json(body).send().await,
            None => request.send().await,
        };
        response.map_err(|e| eyre!("Failed to send request: {}", e))
    }

    /// Helper for GET requests.
    pub async fn get(&self, path: &str) -> Result<reqwest::Response> {
        self.request(Method::GET, path, None).await
    }

    /// Helper for POST requests with JSON value.
    pub async fn post_json_value(
        &self,
        path: &str,
        value: &serde_json::Value,
    ) -> Result<reqwest::Response> {
        self.request(Method::POST, path, Some(value)).await
    }

    /// Helper for PUT requests with JSON value.
    pub async fn put_json_value(
        &self,
        path: &str,
        value: &serde_json::Value,
    ) -> Result<reqwest::Response> {
        self.request(Method::PUT, path, Some(value)).await
    }
}

impl std::fmt::Display for PlatformClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
