//! Response envelope returned by credential and link operations

use eyre::{Context, Result};
use serde::de::DeserializeOwned;

/// Status plus raw body of a service response.
///
/// The body is kept as text so failure paths can report it verbatim and
/// success paths can still parse it as JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
    status: u16,
    body: String,
}

impl ResponseEnvelope {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Consume an HTTP response into an envelope.
    pub async fn read(response: reqwest::Response) -> Result<Self> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;
        Ok(Self { status, body })
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// True for 2xx statuses
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body)
            .with_context(|| format!("Failed to parse response body: {}", self.body))
    }

    /// The `detail` field of a JSON error body.
    ///
    /// Non-string details (e.g. validation error lists) are rendered as JSON.
    pub fn detail(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(&self.body).ok()?;
        match value.get("detail")? {
            serde_json::Value::String(detail) => Some(detail.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Best available description of a failed response: the `detail` field,
    /// then the raw body, then the status code.
    pub fn error_message(&self) -> String {
        if let Some(detail) = self.detail() {
            return detail;
        }
        let body = self.body.trim();
        if body.is_empty() {
            format!("HTTP {}", self.status)
        } else {
            body.to_string()
        }
    }
}
