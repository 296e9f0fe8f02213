//! HTTP implementation of the resource service
//!
//! Maps each operation onto the platform's management endpoints.

use super::{
    Connector, ConnectorOutcome, ConnectorRequest, CredentialRequest, LinkRequest, ResourceService,
    ResponseEnvelope, RunRequest,
};
use crate::client::PlatformClient;
use eyre::Result;
use serde::Serialize;

pub const CONNECTOR_PATH: &str = "/api/manage/admin/connector";
pub const CREDENTIAL_PATH: &str = "/api/manage/credential";
pub const RUN_ONCE_PATH: &str = "/api/manage/admin/connector/run-once";

/// Path of the connector/credential association endpoint
pub fn link_path(connector_id: i64, credential_id: i64) -> String {
    format!(
        "/api/manage/connector/{}/credential/{}",
        connector_id, credential_id
    )
}

impl PlatformClient {
    async fn post_json<T: Serialize>(&self, path: &str, body: &T) -> Result<ResponseEnvelope> {
        let value = serde_json::to_value(body)?;
        read_envelope(path, self.post_json_value(path, &value).await?).await
    }

    async fn put_json<T: Serialize>(&self, path: &str, body: &T) -> Result<ResponseEnvelope> {
        let value = serde_json::to_value(body)?;
        read_envelope(path, self.put_json_value(path, &value).await?).await
    }
}

async fn read_envelope(path: &str, response: reqwest::Response) -> Result<ResponseEnvelope> {
    let envelope = ResponseEnvelope::read(response).await?;
    log::debug!("{} responded with status {}", path, envelope.status());
    Ok(envelope)
}

impl ResourceService for PlatformClient {
    async fn create_connector(&self, request: &ConnectorRequest) -> ConnectorOutcome {
        let envelope = match self.post_json(CONNECTOR_PATH, request).await {
            Ok(envelope) => envelope,
            Err(e) => return ConnectorOutcome::failed(format!("{:#}", e)),
        };

        if !envelope.is_ok() {
            return ConnectorOutcome::failed(envelope.error_message());
        }

        match envelope.json::<Connector>() {
            Ok(connector) => ConnectorOutcome::created(connector),
            Err(e) => ConnectorOutcome::failed(format!("{:#}", e)),
        }
    }

    async fn create_credential(&self, request: &CredentialRequest) -> Result<ResponseEnvelope> {
        self.post_json(CREDENTIAL_PATH, request).await
    }

    async fn link_credential(&self, request: &LinkRequest) -> Result<ResponseEnvelope> {
        let path = link_path(request.connector_id, request.credential_id);
        self.put_json(&path, request).await
    }

    async fn run_connector(&self, request: &RunRequest) -> Option<String> {
        match self.post_json(RUN_ONCE_PATH, request).await {
            Ok(envelope) if envelope.is_ok() => None,
            Ok(envelope) => Some(envelope.error_message()),
            Err(e) => Some(format!("{:#}", e)),
        }
    }
}
