//! Resource service interface
//!
//! The provisioning workflow consumes four operations of the platform's
//! resource API through the [`ResourceService`] trait. [`crate::client::PlatformClient`]
//! implements it over HTTP; tests implement it in memory.

mod envelope;
mod http;
mod model;

pub use envelope::ResponseEnvelope;
pub use http::{CONNECTOR_PATH, CREDENTIAL_PATH, RUN_ONCE_PATH, link_path};
pub use model::{
    AccessType, Connector, ConnectorId, ConnectorRequest, Credential, CredentialId,
    CredentialRequest, DocumentSource, FolderConfig, GroupId, InputType, LinkRequest, RunRequest,
    UnknownAccessType,
};

use eyre::Result;
use std::future::Future;

/// Result of a connector creation call.
///
/// Mirrors the service's `(error, connector)` pair: either side may be
/// present, and only `connector: Some(_)` with a missing or empty error
/// counts as success.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConnectorOutcome {
    pub error: Option<String>,
    pub connector: Option<Connector>,
}

impl ConnectorOutcome {
    pub fn created(connector: Connector) -> Self {
        Self {
            error: None,
            connector: Some(connector),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            connector: None,
        }
    }
}

/// The resource API operations used to provision a folder source.
///
/// Implementors report service-side rejections through the return value
/// rather than as errors; the `Result` on credential and link creation only
/// covers transport failures.
pub trait ResourceService: Send + Sync {
    /// Create a connector
    fn create_connector(
        &self,
        request: &ConnectorRequest,
    ) -> impl Future<Output = ConnectorOutcome> + Send;

    /// Create a credential
    fn create_credential(
        &self,
        request: &CredentialRequest,
    ) -> impl Future<Output = Result<ResponseEnvelope>> + Send;

    /// Associate a connector with a credential
    fn link_credential(
        &self,
        request: &LinkRequest,
    ) -> impl Future<Output = Result<ResponseEnvelope>> + Send;

    /// Trigger an ingestion run, returning the error text if the service refused
    fn run_connector(&self, request: &RunRequest) -> impl Future<Output = Option<String>> + Send;
}
