//! Request and response records exchanged with the resource service

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Service-assigned connector identifier
pub type ConnectorId = i64;
/// Service-assigned credential identifier
pub type CredentialId = i64;
/// User group identifier used for group bindings
pub type GroupId = i64;

/// Visibility/ownership classification of a connector, credential or pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessType {
    #[default]
    Public,
    Private,
    Sync,
}

impl AccessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Sync => "sync",
        }
    }
}

impl std::fmt::Display for AccessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An access type name outside `public`, `private` and `sync`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown access type '{0}' (expected public, private or sync)")]
pub struct UnknownAccessType(pub String);

impl FromStr for AccessType {
    type Err = UnknownAccessType;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            "sync" => Ok(Self::Sync),
            other => Err(UnknownAccessType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentSource {
    Folder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    LoadState,
}

/// Connector-specific configuration of a folder source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderConfig {
    pub folder_path: String,
}

/// Body of a connector creation request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectorRequest {
    pub name: String,
    pub source: DocumentSource,
    pub input_type: InputType,
    pub connector_specific_config: FolderConfig,
    pub refresh_freq: Option<u64>,
    pub prune_freq: Option<u64>,
    pub indexing_start: Option<String>,
    pub access_type: AccessType,
    pub groups: Vec<GroupId>,
}

impl ConnectorRequest {
    /// A load-state folder connector with no refresh, prune or start bound.
    pub fn folder(
        name: impl Into<String>,
        folder_path: impl Into<String>,
        access_type: AccessType,
        groups: &[GroupId],
    ) -> Self {
        Self {
            name: name.into(),
            source: DocumentSource::Folder,
            input_type: InputType::LoadState,
            connector_specific_config: FolderConfig {
                folder_path: folder_path.into(),
            },
            refresh_freq: None,
            prune_freq: None,
            indexing_start: None,
            access_type,
            groups: groups.to_vec(),
        }
    }
}

/// Connector as returned by the service; only the fields this crate reads
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Connector {
    pub id: ConnectorId,
    #[serde(default)]
    pub name: String,
}

/// Body of a credential creation request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CredentialRequest {
    pub credential_json: serde_json::Map<String, serde_json::Value>,
    pub admin_public: bool,
    pub curator_public: bool,
    pub groups: Vec<GroupId>,
    pub name: String,
    pub source: DocumentSource,
}

impl CredentialRequest {
    /// An empty-payload folder credential that only carries ownership.
    ///
    /// Connector/credential pairs resolve their owning user through the
    /// credential, so folder sources still need one even without a secret.
    pub fn placeholder(name: impl Into<String>, groups: &[GroupId]) -> Self {
        Self {
            credential_json: serde_json::Map::new(),
            admin_public: true,
            curator_public: true,
            groups: groups.to_vec(),
            name: name.into(),
            source: DocumentSource::Folder,
        }
    }
}

/// Credential as returned by the service
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Credential {
    pub id: CredentialId,
}

/// Request associating a connector with a credential
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkRequest {
    #[serde(skip)]
    pub connector_id: ConnectorId,
    #[serde(skip)]
    pub credential_id: CredentialId,
    pub name: String,
    pub access_type: AccessType,
    pub groups: Vec<GroupId>,
}

/// Request to start an ingestion run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunRequest {
    pub connector_id: ConnectorId,
    /// Partition indices to ingest; the run-once endpoint calls these `credential_ids`
    #[serde(rename = "credential_ids")]
    pub partitions: Vec<i64>,
    pub from_beginning: bool,
}

impl RunRequest {
    /// A full, non-partitioned first run.
    pub fn initial(connector_id: ConnectorId) -> Self {
        Self {
            connector_id,
            partitions: vec![0],
            from_beginning: false,
        }
    }
}
