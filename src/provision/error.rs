//! Provisioning failures

use super::ProvisionState;
use crate::resource::{ConnectorId, CredentialId};
use thiserror::Error;

pub const EMPTY_FOLDER_PATH: &str = "Folder path cannot be empty";

/// Resources committed before a later step failed.
///
/// Nothing is rolled back, so these remain live on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialProvision {
    pub connector_id: ConnectorId,
    pub credential_id: Option<CredentialId>,
}

/// The first step that failed, with the service's detail text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProvisionError {
    #[error("{detail}")]
    Validation { detail: String },

    #[error("Unable to create connector - {detail}")]
    ConnectorCreationFailed { detail: String },

    #[error("Error creating credential for CC Pair - {detail}")]
    CredentialCreationFailed {
        detail: String,
        partial: PartialProvision,
    },

    #[error("Unable to link connector and credential - {detail}")]
    LinkFailed {
        detail: String,
        partial: PartialProvision,
    },

    #[error("Unable to trigger initial run - {detail}")]
    RunTriggerFailed {
        detail: String,
        partial: PartialProvision,
    },
}

impl ProvisionError {
    pub fn empty_folder_path() -> Self {
        Self::Validation {
            detail: EMPTY_FOLDER_PATH.to_string(),
        }
    }

    /// Detail text as reported by validation or the service
    pub fn detail(&self) -> &str {
        match self {
            Self::Validation { detail }
            | Self::ConnectorCreationFailed { detail }
            | Self::CredentialCreationFailed { detail, .. }
            | Self::LinkFailed { detail, .. }
            | Self::RunTriggerFailed { detail, .. } => detail,
        }
    }

    /// Resources left behind on the platform, if any
    pub fn partial(&self) -> Option<&PartialProvision> {
        match self {
            Self::Validation { .. } | Self::ConnectorCreationFailed { .. } => None,
            Self::CredentialCreationFailed { partial, .. }
            | Self::LinkFailed { partial, .. }
            | Self::RunTriggerFailed { partial, .. } => Some(partial),
        }
    }

    /// The last state the workflow reached before failing
    pub fn last_state(&self) -> ProvisionState {
        match self {
            Self::Validation { .. } | Self::ConnectorCreationFailed { .. } => {
                ProvisionState::ValidatingInput
            }
            Self::CredentialCreationFailed { .. } => ProvisionState::ConnectorCreated,
            Self::LinkFailed { .. } => ProvisionState::CredentialCreated,
            Self::RunTriggerFailed { .. } => ProvisionState::Linked,
        }
    }
}
