use super::ProvisionError;
use crate::resource::{AccessType, GroupId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Caller-supplied description of a folder source to provision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvisioningInput {
    /// Path of the folder on the platform's filesystem
    pub folder_path: String,
    /// Display name of the credential and connector/credential pair
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(default)]
    pub access_type: AccessType,
    #[serde(default)]
    pub groups: Vec<GroupId>,
}

impl ProvisioningInput {
    pub fn new(folder_path: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            folder_path: folder_path.into(),
            display_name: display_name.into(),
            access_type: AccessType::default(),
            groups: Vec::new(),
        }
    }

    pub fn with_access_type(mut self, access_type: AccessType) -> Self {
        self.access_type = access_type;
        self
    }

    pub fn with_groups(mut self, groups: Vec<GroupId>) -> Self {
        self.groups = groups;
        self
    }

    /// The trimmed folder path, or a validation error when it is blank.
    pub fn validated_folder_path(&self) -> Result<&str, ProvisionError> {
        match self.folder_path.trim() {
            "" => Err(ProvisionError::empty_folder_path()),
            path => Ok(path),
        }
    }

    /// Connector name for a run started at `at`.
    ///
    /// The millisecond suffix makes collisions unlikely, not impossible.
    pub fn connector_name(&self, at: DateTime<Utc>) -> String {
        format!("{}-{}", self.display_name, at.timestamp_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_blank_paths_are_rejected() {
        for path in ["", "  ", "\t\n"] {
            let input = ProvisioningInput::new(path, "Docs");
            assert_eq!(
                input.validated_folder_path(),
                Err(ProvisionError::empty_folder_path())
            );
        }
    }

    #[test]
    fn test_path_is_trimmed() {
        let input = ProvisioningInput::new("  /data/docs \n", "Docs");
        assert_eq!(input.validated_folder_path(), Ok("/data/docs"));
    }

    #[test]
    fn test_connector_name() {
        let input = ProvisioningInput::new("/data/docs", "Docs");
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(input.connector_name(at), "Docs-1700000000123");
    }

    #[test]
    fn test_manifest_defaults() {
        let input: ProvisioningInput =
            serde_yaml::from_str("folder_path: /data/docs\nname: Docs\n").unwrap();
        assert_eq!(input.access_type, AccessType::Public);
        assert!(input.groups.is_empty());
    }
}
