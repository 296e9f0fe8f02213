//! Sources manifest management
//!
//! A sources manifest lists folder sources to provision in one run.
//!
//! Example format:
//! ```yaml
//! sources:
//!   - folder_path: /data/docs
//!     name: Docs
//!     access_type: public
//!     groups: [1, 2]
//!   - folder_path: /data/handbook
//!     name: Handbook
//! ```

use crate::provision::ProvisioningInput;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sources manifest structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SourcesManifest {
    #[serde(default)]
    pub sources: Vec<ProvisioningInput>,
}

impl SourcesManifest {
    /// Create a manifest with specified sources
    pub fn with_sources(sources: Vec<ProvisioningInput>) -> Self {
        Self { sources }
    }

    /// Get the number of sources in the manifest
    pub fn count(&self) -> usize {
        self.sources.len()
    }

    /// Read manifest from YAML file
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "Failed to read sources manifest: {}",
                path.as_ref().display()
            )
        })?;

        let manifest: Self = serde_yaml::from_str(&content)
            .with_context(|| "Failed to parse sources manifest YAML")?;

        Ok(manifest)
    }

    /// Write manifest to YAML file
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let content =
            serde_yaml::to_string(self).with_context(|| "Failed to serialize sources manifest")?;

        std::fs::write(path.as_ref(), content).with_context(|| {
            format!(
                "Failed to write sources manifest: {}",
                path.as_ref().display()
            )
        })?;

        Ok(())
    }
}
