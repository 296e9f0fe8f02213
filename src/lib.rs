//! Folder Source Provisioner
//!
//! Provisions folder-backed data sources on an ingestion platform: creates the
//! connector and its placeholder credential, links them, and starts the first
//! ingestion run.

pub mod cli;
pub mod client;
pub mod folder;
pub mod manifest;
pub mod provision;
pub mod resource;

// Re-exports for convenience
pub use client::{Auth, AuthType, PlatformClient};
pub use manifest::SourcesManifest;
pub use provision::{
    Notification, NotificationKind, NotificationSink, ProvisionError, ProvisionedSource,
    Provisioner, ProvisioningInput, provision_folder_source,
};
pub use resource::{AccessType, ResourceService};
