//! Folder source provisioning
//!
//! [`Provisioner::provision`] returns a tagged result for callers that
//! handle outcomes themselves; [`provision_folder_source`] reports the same
//! outcome as a single [`Notification`] and returns a proceed/halt flag.

mod error;
mod input;
mod notify;
mod state;
mod workflow;

pub use error::{EMPTY_FOLDER_PATH, PartialProvision, ProvisionError};
pub use input::ProvisioningInput;
pub use notify::{Notification, NotificationKind, NotificationSink, SUCCESS_MESSAGE};
pub use state::ProvisionState;
pub use workflow::{ProvisionedSource, Provisioner, provision_folder_source};
