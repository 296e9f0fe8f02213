//! Caller-facing notifications

use super::{ProvisionError, ProvisionedSource};
use serde::{Deserialize, Serialize};

pub const SUCCESS_MESSAGE: &str = "Successfully created folder connector!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Error,
    Success,
}

/// A single user-visible outcome message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Error,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Success,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }

    /// The notification reporting a provisioning outcome.
    pub fn from_outcome(outcome: &Result<ProvisionedSource, ProvisionError>) -> Self {
        match outcome {
            Ok(_) => Self::success(SUCCESS_MESSAGE),
            Err(e) => Self::error(e.to_string()),
        }
    }
}

/// Receiver of provisioning notifications.
///
/// Any `FnMut(Notification)` closure is a sink.
pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

impl<F> NotificationSink for F
where
    F: FnMut(Notification),
{
    fn notify(&mut self, notification: Notification) {
        self(notification)
    }
}
