//! Platform API client and authentication.
//!
//! This module provides the [`PlatformClient`] for interacting with the ingestion
//! platform's management API, along with authentication types ([`Auth`], [`AuthType`]).

mod auth;
mod platform;

pub use auth::{Auth, AuthType};
pub use platform::{DEFAULT_TIMEOUT, PlatformClient};
