//! CLI helper functions

use crate::{
    client::{Auth, AuthType, DEFAULT_TIMEOUT, PlatformClient},
    folder::{ScannedFile, scan_folder},
    manifest::SourcesManifest,
    provision::{Notification, ProvisioningInput, provision_folder_source},
};
use eyre::{Context, Result, eyre};
use owo_colors::OwoColorize;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Load platform client from environment variables
///
/// Expected environment variables:
/// - PLATFORM_URL: Platform base URL (required)
/// - PLATFORM_API_KEY: API key sent as a Bearer token (optional)
/// - PLATFORM_USERNAME / PLATFORM_PASSWORD: Basic auth (optional)
/// - PLATFORM_AUTH_TYPE: Force `apikey`, `basic` or `none` (optional, inferred otherwise)
/// - PLATFORM_TIMEOUT_SECS: Request timeout in seconds (optional, default 30)
pub fn load_platform_client() -> Result<PlatformClient> {
    let url_str =
        std::env::var("PLATFORM_URL").context("PLATFORM_URL environment variable not set")?;
    let url = Url::parse(&url_str).with_context(|| format!("Invalid PLATFORM_URL: {}", url_str))?;

    let auth_type = std::env::var("PLATFORM_AUTH_TYPE")
        .ok()
        .map(|value| {
            value
                .parse::<AuthType>()
                .map_err(|_| eyre!("Invalid PLATFORM_AUTH_TYPE: {}", value))
        })
        .transpose()?;
    let auth = Auth::infer(
        auth_type,
        std::env::var("PLATFORM_USERNAME").ok(),
        std::env::var("PLATFORM_PASSWORD").ok(),
        std::env::var("PLATFORM_API_KEY").ok(),
    );

    let timeout = match std::env::var("PLATFORM_TIMEOUT_SECS") {
        Ok(secs) => Duration::from_secs(
            secs.parse()
                .with_context(|| format!("Invalid PLATFORM_TIMEOUT_SECS: {}", secs))?,
        ),
        Err(_) => DEFAULT_TIMEOUT,
    };

    log::debug!("Using {} authentication", auth);
    PlatformClient::try_new_with_timeout(url, auth, timeout)
        .context("Failed to create platform client")
}

/// Test authorization to the platform
pub async fn test_auth() -> Result<()> {
    let client = load_platform_client()?;
    log::info!("Testing authorization to {}", client.bright_black());

    let response = client.test_connection().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        eyre::bail!("Authorization failed ({}): {}", status, body);
    }

    log::info!("✓ Authorized to {}", client.url().bright_black());
    Ok(())
}

fn log_notification(prefix: &str, notification: &Notification) {
    if notification.is_error() {
        log::error!("{}{}", prefix, notification.message.red());
    } else {
        log::info!("{}✓ {}", prefix, notification.message.green());
    }
}

/// Provision a single folder source
///
/// Returns whether every provisioning step succeeded; the outcome itself is
/// logged as it is reported.
pub async fn provision_folder(input: ProvisioningInput) -> Result<bool> {
    log::info!(
        "Provisioning {} as {} ({})",
        input.folder_path.trim().bright_black(),
        input.display_name.cyan(),
        input.access_type
    );

    // Validation needs no platform connection
    if let Err(e) = input.validated_folder_path() {
        log_notification("", &Notification::error(e.to_string()));
        return Ok(false);
    }

    let client = load_platform_client()?;
    let mut sink = |notification: Notification| log_notification("", &notification);
    Ok(provision_folder_source(&client, &input, &mut sink).await)
}

/// Provision every source listed in a sources manifest
///
/// Sources are provisioned one after another; a failing source does not
/// stop later ones.
///
/// Returns the number of sources provisioned.
///
/// # Errors
/// Returns an error if the manifest cannot be read or any source failed.
pub async fn apply_manifest(manifest_path: impl AsRef<Path>) -> Result<usize> {
    let manifest_path = manifest_path.as_ref();

    log::info!("Loading sources from {}", manifest_path.display());
    let manifest = SourcesManifest::read(manifest_path)?;
    if manifest.count() == 0 {
        log::warn!("No sources listed in {}", manifest_path.display());
        return Ok(0);
    }

    let client = load_platform_client()?;
    let total = manifest.count();
    let mut succeeded = 0;

    for (index, input) in manifest.sources.iter().enumerate() {
        let prefix = format!("[{}/{}] {}: ", index + 1, total, input.display_name);
        let mut sink = |notification: Notification| log_notification(&prefix, &notification);
        if provision_folder_source(&client, input, &mut sink).await {
            succeeded += 1;
        }
    }

    let failed = total - succeeded;
    if failed > 0 {
        eyre::bail!("{} of {} source(s) failed to provision", failed, total);
    }

    log::info!("✓ Provisioned {} source(s)", succeeded);
    Ok(succeeded)
}

/// List the files a folder source would ingest
pub fn scan(folder: impl AsRef<Path>) -> Result<Vec<ScannedFile>> {
    let folder = folder.as_ref();
    let files = scan_folder(folder)?;

    for file in &files {
        println!("{}", file.relative_path.display());
    }
    log::info!(
        "{} file(s) in {} would be ingested",
        files.len(),
        folder.display().bright_black()
    );
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "PLATFORM_URL",
        "PLATFORM_API_KEY",
        "PLATFORM_USERNAME",
        "PLATFORM_PASSWORD",
        "PLATFORM_AUTH_TYPE",
        "PLATFORM_TIMEOUT_SECS",
    ];

    fn set_env(vars: &[(&str, &str)]) {
        for var in VARS {
            unsafe { std::env::remove_var(var) };
        }
        for (key, value) in vars {
            unsafe { std::env::set_var(key, value) };
        }
    }

    #[test]
    #[serial]
    fn test_missing_url() {
        set_env(&[]);
        let err = load_platform_client().unwrap_err();
        assert!(err.to_string().contains("PLATFORM_URL"));
    }

    #[test]
    #[serial]
    fn test_invalid_url() {
        set_env(&[("PLATFORM_URL", "not a url")]);
        let err = load_platform_client().unwrap_err();
        assert!(err.to_string().contains("Invalid PLATFORM_URL"));
    }

    #[test]
    #[serial]
    fn test_client_from_env() {
        set_env(&[
            ("PLATFORM_URL", "http://localhost:8080"),
            ("PLATFORM_API_KEY", "key"),
            ("PLATFORM_TIMEOUT_SECS", "5"),
        ]);
        let client = load_platform_client().unwrap();
        assert_eq!(client.url().as_str(), "http://localhost:8080/");
    }

    #[test]
    #[serial]
    fn test_invalid_auth_type() {
        set_env(&[
            ("PLATFORM_URL", "http://localhost:8080"),
            ("PLATFORM_AUTH_TYPE", "oauth"),
        ]);
        let err = load_platform_client().unwrap_err();
        assert!(err.to_string().contains("Invalid PLATFORM_AUTH_TYPE"));
    }

    #[test]
    #[serial]
    fn test_invalid_timeout() {
        set_env(&[
            ("PLATFORM_URL", "http://localhost:8080"),
            ("PLATFORM_TIMEOUT_SECS", "soon"),
        ]);
        let err = load_platform_client().unwrap_err();
        assert!(err.to_string().contains("Invalid PLATFORM_TIMEOUT_SECS"));
    }

    #[tokio::test]
    #[serial]
    async fn test_blank_folder_path_needs_no_config() {
        set_env(&[]);
        let input = ProvisioningInput::new("  ", "Docs");
        assert!(!provision_folder(input).await.unwrap());
    }

    #[tokio::test]
    #[serial]
    async fn test_provision_without_url() {
        set_env(&[]);
        let input = ProvisioningInput::new("/data/docs", "Docs");
        let err = provision_folder(input).await.unwrap_err();
        assert!(err.to_string().contains("PLATFORM_URL"));
    }

    #[tokio::test]
    #[serial]
    async fn test_apply_empty_manifest() {
        set_env(&[]);
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("sources.yml");
        std::fs::write(&path, "sources: []\n").unwrap();

        // No client is needed when there is nothing to provision
        assert_eq!(apply_manifest(&path).await.unwrap(), 0);
    }
}
