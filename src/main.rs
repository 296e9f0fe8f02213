use clap::{Parser, Subcommand, builder::styling};
use eyre::{Context, Result};
use folder_source_provisioner::{AccessType, ProvisioningInput, cli};
use owo_colors::OwoColorize;
use std::path::Path;

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// Folder Source Provisioner: connect a folder to the ingestion platform in one step
#[derive(Parser)]
#[command(name = "fsprov", version, styles = STYLES)]
struct Cli {
    /// The dotenv file to source credentials from
    #[arg(short, long, global = true, default_value = ".env")]
    env: String,

    /// More verbose logging
    #[arg(long, global = true)]
    debug: bool,

    /// Command to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Test authorization to the platform
    Auth,

    /// Create a folder connector, link it to a placeholder credential and start indexing
    Provision {
        /// Path of the folder as seen by the platform
        folder_path: String,

        /// Display name for the connector/credential pair
        #[arg(short, long)]
        name: String,

        /// Who can see documents from this source: public, private or sync
        #[arg(short, long, default_value_t = AccessType::Public)]
        access_type: AccessType,

        /// User group to bind the source to (repeatable)
        #[arg(short, long = "group")]
        groups: Vec<i64>,
    },

    /// Provision every folder source listed in a sources manifest
    Apply {
        /// YAML manifest listing the sources
        #[arg(default_value = "sources.yml")]
        manifest: String,
    },

    /// List the files a folder source would ingest
    Scan {
        /// Folder to scan
        #[arg(default_value = ".")]
        folder_path: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    if Path::new(&args.env).exists() {
        dotenvy::from_filename(&args.env)
            .with_context(|| format!("Failed to load env file: {}", args.env))?;
    } else if args.env != ".env" {
        eyre::bail!("Env file not found: {}", args.env);
    }

    let log_level = match args.debug {
        true => "debug",
        false => "info",
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", log_level);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    match args.command {
        Commands::Auth => {
            cli::test_auth().await?;
        }
        Commands::Provision {
            folder_path,
            name,
            access_type,
            groups,
        } => {
            let input = ProvisioningInput::new(folder_path, name)
                .with_access_type(access_type)
                .with_groups(groups);
            if !cli::provision_folder(input).await? {
                std::process::exit(1);
            }
        }
        Commands::Apply { manifest } => {
            log::info!("Applying sources from {}", manifest.bright_black());
            cli::apply_manifest(&manifest).await?;
        }
        Commands::Scan { folder_path } => {
            cli::scan(&folder_path)?;
        }
    }

    Ok(())
}
