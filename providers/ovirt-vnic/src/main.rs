//! oVirt vNIC CLI
//!
//! Drives the `ovirt_vnic` resource handler from the command line.
//! Connection settings are read from `OVIRT_*` environment variables; state
//! records are printed to stdout as JSON, logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ovirt_client::OvirtClientTrait;
use ovirt_vnic_provider::{ProviderConfig, VnicDesired, VnicResource, VnicState};
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ovirt-vnic", version, about = "Manage oVirt VM network interfaces")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Attach a new vNIC to a VM and print its state
    Create {
        #[arg(long)]
        vm_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        vnic_profile_id: String,
    },
    /// Print the state of a vNIC (`null` when it no longer exists)
    Read {
        /// Composite id `<vm_id>:<vnic_id>`
        id: String,
    },
    /// Deactivate and remove a vNIC
    Delete {
        /// Composite id `<vm_id>:<vnic_id>`
        id: String,
    },
    /// Print the state of an existing vNIC for adoption
    Import {
        /// Composite id `<vm_id>:<vnic_id>`
        id: String,
    },
    /// Check engine connectivity and credentials
    Check,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = ProviderConfig::from_env().context("failed to load oVirt configuration")?;
    info!("Configuration:");
    info!("  oVirt URL: {}", config.url);
    info!("  Username: {}", config.username);

    let client = config.connect().context("failed to build oVirt client")?;
    client.validate_connection().await.map_err(|e| {
        error!("Failed to validate oVirt connection: {}", e);
        error!("Please ensure:");
        error!("  1. OVIRT_USERNAME and OVIRT_PASSWORD are set correctly");
        error!("  2. The engine is reachable at {}", config.url);
        e
    })?;
    info!("oVirt connection validated");

    let resource = VnicResource::new(Box::new(client));

    match cli.command {
        Command::Create {
            vm_id,
            name,
            vnic_profile_id,
        } => {
            let desired = VnicDesired {
                vm_id,
                name,
                vnic_profile_id,
            };
            let state = match resource.apply(&desired).await {
                Ok(state) => state,
                Err(e) => {
                    if let Some(id) = e.created_id() {
                        error!("Vnic {} is attached but could not be read back", id);
                        error!("Record it with `import {}` or remove it with `delete {}`", id, id);
                        print_json(&serde_json::json!({ "id": id }))?;
                    }
                    return Err(e).context("create failed");
                }
            };
            print_json(&state)?;
        }
        Command::Read { id } => {
            let state = resource.read(&id).await.context("read failed")?;
            print_json(&state.map(|attributes| VnicState { id, attributes }))?;
        }
        Command::Delete { id } => {
            resource.delete(&id).await.context("delete failed")?;
        }
        Command::Import { id } => {
            let state = resource.import(&id).await.context("import failed")?;
            print_json(&state)?;
        }
        Command::Check => {
            print_json(&serde_json::json!({"ok": true}))?;
        }
    }

    Ok(())
}
