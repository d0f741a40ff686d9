//! CLI argument definitions for the PermitDesk binary.

use clap::{Parser, Subcommand};
use url::Url;

use permitdesk::registry::DEFAULT_REGISTRY_URL;

/// PermitDesk backend server
#[derive(Parser, Debug)]
#[command(name = "permitdesk")]
#[command(about = "PermitDesk: accounts, planning-permission reports, and downloads")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the PermitDesk server
    Serve(ServeArgs),
    /// Check health of a running PermitDesk server
    Health(HealthArgs),
}

/// Arguments for the serve command
#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = 8000, env = "PERMITDESK_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(long, default_value = "0.0.0.0", env = "PERMITDESK_HOST")]
    pub host: String,

    /// Base URL of the external planning-permissions register
    #[arg(long, default_value = DEFAULT_REGISTRY_URL, env = "PERMITDESK_REGISTRY_URL")]
    pub registry_url: Url,
}

/// Arguments for the health command
#[derive(clap::Args, Debug)]
pub struct HealthArgs {
    /// Base URL of the server to check
    #[arg(long, default_value = "http://127.0.0.1:8000", env = "PERMITDESK_URL")]
    pub url: String,

    /// Timeout in seconds
    #[arg(short, long, default_value_t = 5)]
    pub timeout: u64,
}
