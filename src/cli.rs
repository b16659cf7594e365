use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "zonectl")]
#[command(version)]
#[command(about = "Declarative system time zone management", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Converge the system time zone to the desired identifier
    Apply(ApplyArgs),

    /// Show current vs desired time zone without changing anything
    Status(StatusArgs),

    /// List the time zone identifiers the host recognizes
    Zones(ZonesArgs),

    /// Fetch the configuration script from a URL and run it
    Bootstrap(BootstrapArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser)]
pub struct ApplyArgs {
    /// Target zone identifier (default: config file, then the built-in default)
    #[arg(short, long)]
    pub zone: Option<String>,

    /// Show what would change without changing it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct StatusArgs {
    /// Target zone identifier to compare against
    #[arg(short, long)]
    pub zone: Option<String>,
}

#[derive(Parser)]
pub struct ZonesArgs {
    /// Only show identifiers containing this substring
    #[arg(short, long)]
    pub filter: Option<String>,
}

#[derive(Parser)]
pub struct BootstrapArgs {
    /// Script URL (default: config file, then the built-in default)
    pub url: Option<String>,

    /// Expected BLAKE3 hex digest of the script body
    #[arg(long)]
    pub pin: Option<String>,

    /// Fetch timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Allow plain http:// URLs
    #[arg(long)]
    pub insecure_http: bool,
}
