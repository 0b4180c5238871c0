pub use clap::Parser;

use std::path::PathBuf;

use crate::state::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "drive")]
#[command(about = "Generate and inspect end-to-end encrypted drive keys")]
pub struct Args {
    /// Path to the drive config directory (defaults to ~/.drive)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    /// Passphrase the address key is locked with
    #[arg(long, global = true, env = "DRIVE_KEY_PASSWORD", hide_env_values = true)]
    pub passphrase: Option<String>,

    /// Log level filter (overrides config.toml; RUST_LOG overrides both)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format (overrides config.toml)
    #[arg(long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: crate::Command,
}
