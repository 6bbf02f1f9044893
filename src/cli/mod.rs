//! CLI module for sitewatch
//!
//! Command-line interface definitions and handlers for the website-monitoring
//! dashboard client.
//!
//! # Commands
//!
//! - `watch` - Live dashboard fed by the server's push channel
//! - `list` - Print the monitored websites once
//! - `add` / `remove` - Start or stop monitoring a website
//! - `stats` - Show aggregate statistics
//! - `export` - Download the monitoring data as JSON or CSV
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Live dashboard against a remote server
//! sitewatch --server https://status.example.com watch
//!
//! # Websites whose url or status mentions "down"
//! sitewatch list --search down
//!
//! # Generate shell completions
//! sitewatch completions bash > ~/.bash_completion.d/sitewatch
//! ```

pub mod completions;
pub mod config;
pub mod export;
pub mod output;
pub mod stats;
pub mod targets;
pub mod watch;

pub use completions::handle_completions;
pub use config::handle_config_init;

use crate::api::ExportFormat;
use crate::config::SitewatchConfig;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "sitewatch.toml";

/// sitewatch - live website-monitoring dashboard
#[derive(Parser, Debug)]
#[command(
    name = "sitewatch",
    version,
    about = "Live dashboard client for a website-monitoring server"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command that talks to the server.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "SITEWATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Monitoring server base URL (e.g., http://127.0.0.1:8000)
    #[arg(short, long, global = true)]
    pub server: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,
}

impl GlobalArgs {
    /// Load configuration with environment and CLI overrides applied.
    pub fn load_config(&self) -> Result<SitewatchConfig, Box<dyn std::error::Error>> {
        let config = match &self.config {
            Some(path) => SitewatchConfig::load(Some(path.as_path()))?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                SitewatchConfig::load(Some(Path::new(DEFAULT_CONFIG_FILE)))?
            }
            None => SitewatchConfig::default(),
        };

        let mut config = config.with_env_overrides();

        // CLI overrides (highest priority)
        if let Some(ref server) = self.server {
            config.server.base_url = server.clone();
        }
        if let Some(ref level) = self.log_level {
            config.logging.level = level.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the live dashboard
    Watch,
    /// List monitored websites
    List(ListArgs),
    /// Start monitoring a website
    Add(AddArgs),
    /// Stop monitoring a website
    Remove(RemoveArgs),
    /// Show aggregate statistics
    Stats(StatsArgs),
    /// Download monitoring data
    Export(ExportArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show websites whose url or status contains this text
    #[arg(short = 'q', long)]
    pub search: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Website URL (e.g., https://example.com)
    pub url: String,
}

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Website URL to stop monitoring
    pub url: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
