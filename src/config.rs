//! Startup configuration.
//!
//! Values come from command-line flags, an optional YAML file, and built-in
//! defaults, in that order of precedence. The result is immutable and handed
//! to the listener once.
//!
//! ```yaml
//! server:
//!   listen_addr: "127.0.0.1:4221"
//! files:
//!   directory: "/tmp/porthole"
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

pub const DEFAULT_LISTEN: &str = "localhost:4221";

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "porthole")]
#[command(version)]
#[command(about = "Minimal HTTP/1.1 server with echo, user-agent and file routes", long_about = None)]
pub struct Cli {
    /// Base directory for the /files/ routes
    #[arg(long)]
    pub directory: Option<PathBuf>,

    /// Address to bind to (e.g., 127.0.0.1:4221)
    #[arg(short, long, env = "LISTEN")]
    pub listen: Option<String>,

    /// Path to YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// YAML configuration file structure
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub server: ServerSection,
    pub files: FilesSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub listen_addr: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FilesSection {
    pub directory: Option<PathBuf>,
}

impl FileConfig {
    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(text).context("invalid YAML configuration")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&text)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    /// `None` leaves every /files/ request answering 404
    pub directory: Option<PathBuf>,
    pub log_level: String,
}

impl Config {
    /// Builds the configuration from the process arguments.
    pub fn load() -> anyhow::Result<Self> {
        Self::from_cli(Cli::parse())
    }

    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Ok(Self::merge(cli, file))
    }

    /// CLI values override the file; the file overrides defaults.
    pub fn merge(cli: Cli, file: FileConfig) -> Self {
        Self {
            listen_addr: cli
                .listen
                .or(file.server.listen_addr)
                .unwrap_or_else(|| DEFAULT_LISTEN.to_string()),
            directory: cli.directory.or(file.files.directory),
            log_level: cli.log_level,
        }
    }
}
