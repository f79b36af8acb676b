//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// urlgpt - a small URL shortener
#[derive(Parser, Debug)]
#[command(name = "urlgpt")]
#[command(version)]
#[command(about = "Shorten URLs, resolve short codes and serve redirects", long_about = None)]
pub struct Cli {
    /// Configuration file (default: ./config.toml if present)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default when no command is given)
    Serve,

    /// Shorten a URL
    Add {
        /// Destination URL (absolute)
        url: String,

        /// Custom alias instead of a random code
        #[arg(long, short = 'a')]
        alias: Option<String>,
    },

    /// List live short links, newest first
    List,

    /// Remove a short link by id
    Remove {
        /// Link id as shown by `list`
        id: String,
    },

    /// Resolve a short code once (counts as a click)
    Resolve {
        /// Short code
        code: String,
    },

    /// Show link and click totals
    Stats,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.toml)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// The command to run, `serve` when none was given
    pub fn command_or_default(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}
