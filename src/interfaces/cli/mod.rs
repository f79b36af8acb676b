//! CLI interface module
//!
//! One-shot commands that operate directly on the configured storage slot.

pub mod commands;

use std::fmt;

use crate::cli::{Commands, ConfigCommands};
use crate::config::StaticConfig;
use crate::errors::UrlgptError;
use crate::runtime::lifetime::startup::prepare_link_store;
use commands::{
    add_link, config_generate, list_links, remove_link, resolve_code, show_stats,
};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    InputError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::InputError(msg) => format!("Input error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::InputError(msg) => {
                format!("{} {}", "Input error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<UrlgptError> for CliError {
    fn from(err: UrlgptError) -> Self {
        if err.is_client_error() {
            CliError::InputError(err.format_simple())
        } else {
            CliError::StorageError(err.format_simple())
        }
    }
}

/// Run a CLI command from clap-parsed input
///
/// `serve` is not handled here; the binary routes it to server mode.
pub async fn run_cli_command(cmd: Commands, config: &StaticConfig) -> Result<(), CliError> {
    // config generate 不需要存储
    if let Commands::Config {
        action: ConfigCommands::Generate { output_path, force },
    } = cmd
    {
        return config_generate(output_path, force).await;
    }

    let store = prepare_link_store(config)?;

    match cmd {
        Commands::Add { url, alias } => add_link(&store, url, alias).await,
        Commands::List => list_links(&store).await,
        Commands::Remove { id } => remove_link(&store, id).await,
        Commands::Resolve { code } => resolve_code(store, code).await,
        Commands::Stats => show_stats(&store).await,
        Commands::Serve => Err(CliError::CommandError(
            "serve is handled by server mode".to_string(),
        )),
        Commands::Config { .. } => unreachable!("handled above"),
    }
}
