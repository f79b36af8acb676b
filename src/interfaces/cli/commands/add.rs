//! Add link command

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::{CreateLinkRequest, LinkStore};

pub async fn add_link(
    store: &LinkStore,
    url: String,
    alias: Option<String>,
) -> Result<(), CliError> {
    let generated = alias.as_deref().is_none_or(|a| a.trim().is_empty());
    let link = store
        .create(CreateLinkRequest {
            original_url: url,
            custom_alias: alias,
        })
        .await?;

    if generated {
        println!(
            "{} Generated random code: {}",
            "ℹ".bold().blue(),
            link.short_code.magenta()
        );
    }

    println!(
        "{} Added short link: {} -> {} (expires: {})",
        "✓".bold().green(),
        link.short_code.cyan(),
        link.original_url.blue().underline(),
        link.expires_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .yellow()
    );
    println!("  {} {}", "id:".dimmed(), link.id.dimmed());

    Ok(())
}
