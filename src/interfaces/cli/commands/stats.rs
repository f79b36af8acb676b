//! Stats command

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::LinkStore;

pub async fn show_stats(store: &LinkStore) -> Result<(), CliError> {
    let stats = store.stats().await?;

    println!("{}", "Link statistics:".bold().green());
    println!(
        "  {} {}",
        "Total links: ".dimmed(),
        stats.total_links.to_string().cyan()
    );
    println!(
        "  {} {}",
        "Total clicks:".dimmed(),
        stats.total_clicks.to_string().cyan()
    );
    Ok(())
}
