//! Remove link command

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::LinkStore;

pub async fn remove_link(store: &LinkStore, id: String) -> Result<(), CliError> {
    if store.delete(&id).await? {
        println!("{} Deleted short link: {}", "✓".bold().green(), id.cyan());
    } else {
        println!(
            "{} No short link with id {}, nothing to delete",
            "ℹ".bold().blue(),
            id.cyan()
        );
    }
    Ok(())
}
