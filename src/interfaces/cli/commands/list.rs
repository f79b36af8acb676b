//! List links command

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::LinkStore;

pub async fn list_links(store: &LinkStore) -> Result<(), CliError> {
    let links = store.load_all().await?;

    if links.is_empty() {
        println!("{} No short links found", "ℹ".bold().blue());
        return Ok(());
    }

    println!("{}", "Short link list:".bold().green());
    println!();
    for link in &links {
        let mut info_parts = vec![format!(
            "{} -> {}",
            link.short_code.cyan(),
            link.original_url.blue().underline()
        )];

        info_parts.push(
            format!(
                "(expires: {})",
                link.expires_at.format("%Y-%m-%d %H:%M:%S UTC")
            )
            .dimmed()
            .yellow()
            .to_string(),
        );

        if link.click_count > 0 {
            info_parts.push(
                format!("(clicks: {})", link.click_count)
                    .dimmed()
                    .cyan()
                    .to_string(),
            );
        }

        println!("  {}", info_parts.join(" "));
        println!("    {} {}", "id:".dimmed(), link.id.dimmed());
    }
    println!();
    println!(
        "{} Total {} short links",
        "ℹ".bold().blue(),
        links.len().to_string().green()
    );
    Ok(())
}
