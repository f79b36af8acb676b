//! Resolve short code command

use colored::Colorize;
use std::sync::Arc;

use crate::interfaces::cli::CliError;
use crate::services::{LinkStore, RedirectResolver, RedirectState};

pub async fn resolve_code(store: Arc<LinkStore>, code: String) -> Result<(), CliError> {
    let resolver = RedirectResolver::new(store);

    match resolver.resolve(Some(&code)).await? {
        RedirectState::Redirecting(target) => {
            println!("{}", target);
            Ok(())
        }
        RedirectState::Expired => Err(CliError::CommandError(format!(
            "Short link {} has expired. All links expire after 1 month.",
            code.cyan()
        ))),
        RedirectState::NotFound | RedirectState::Loading => Err(CliError::CommandError(
            format!("Short link does not exist: {}", code.cyan()),
        )),
    }
}
