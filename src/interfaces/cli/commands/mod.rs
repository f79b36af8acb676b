//! CLI command implementations

mod add;
mod config_gen;
mod list;
mod remove;
mod resolve;
mod stats;

pub use add::add_link;
pub use config_gen::config_generate;
pub use list::list_links;
pub use remove::remove_link;
pub use resolve::resolve_code;
pub use stats::show_stats;
