//! Service layer for business logic
//!
//! Shared by the HTTP handlers and the CLI commands.

mod link_store;
mod redirect;

pub use link_store::*;
pub use redirect::*;
