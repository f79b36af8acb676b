//! Mode routing
//!
//! The binary runs either the HTTP server or a one-shot CLI command; the
//! command-line parser decides which.

pub mod server;

pub use server::run_server;
