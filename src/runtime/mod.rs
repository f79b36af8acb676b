//! Application lifecycle
//!
//! - `startup`: build the link store from configuration
//! - `modes`: server mode entry point

pub mod lifetime;
pub mod modes;
