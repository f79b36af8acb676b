//! urlgpt - a small URL shortener
//!
//! Links map a short code to a destination URL, expire one calendar month
//! after creation and count every successful redirect. The whole collection
//! lives in a single storage slot that is rewritten on every mutation.
//!
//! # Architecture
//! - `utils`: code generator, expiration policy, URL validation
//! - `storage`: the storage slot trait and its file / memory backends
//! - `services`: link store and redirect resolver
//! - `api`: HTTP redirect route and link management API
//! - `interfaces`: command-line interface
//! - `config`: configuration loading
//! - `runtime`: startup and server mode
//! - `system`: logging

pub mod api;
pub mod cli;
pub mod clock;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
