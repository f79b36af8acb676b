//! User interfaces built on the service layer

pub mod cli;
