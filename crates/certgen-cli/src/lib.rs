//! CLI library components for the certificate generator.

pub mod cli;
pub mod config;
pub mod logging;
pub mod report;
