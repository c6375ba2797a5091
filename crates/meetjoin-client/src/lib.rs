//! CLI, configuration, launcher output rendering
//!
//! This crate provides the `meetjoin` command-line interface.

pub mod alfred;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;

pub use cli::Cli;
pub use commands::Session;
pub use error::{ClientError, ClientResult};
pub use render::OutputFormat;
