//! CLI module providing command-line interface functionality
//!
//! Parses flags, resolves configuration, sets up logging and hands over to
//! the HTTP server.

pub mod commands;
pub mod context;

use anyhow::Result;
use clap::Parser;

pub use commands::Cli;
pub use context::CliContext;

use crate::server;

/// Main CLI application
pub struct CliApp;

impl CliApp {
    /// Parse command line arguments and run the relay until shutdown
    pub async fn run() -> Result<()> {
        let cli = Cli::parse();

        // Misconfiguration is fatal before anything is served
        let context = CliContext::from_cli(&cli)?;
        context.init_logging()?;

        server::serve(&context.config).await?;
        Ok(())
    }
}
