//! CLI context holding the resolved configuration

use anyhow::Result;
use std::sync::Arc;

use super::Cli;
use crate::config::Config;

/// Resolved startup state shared with the server
#[derive(Clone)]
pub struct CliContext {
    pub verbose: bool,
    pub config: Arc<Config>,
}

impl CliContext {
    /// Load the config file (if any), apply flags and environment, and validate
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = Config::load(cli.config.as_deref())?;
        config.apply_overrides(cli.overrides());
        config.validate()?;

        Ok(Self {
            verbose: cli.verbose,
            config: Arc::new(config),
        })
    }

    /// Initialize logging subsystem based on verbosity and configuration
    pub fn init_logging(&self) -> Result<()> {
        let log_level: &str = if self.verbose {
            "debug"
        } else {
            &self.config.logging.level
        };

        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env().add_directive(
                    log_level
                        .parse()
                        .unwrap_or_else(|_| tracing::Level::INFO.into()),
                ),
            )
            .init();

        if self.verbose {
            tracing::debug!("Verbose logging enabled");
            tracing::debug!("Config: {:?}", self.config.server);
        }

        Ok(())
    }
}
