//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::io::Write;
use std::sync::Arc;

use crate::backend::{HttpBackend, RecipeBackend};
use crate::cli::args::{Cli, Commands};
use crate::config::RunnerConfig;
use crate::error::Result;
use crate::logging::{Logger, TracingLogger};
use crate::runner::RecipeRunner;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command, writing human-readable output to `out`.
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    config: RunnerConfig,
    backend: Arc<dyn RecipeBackend>,
    logger: Arc<dyn Logger>,
}

impl CommandDispatcher {
    /// Create a dispatcher talking to the configured HTTP backend.
    pub fn new(config: RunnerConfig) -> Result<Self> {
        let backend = HttpBackend::from_config(&config)?;
        Ok(Self::with_backend(
            config,
            Arc::new(backend),
            Arc::new(TracingLogger),
        ))
    }

    /// Create a dispatcher for an existing backend.
    pub fn with_backend(
        config: RunnerConfig,
        backend: Arc<dyn RecipeBackend>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            config,
            backend,
            logger,
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Build a runner from configuration around the dispatcher's backend.
    pub fn runner(&self) -> RecipeRunner {
        let mut runner = RecipeRunner::new(Arc::clone(&self.backend), Arc::clone(&self.logger))
            .with_log_folder(self.config.log_folder.clone())
            .with_silent(self.config.silent);
        runner.set_async(self.config.async_mode);
        runner
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, out: &mut dyn Write) -> Result<CommandResult> {
        match &cli.command {
            Commands::Run(args) => {
                let cmd = super::run::RunCommand::new(self.runner(), args.clone());
                cmd.execute(out)
            }
            Commands::Status(args) => {
                let cmd = super::status::StatusCommand::new(
                    Arc::clone(&self.backend),
                    Arc::clone(&self.logger),
                    args.clone(),
                );
                cmd.execute(out)
            }
            Commands::TransactionLog(args) => {
                let cmd = super::transaction_log::TransactionLogCommand::new(
                    Arc::clone(&self.backend),
                    Arc::clone(&self.logger),
                    args.clone(),
                );
                cmd.execute(out)
            }
        }
    }
}
