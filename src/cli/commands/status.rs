//! Status command implementation.
//!
//! The `recipe-runner status` command shows the current state of an
//! execution, typically one started with `run --async`.

use std::io::Write;
use std::sync::Arc;

use crate::backend::RecipeBackend;
use crate::cli::args::StatusArgs;
use crate::error::Result;
use crate::execution::Execution;
use crate::logging::Logger;
use crate::model::{ExecutionStatus, ProjectResultReport};

use super::dispatcher::{Command, CommandResult};
use super::display::{write_execution_header, write_step};

/// The status command implementation.
pub struct StatusCommand {
    backend: Arc<dyn RecipeBackend>,
    logger: Arc<dyn Logger>,
    args: StatusArgs,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(backend: Arc<dyn RecipeBackend>, logger: Arc<dyn Logger>, args: StatusArgs) -> Self {
        Self {
            backend,
            logger,
            args,
        }
    }
}

impl Command for StatusCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        // Start from a placeholder report; refresh fills in the real one.
        let placeholder =
            ProjectResultReport::new(self.args.execution_id.clone(), ExecutionStatus::Unknown);
        let mut execution =
            Execution::new(placeholder, Arc::clone(&self.backend), Arc::clone(&self.logger));
        execution.refresh()?;

        write_execution_header(out, &execution)?;
        for step in execution.step_results() {
            write_step(out, &step)?;
        }

        if execution.status().is_failure() {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}
