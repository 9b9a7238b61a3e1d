//! Transaction log command implementation.
//!
//! The `recipe-runner transaction-log` command prints the detailed
//! transaction log entry recorded for one step of an execution.

use std::io::Write;
use std::sync::Arc;

use crate::backend::RecipeBackend;
use crate::cli::args::TransactionLogArgs;
use crate::error::Result;
use crate::execution::StepResult;
use crate::logging::Logger;
use crate::model::TestStepResultReport;

use super::dispatcher::{Command, CommandResult};

/// The transaction-log command implementation.
pub struct TransactionLogCommand {
    backend: Arc<dyn RecipeBackend>,
    logger: Arc<dyn Logger>,
    args: TransactionLogArgs,
}

impl TransactionLogCommand {
    /// Create a new transaction-log command.
    pub fn new(
        backend: Arc<dyn RecipeBackend>,
        logger: Arc<dyn Logger>,
        args: TransactionLogArgs,
    ) -> Self {
        Self {
            backend,
            logger,
            args,
        }
    }
}

impl Command for TransactionLogCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let report = TestStepResultReport {
            transaction_id: Some(self.args.transaction_id.clone()),
            ..Default::default()
        };
        let auth = self.backend.auth().cloned();
        let mut step = StepResult::new(
            report,
            self.args.execution_id.clone(),
            Arc::clone(&self.backend),
            auth,
            Arc::clone(&self.logger),
        );

        match step.detailed_log() {
            Some(entry) => {
                let json = serde_json::to_string_pretty(entry).map_err(anyhow::Error::from)?;
                writeln!(out, "{}", json)?;
                Ok(CommandResult::success())
            }
            None => {
                writeln!(out, "No transaction log available")?;
                Ok(CommandResult::failure(1))
            }
        }
    }
}
