//! Run command implementation.
//!
//! The `recipe-runner run` command runs a test case file on the test server.

use std::fs;
use std::io::Write;

use crate::cli::args::RunArgs;
use crate::error::{Result, RunnerError};
use crate::model::TestCase;
use crate::runner::RecipeRunner;

use super::dispatcher::{Command, CommandResult};
use super::display::{write_execution_header, write_log_summary, write_step};

/// The run command implementation.
pub struct RunCommand {
    runner: RecipeRunner,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(runner: RecipeRunner, args: RunArgs) -> Self {
        Self { runner, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }

    fn load_test_case(&self) -> Result<TestCase> {
        let path = &self.args.test_case;
        let content = fs::read_to_string(path).map_err(|e| RunnerError::TestCaseParse {
            path: path.clone(),
            message: e.to_string(),
        })?;
        TestCase::from_json(&content).map_err(|e| RunnerError::TestCaseParse {
            path: path.clone(),
            message: e.to_string(),
        })
    }
}

impl Command for RunCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let test_case = self.load_test_case()?;
        let execution = self.runner.run(&test_case, self.args.scenario.as_deref())?;

        write_execution_header(out, &execution)?;
        for mut step in execution.step_results() {
            write_step(out, &step)?;
            if self.args.logs {
                write_log_summary(out, step.detailed_log())?;
            }
        }

        if execution.status().is_failure() {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}
