//! Recipe execution.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::recipe_dump::dump_recipe;
use crate::backend::{BackendError, ExecutionListener, HttpBackend, RecipeBackend};
use crate::config::RunnerConfig;
use crate::execution::Execution;
use crate::logging::{LogLevel, Logger, TracingLogger};
use crate::model::{Recipe, TestCase};

/// Runs test cases as recipes on an execution backend.
///
/// # Example
///
/// ```
/// use recipe_runner::backend::MockBackend;
/// use recipe_runner::logging::MemoryLogger;
/// use recipe_runner::model::{ExecutionStatus, TestCase, TestStep};
/// use recipe_runner::runner::RecipeRunner;
/// use std::sync::Arc;
///
/// let runner = RecipeRunner::new(Arc::new(MockBackend::new()), Arc::new(MemoryLogger::new()));
/// let test_case = TestCase::new().with_step(TestStep::new("Delay"));
///
/// let execution = runner.run(&test_case, None).unwrap();
/// assert_eq!(execution.status(), ExecutionStatus::Finished);
/// ```
pub struct RecipeRunner {
    backend: Arc<dyn RecipeBackend>,
    logger: Arc<dyn Logger>,
    log_folder: Option<PathBuf>,
    async_mode: bool,
    silent: bool,
}

impl RecipeRunner {
    /// Create a synchronous runner with no debug log folder.
    pub fn new(backend: Arc<dyn RecipeBackend>, logger: Arc<dyn Logger>) -> Self {
        Self {
            backend,
            logger,
            log_folder: None,
            async_mode: false,
            silent: false,
        }
    }

    /// Create a runner backed by an [`HttpBackend`], logging through `tracing`.
    pub fn from_config(config: &RunnerConfig) -> Result<Self, BackendError> {
        let backend = HttpBackend::from_config(config)?;
        let mut runner = Self::new(Arc::new(backend), Arc::new(TracingLogger))
            .with_log_folder(config.log_folder.clone())
            .with_silent(config.silent);
        runner.set_async(config.async_mode);
        Ok(runner)
    }

    /// Dump every recipe run for a scenario under `log_folder`.
    pub fn with_log_folder(mut self, log_folder: Option<PathBuf>) -> Self {
        self.log_folder = log_folder;
        self
    }

    /// Record the `debug.silent` setting.
    ///
    /// Submission is not suppressed; a warning is logged on every run instead.
    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Run a test case.
    ///
    /// When a log folder is configured and `scenario_id` is given, the recipe
    /// is first written to a file derived from the scenario id. Failing to
    /// write it never stops the run.
    ///
    /// In async mode this returns as soon as the backend accepted the recipe;
    /// otherwise it blocks until the backend finished running it.
    pub fn run(
        &self,
        test_case: &TestCase,
        scenario_id: Option<&str>,
    ) -> Result<Execution, BackendError> {
        let recipe = Recipe::new(test_case);

        if self.logger.is_enabled(LogLevel::Debug) {
            self.logger.debug(&recipe.to_string());
        }

        if let (Some(scenario_id), Some(log_folder)) = (scenario_id, self.log_folder.as_deref()) {
            dump_recipe(log_folder, scenario_id, &recipe, self.logger.as_ref());
        }

        if self.silent {
            self.logger
                .warn("debug.silent is set but recipe submission is not suppressed");
        }

        let report = if self.async_mode {
            self.backend.submit(&recipe)?
        } else {
            self.backend.execute(&recipe)?
        };

        Ok(Execution::new(
            report,
            Arc::clone(&self.backend),
            Arc::clone(&self.logger),
        ))
    }

    /// Adds a listener for test execution events.
    pub fn add_execution_listener(&self, listener: Arc<dyn ExecutionListener>) {
        self.backend.add_execution_listener(listener);
    }

    /// Removes a previously added listener.
    pub fn remove_execution_listener(&self, listener: &Arc<dyn ExecutionListener>) {
        self.backend.remove_execution_listener(listener);
    }

    /// The backend recipes are dispatched to.
    pub fn backend(&self) -> &Arc<dyn RecipeBackend> {
        &self.backend
    }

    pub fn log_folder(&self) -> Option<&Path> {
        self.log_folder.as_deref()
    }

    pub fn is_async(&self) -> bool {
        self.async_mode
    }

    pub fn set_async(&mut self, async_mode: bool) {
        self.async_mode = async_mode;
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }
}

impl fmt::Debug for RecipeRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecipeRunner")
            .field("log_folder", &self.log_folder)
            .field("async_mode", &self.async_mode)
            .field("silent", &self.silent)
            .finish_non_exhaustive()
    }
}
