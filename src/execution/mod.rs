//! Handles to backend executions.
//!
//! An [`Execution`] is what a run returns: the latest report from the server
//! plus what is needed to ask the server more about it later. Its
//! [`StepResult`]s give lazy access to per-step transaction logs.

pub mod step_result;

pub use step_result::{LogLookup, StepResult};

use std::fmt;
use std::sync::Arc;

use crate::backend::{Auth, BackendError, RecipeBackend};
use crate::logging::Logger;
use crate::model::{ExecutionStatus, ProjectResultReport};

/// An in-flight or completed run of a recipe.
pub struct Execution {
    report: ProjectResultReport,
    backend: Arc<dyn RecipeBackend>,
    auth: Option<Auth>,
    logger: Arc<dyn Logger>,
}

impl Execution {
    /// Wrap a report; the backend's current credentials are captured.
    pub fn new(
        report: ProjectResultReport,
        backend: Arc<dyn RecipeBackend>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        let auth = backend.auth().cloned();
        Self {
            report,
            backend,
            auth,
            logger,
        }
    }

    pub fn id(&self) -> &str {
        &self.report.execution_id
    }

    pub fn status(&self) -> ExecutionStatus {
        self.report.status
    }

    /// The most recent report received for this execution.
    pub fn report(&self) -> &ProjectResultReport {
        &self.report
    }

    pub fn auth(&self) -> Option<&Auth> {
        self.auth.as_ref()
    }

    /// One result per executed step, each with its own lazy log lookup.
    pub fn step_results(&self) -> Vec<StepResult> {
        self.report
            .step_reports()
            .map(|step| {
                StepResult::new(
                    step.clone(),
                    self.id(),
                    Arc::clone(&self.backend),
                    self.auth.clone(),
                    Arc::clone(&self.logger),
                )
            })
            .collect()
    }

    /// Ask the backend for the current report and keep it.
    ///
    /// Polling again after the execution finished does not notify listeners
    /// a second time.
    pub fn refresh(&mut self) -> Result<ExecutionStatus, BackendError> {
        self.report = self.backend.execution_status(&self.report.execution_id)?;
        Ok(self.report.status)
    }
}

impl fmt::Debug for Execution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Execution")
            .field("report", &self.report)
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}
