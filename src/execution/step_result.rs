//! Result wrapper for individual steps.
//!
//! A [`StepResult`] wraps one step's report and fetches the step's detailed
//! transaction log from the backend the first time it is asked for. The
//! outcome of that lookup is cached, including "there is none".

use std::fmt;
use std::sync::Arc;

use crate::backend::{Auth, RecipeBackend};
use crate::logging::Logger;
use crate::model::{AssertionStatus, LogEntry, TestStepResultReport};

/// State of the detailed log lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum LogLookup {
    /// The backend has not been asked yet.
    Unchecked,
    /// The backend returned a log; this is its first entry.
    Found(LogEntry),
    /// The backend was asked and there is no usable log.
    NotFound,
}

impl LogLookup {
    pub fn is_checked(&self) -> bool {
        !matches!(self, LogLookup::Unchecked)
    }
}

/// One executed step, with lazy access to its transaction log.
pub struct StepResult {
    report: TestStepResultReport,
    execution_id: String,
    backend: Arc<dyn RecipeBackend>,
    auth: Option<Auth>,
    logger: Arc<dyn Logger>,
    lookup: LogLookup,
}

impl StepResult {
    pub fn new(
        report: TestStepResultReport,
        execution_id: impl Into<String>,
        backend: Arc<dyn RecipeBackend>,
        auth: Option<Auth>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            report,
            execution_id: execution_id.into(),
            backend,
            auth,
            logger,
            lookup: LogLookup::Unchecked,
        }
    }

    pub fn report(&self) -> &TestStepResultReport {
        &self.report
    }

    pub fn name(&self) -> &str {
        &self.report.test_step_name
    }

    pub fn assertion_status(&self) -> AssertionStatus {
        self.report.assertion_status
    }

    pub fn messages(&self) -> &[String] {
        &self.report.messages
    }

    pub fn transaction_id(&self) -> Option<&str> {
        self.report.transaction_id.as_deref()
    }

    pub fn execution_id(&self) -> &str {
        &self.execution_id
    }

    /// Current lookup state, without triggering a lookup.
    pub fn log_lookup(&self) -> &LogLookup {
        &self.lookup
    }

    /// The detailed transaction log entry for this step.
    ///
    /// The first call asks the backend; every later call returns the cached
    /// outcome. Lookup failures are logged and reported as `None`.
    pub fn detailed_log(&mut self) -> Option<&LogEntry> {
        if !self.lookup.is_checked() {
            self.lookup = self.fetch_log();
        }

        match &self.lookup {
            LogLookup::Found(entry) => Some(entry),
            LogLookup::Unchecked | LogLookup::NotFound => None,
        }
    }

    fn fetch_log(&self) -> LogLookup {
        let Some(transaction_id) = self.report.transaction_id.as_deref() else {
            self.logger.info(&format!(
                "Step '{}' of execution {} has no transaction log",
                self.report.test_step_name, self.execution_id
            ));
            return LogLookup::NotFound;
        };

        match self
            .backend
            .transaction_log(&self.execution_id, transaction_id, self.auth.as_ref())
        {
            Ok(root) => match root.into_first_entry() {
                Some(entry) => LogLookup::Found(entry),
                None => {
                    self.logger.debug(&format!(
                        "Transaction log {} for execution {} has no entries",
                        transaction_id, self.execution_id
                    ));
                    LogLookup::NotFound
                }
            },
            Err(e) if e.is_not_found() => {
                self.logger.info(&format!(
                    "No transaction log available for execution {}",
                    self.execution_id
                ));
                LogLookup::NotFound
            }
            Err(e) => {
                self.logger.error(&format!(
                    "Error when trying to get transaction log for execution {}: {}",
                    self.execution_id, e
                ));
                LogLookup::NotFound
            }
        }
    }
}

impl fmt::Debug for StepResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepResult")
            .field("report", &self.report)
            .field("execution_id", &self.execution_id)
            .field("lookup", &self.lookup)
            .finish_non_exhaustive()
    }
}
