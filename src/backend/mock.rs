//! Scriptable in-memory backend for testing.
//!
//! `MockBackend` implements [`RecipeBackend`] without a server. Responses can
//! be scripted per call kind, and every call is recorded for assertion.
//!
//! # Example
//!
//! ```
//! use recipe_runner::backend::{BackendCall, MockBackend, RecipeBackend};
//! use recipe_runner::model::{Recipe, TestCase};
//!
//! let backend = MockBackend::new();
//! let report = backend.execute(&Recipe::new(&TestCase::new())).unwrap();
//!
//! assert!(report.status.is_terminal());
//! assert!(matches!(backend.calls()[0], BackendCall::Execute(_)));
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::{
    Auth, BackendError, ExecutionListener, ListenerRegistry, RecipeBackend, NOT_FOUND,
};
use crate::model::{ExecutionStatus, LogRoot, ProjectResultReport, Recipe};

/// A call received by a [`MockBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Submit(Recipe),
    Execute(Recipe),
    ExecutionStatus(String),
    TransactionLog {
        execution_id: String,
        transaction_id: String,
        auth: Option<Auth>,
    },
}

#[derive(Debug, Clone)]
enum Scripted<T> {
    Respond(T),
    Fail { status: u16, message: String },
}

impl<T: Clone> Scripted<T> {
    fn resolve(&self) -> Result<T, BackendError> {
        match self {
            Scripted::Respond(value) => Ok(value.clone()),
            Scripted::Fail { status, message } => Err(BackendError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}

#[derive(Default)]
struct MockState {
    calls: Vec<BackendCall>,
    report: Option<Scripted<ProjectResultReport>>,
    status: Option<Scripted<ProjectResultReport>>,
    logs: HashMap<String, Scripted<LogRoot>>,
}

/// In-memory backend with scripted responses.
///
/// Unless scripted otherwise, `submit` answers with a `RUNNING` report,
/// `execute` and `execution_status` with a `FINISHED` one, and transaction
/// log lookups with HTTP 404.
#[derive(Default)]
pub struct MockBackend {
    auth: Option<Auth>,
    state: Mutex<MockState>,
    listeners: ListenerRegistry,
}

impl MockBackend {
    /// Default execution id used in unscripted reports.
    pub const EXECUTION_ID: &'static str = "mock-execution";

    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend that reports `auth` as its credentials.
    pub fn with_auth(auth: Auth) -> Self {
        Self {
            auth: Some(auth),
            ..Default::default()
        }
    }

    /// Answer `submit` and `execute` with `report`.
    pub fn set_report(&self, report: ProjectResultReport) {
        self.lock().report = Some(Scripted::Respond(report));
    }

    /// Fail `submit` and `execute` with an HTTP error.
    pub fn fail_runs(&self, status: u16, message: &str) {
        self.lock().report = Some(Scripted::Fail {
            status,
            message: message.to_string(),
        });
    }

    /// Answer `execution_status` with `report`.
    pub fn set_status_report(&self, report: ProjectResultReport) {
        self.lock().status = Some(Scripted::Respond(report));
    }

    /// Fail `execution_status` with an HTTP error.
    pub fn fail_status(&self, status: u16, message: &str) {
        self.lock().status = Some(Scripted::Fail {
            status,
            message: message.to_string(),
        });
    }

    /// Answer lookups of `transaction_id` with `root`.
    pub fn set_transaction_log(&self, transaction_id: &str, root: LogRoot) {
        self.lock()
            .logs
            .insert(transaction_id.to_string(), Scripted::Respond(root));
    }

    /// Fail lookups of `transaction_id` with an HTTP error.
    pub fn fail_transaction_log(&self, transaction_id: &str, status: u16, message: &str) {
        self.lock().logs.insert(
            transaction_id.to_string(),
            Scripted::Fail {
                status,
                message: message.to_string(),
            },
        );
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.lock().calls.clone()
    }

    /// Number of transaction log lookups received.
    pub fn transaction_log_calls(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| matches!(c, BackendCall::TransactionLog { .. }))
            .count()
    }

    /// Number of registered execution listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn run(
        &self,
        call: BackendCall,
        default_status: ExecutionStatus,
    ) -> Result<ProjectResultReport, BackendError> {
        let mut state = self.lock();
        state.calls.push(call);
        match &state.report {
            Some(scripted) => scripted.resolve(),
            None => Ok(ProjectResultReport::new(Self::EXECUTION_ID, default_status)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl RecipeBackend for MockBackend {
    fn submit(&self, recipe: &Recipe) -> Result<ProjectResultReport, BackendError> {
        let outcome = self.run(BackendCall::Submit(recipe.clone()), ExecutionStatus::Running);
        match &outcome {
            Ok(report) => self.listeners.notify_request_sent(report),
            Err(e) => self.listeners.notify_error(e),
        }
        outcome
    }

    fn execute(&self, recipe: &Recipe) -> Result<ProjectResultReport, BackendError> {
        let outcome = self.run(BackendCall::Execute(recipe.clone()), ExecutionStatus::Finished);
        match &outcome {
            Ok(report) => self.listeners.notify_execution_finished(report),
            Err(e) => self.listeners.notify_error(e),
        }
        outcome
    }

    fn execution_status(&self, execution_id: &str) -> Result<ProjectResultReport, BackendError> {
        let mut state = self.lock();
        state
            .calls
            .push(BackendCall::ExecutionStatus(execution_id.to_string()));
        match &state.status {
            Some(scripted) => scripted.resolve(),
            None => Ok(ProjectResultReport::new(
                execution_id,
                ExecutionStatus::Finished,
            )),
        }
    }

    fn transaction_log(
        &self,
        execution_id: &str,
        transaction_id: &str,
        auth: Option<&Auth>,
    ) -> Result<LogRoot, BackendError> {
        let mut state = self.lock();
        state.calls.push(BackendCall::TransactionLog {
            execution_id: execution_id.to_string(),
            transaction_id: transaction_id.to_string(),
            auth: auth.cloned(),
        });
        match state.logs.get(transaction_id) {
            Some(scripted) => scripted.resolve(),
            None => Err(BackendError::Api {
                status: NOT_FOUND,
                message: format!("No transaction {}", transaction_id),
            }),
        }
    }

    fn auth(&self) -> Option<&Auth> {
        self.auth.as_ref()
    }

    fn add_execution_listener(&self, listener: Arc<dyn ExecutionListener>) {
        self.listeners.add(listener);
    }

    fn remove_execution_listener(&self, listener: &Arc<dyn ExecutionListener>) {
        self.listeners.remove(listener);
    }
}
