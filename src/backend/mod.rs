//! The remote test execution backend.
//!
//! [`RecipeBackend`] abstracts the server: submit a recipe, execute it and
//! wait, query an execution's status, and fetch the transaction log of one
//! step. Implementations:
//!
//! - [`HttpBackend`] talks to a real server with a blocking `reqwest` client
//! - [`MockBackend`] returns scripted responses and records calls, for tests

pub mod http;
pub mod listener;
pub mod mock;

pub use http::HttpBackend;
pub use listener::{ExecutionListener, ListenerRegistry};
pub use mock::{BackendCall, MockBackend};

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::model::{LogRoot, ProjectResultReport, Recipe};

/// Status code the server uses for a missing resource.
pub const NOT_FOUND: u16 = 404;

/// Errors raised by a [`RecipeBackend`].
#[derive(Debug, Error)]
pub enum BackendError {
    /// The server answered with a non-success status.
    #[error("Backend returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never produced a response.
    #[error("Backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not what the server should send.
    #[error("Failed to decode backend response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The recipe could not be serialized.
    #[error("Failed to serialize recipe: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The configured endpoint is not a usable base URL.
    #[error("Invalid backend endpoint '{endpoint}': {message}")]
    InvalidEndpoint { endpoint: String, message: String },
}

impl BackendError {
    /// Whether this is the distinguished "not found" outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::Api { status, .. } if *status == NOT_FOUND)
    }

    /// The HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Credentials presented to the backend.
#[derive(Clone, PartialEq, Eq)]
pub struct Auth {
    pub user: String,
    pub password: Option<String>,
}

impl Auth {
    pub fn new(user: impl Into<String>, password: Option<String>) -> Self {
        Self {
            user: user.into(),
            password,
        }
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auth")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Capabilities of a remote test execution server.
pub trait RecipeBackend: Send + Sync {
    /// Submit a recipe and return as soon as the server accepted it.
    fn submit(&self, recipe: &Recipe) -> Result<ProjectResultReport, BackendError>;

    /// Submit a recipe and block until the server finished running it.
    fn execute(&self, recipe: &Recipe) -> Result<ProjectResultReport, BackendError>;

    /// Current report of a previously submitted execution.
    fn execution_status(&self, execution_id: &str) -> Result<ProjectResultReport, BackendError>;

    /// Detailed transaction log of one step of an execution.
    fn transaction_log(
        &self,
        execution_id: &str,
        transaction_id: &str,
        auth: Option<&Auth>,
    ) -> Result<LogRoot, BackendError>;

    /// Credentials this backend authenticates with.
    fn auth(&self) -> Option<&Auth>;

    fn add_execution_listener(&self, listener: Arc<dyn ExecutionListener>);

    /// Remove a listener previously added; matched by `Arc` identity.
    fn remove_execution_listener(&self, listener: &Arc<dyn ExecutionListener>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_distinguished() {
        let err = BackendError::Api {
            status: 404,
            message: String::new(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn other_statuses_are_not_not_found() {
        let err = BackendError::Api {
            status: 500,
            message: "boom".into(),
        };
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn decode_error_has_no_status() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = BackendError::Decode(source);
        assert!(!err.is_not_found());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn auth_debug_hides_password() {
        let auth = Auth::new("alice", Some("hunter2".into()));
        let debug = format!("{:?}", auth);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));
    }
}
