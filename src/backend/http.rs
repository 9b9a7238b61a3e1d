//! HTTP execution backend.
//!
//! Speaks the minimal JSON contract of the test execution server:
//!
//! - `POST {endpoint}/executions?async=<bool>` runs a recipe
//! - `GET {endpoint}/executions/{id}/status` reports on an execution
//! - `GET {endpoint}/executions/{id}/transactions/{transactionId}` returns a
//!   transaction log
//!
//! Ids are percent-encoded as single path segments.

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{Auth, BackendError, ExecutionListener, ListenerRegistry, RecipeBackend};
use crate::config::RunnerConfig;
use crate::model::{LogRoot, ProjectResultReport, Recipe};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Backend that talks to a remote server over HTTP.
pub struct HttpBackend {
    client: Client,
    endpoint: String,
    base_url: Url,
    auth: Option<Auth>,
    timeout: Duration,
    listeners: ListenerRegistry,
    // Executions already reported to listeners as finished.
    finished: Mutex<HashSet<String>>,
}

impl HttpBackend {
    /// Create a backend for `endpoint` with the default 30-second timeout.
    pub fn new(endpoint: impl Into<String>, auth: Option<Auth>) -> Result<Self, BackendError> {
        Self::with_timeout(endpoint, auth, DEFAULT_TIMEOUT)
    }

    /// Create a backend with a custom timeout.
    pub fn with_timeout(
        endpoint: impl Into<String>,
        auth: Option<Auth>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        let base_url = Url::parse(&endpoint).map_err(|e| BackendError::InvalidEndpoint {
            endpoint: endpoint.clone(),
            message: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(BackendError::InvalidEndpoint {
                endpoint,
                message: "not a base URL".to_string(),
            });
        }

        let client = Client::builder()
            .user_agent(concat!("recipe-runner/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            base_url,
            auth,
            timeout,
            listeners: ListenerRegistry::new(),
            finished: Mutex::new(HashSet::new()),
        })
    }

    /// Create a backend from resolved configuration.
    pub fn from_config(config: &RunnerConfig) -> Result<Self, BackendError> {
        Self::with_timeout(config.endpoint.clone(), config.auth(), config.timeout)
    }

    /// Base URL all requests are made against.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Number of registered execution listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// URL of `segments` below the endpoint, each percent-encoded.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in the constructor.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Record `report` as finished; true the first time its execution is seen.
    fn first_finish(&self, report: &ProjectResultReport) -> bool {
        self.finished
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(report.execution_id.clone())
    }

    fn notify_finished(&self, report: &ProjectResultReport) {
        if self.first_finish(report) {
            self.listeners.notify_execution_finished(report);
        }
    }

    fn post_recipe(
        &self,
        recipe: &Recipe,
        async_mode: bool,
    ) -> Result<ProjectResultReport, BackendError> {
        let body = serde_json::to_string(recipe).map_err(BackendError::Serialize)?;
        let mut url = self.url(&["executions"]);
        url.query_pairs_mut()
            .append_pair("async", if async_mode { "true" } else { "false" });
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        self.send(request, self.auth.as_ref())
    }

    fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        auth: Option<&Auth>,
    ) -> Result<T, BackendError> {
        let request = match auth {
            Some(auth) => request.basic_auth(&auth.user, auth.password.as_ref()),
            None => request,
        };

        let response = request.send()?;
        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        serde_json::from_str(&text).map_err(BackendError::Decode)
    }

    fn notify_outcome(
        &self,
        outcome: &Result<ProjectResultReport, BackendError>,
        on_success: impl Fn(&ProjectResultReport),
    ) {
        match outcome {
            Ok(report) => on_success(report),
            Err(e) => self.listeners.notify_error(e),
        }
    }
}

impl RecipeBackend for HttpBackend {
    fn submit(&self, recipe: &Recipe) -> Result<ProjectResultReport, BackendError> {
        let outcome = self.post_recipe(recipe, true);
        self.notify_outcome(&outcome, |report| {
            self.listeners.notify_request_sent(report);
            if report.status.is_terminal() {
                self.notify_finished(report);
            }
        });
        outcome
    }

    fn execute(&self, recipe: &Recipe) -> Result<ProjectResultReport, BackendError> {
        let outcome = self.post_recipe(recipe, false);
        self.notify_outcome(&outcome, |report| self.notify_finished(report));
        outcome
    }

    fn execution_status(&self, execution_id: &str) -> Result<ProjectResultReport, BackendError> {
        let url = self.url(&["executions", execution_id, "status"]);
        let report: ProjectResultReport = self.send(self.client.get(url), self.auth.as_ref())?;
        if report.status.is_terminal() {
            self.notify_finished(&report);
        }
        Ok(report)
    }

    fn transaction_log(
        &self,
        execution_id: &str,
        transaction_id: &str,
        auth: Option<&Auth>,
    ) -> Result<LogRoot, BackendError> {
        let url = self.url(&["executions", execution_id, "transactions", transaction_id]);
        self.send(self.client.get(url), auth)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeout_is_30_seconds() {
        let backend = HttpBackend::new("http://localhost:8080", None).unwrap();
        assert_eq!(backend.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn custom_timeout() {
        let backend =
            HttpBackend::with_timeout("http://localhost:8080", None, Duration::from_secs(5))
                .unwrap();
        assert_eq!(backend.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let backend = HttpBackend::new("http://localhost:8080/v1/readyapi//", None).unwrap();
        assert_eq!(backend.endpoint(), "http://localhost:8080/v1/readyapi");
    }

    #[test]
    fn ids_are_encoded_as_single_segments() {
        let backend = HttpBackend::new("http://localhost:8080/v1/readyapi/", None).unwrap();
        let url = backend.url(&["executions", "a/b?c#d", "transactions", "tx 1"]);
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/v1/readyapi/executions/a%2Fb%3Fc%23d/transactions/tx%201"
        );
    }

    #[test]
    fn endpoint_without_path_gets_segments_appended() {
        let backend = HttpBackend::new("http://localhost:8080", None).unwrap();
        assert_eq!(
            backend.url(&["executions"]).as_str(),
            "http://localhost:8080/executions"
        );
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let err = HttpBackend::new("not a url", None).err().unwrap();
        assert!(matches!(err, BackendError::InvalidEndpoint { .. }));
        assert!(HttpBackend::new("mailto:someone@example.com", None).is_err());
    }

    #[test]
    fn exposes_configured_auth() {
        let backend =
            HttpBackend::new("http://localhost", Some(Auth::new("bob", None))).unwrap();
        assert_eq!(backend.auth().map(|a| a.user.as_str()), Some("bob"));
    }

    #[test]
    fn from_config_uses_endpoint_and_timeout() {
        let config = RunnerConfig {
            endpoint: "http://server:9000".into(),
            timeout: Duration::from_secs(12),
            ..Default::default()
        };
        let backend = HttpBackend::from_config(&config).unwrap();
        assert_eq!(backend.endpoint(), "http://server:9000");
        assert_eq!(backend.timeout(), Duration::from_secs(12));
        assert!(backend.auth().is_none());
    }
}
