//! HTTP backend tests against a local mock server.

use httpmock::prelude::*;
use recipe_runner::backend::{Auth, ExecutionListener, HttpBackend, RecipeBackend};
use recipe_runner::execution::StepResult;
use recipe_runner::logging::{LogLevel, MemoryLogger};
use recipe_runner::model::{
    ExecutionStatus, ProjectResultReport, Recipe, TestCase, TestStep, TestStepResultReport,
};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn recipe() -> Recipe {
    let test_case = TestCase::new().with_step(
        TestStep::new("REST Request")
            .with_property("method", "GET")
            .with_property("URI", "https://petstore.example/pets"),
    );
    Recipe::new(&test_case)
}

fn report_json(status: &str) -> serde_json::Value {
    json!({
        "executionId": "exec-7",
        "status": status,
        "timeTaken": 120,
        "testSuiteResultReports": [{
            "testSuiteName": "suite",
            "testCaseResultReports": [{
                "testCaseName": "pets",
                "testCaseStatus": "OK",
                "testStepResultReports": [{
                    "testStepName": "list pets",
                    "assertionStatus": "OK",
                    "timeTaken": 40,
                    "messages": [],
                    "transactionId": "tx-1"
                }]
            }]
        }]
    })
}

fn backend(server: &MockServer) -> HttpBackend {
    HttpBackend::new(server.url("/v1/readyapi"), Some(Auth::new("alice", Some("secret".into()))))
        .unwrap()
}

#[test]
fn execute_posts_recipe_synchronously_with_basic_auth() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/readyapi/executions")
            .query_param("async", "false")
            .header("Authorization", "Basic YWxpY2U6c2VjcmV0")
            .header("content-type", "application/json")
            .json_body(json!({
                "testSteps": [{
                    "type": "REST Request",
                    "method": "GET",
                    "URI": "https://petstore.example/pets"
                }]
            }));
        then.status(200).json_body(report_json("FINISHED"));
    });

    let report = backend(&server).execute(&recipe()).unwrap();

    mock.assert();
    assert_eq!(report.execution_id, "exec-7");
    assert_eq!(report.status, ExecutionStatus::Finished);
    assert_eq!(report.step_reports().count(), 1);
}

#[test]
fn submit_posts_recipe_asynchronously() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/readyapi/executions")
            .query_param("async", "true");
        then.status(200)
            .json_body(json!({"executionId": "exec-7", "status": "RUNNING"}));
    });

    let report = backend(&server).submit(&recipe()).unwrap();

    mock.assert();
    assert_eq!(report.status, ExecutionStatus::Running);
    assert_eq!(report.step_reports().count(), 0);
}

#[test]
fn non_success_status_is_api_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/readyapi/executions");
        then.status(401).body("Unauthorized");
    });

    let err = backend(&server).execute(&recipe()).unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert!(!err.is_not_found());
    assert!(err.to_string().contains("Unauthorized"));
}

#[test]
fn malformed_report_is_decode_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/readyapi/executions");
        then.status(200).body("<html>not json</html>");
    });

    let err = backend(&server).execute(&recipe()).unwrap_err();

    assert_eq!(err.status(), None);
    assert!(err.to_string().contains("decode"));
}

#[test]
fn execution_status_is_fetched_by_id() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/v1/readyapi/executions/exec-7/status");
        then.status(200).json_body(report_json("FAILED"));
    });

    let report = backend(&server).execution_status("exec-7").unwrap();

    mock.assert();
    assert!(report.status.is_failure());
}

#[test]
fn transaction_log_uses_given_auth() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v1/readyapi/executions/exec-7/transactions/tx-1")
            .header("Authorization", "Basic YWxpY2U6c2VjcmV0");
        then.status(200).json_body(json!({
            "log": {
                "version": "1.2",
                "entries": [{
                    "startedDateTime": "2024-03-01T10:15:00Z",
                    "time": 12.5,
                    "request": {"method": "GET", "url": "https://petstore.example/pets"},
                    "response": {
                        "status": 200,
                        "statusText": "OK",
                        "content": {"size": 2, "mimeType": "application/json", "text": "[]"}
                    }
                }]
            }
        }));
    });

    let backend = backend(&server);
    let root = backend
        .transaction_log("exec-7", "tx-1", backend.auth())
        .unwrap();

    mock.assert();
    let entry = root.first_entry().unwrap();
    assert_eq!(entry.response.as_ref().unwrap().status, 200);
    assert_eq!(entry.request.as_ref().unwrap().method, "GET");
    let content = entry.response.as_ref().unwrap().content.as_ref().unwrap();
    assert_eq!(content.mime_type.as_deref(), Some("application/json"));
    assert_eq!(content.text.as_deref(), Some("[]"));
}

#[test]
fn step_result_finds_har_entry_over_http() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v1/readyapi/executions/exec-7/transactions/tx-1");
        then.status(200).json_body(json!({
            "log": {
                "version": "1.2",
                "creator": {"name": "test-server", "version": "3.0"},
                "entries": [{
                    "startedDateTime": "2024-03-01T10:15:00.000Z",
                    "time": 12,
                    "request": {
                        "method": "POST",
                        "url": "https://petstore.example/pets",
                        "httpVersion": "HTTP/1.1",
                        "headers": [{"name": "Content-Type", "value": "application/json"}],
                        "queryString": [],
                        "postData": {"mimeType": "application/json", "text": "{}"}
                    },
                    "response": {
                        "status": 201,
                        "statusText": "Created",
                        "httpVersion": "HTTP/1.1",
                        "headers": [],
                        "content": {"size": 2, "mimeType": "application/json", "text": "{}"}
                    },
                    "timings": {"send": 0, "wait": 12, "receive": 0}
                }]
            }
        }));
    });
    let backend: Arc<dyn RecipeBackend> = Arc::new(backend(&server));
    let logger = Arc::new(MemoryLogger::new());
    let mut step = StepResult::new(
        TestStepResultReport {
            test_step_name: "add pet".into(),
            transaction_id: Some("tx-1".into()),
            ..Default::default()
        },
        "exec-7",
        backend.clone(),
        backend.auth().cloned(),
        logger.clone(),
    );

    let entry = step.detailed_log().cloned().unwrap();
    assert_eq!(step.detailed_log().cloned(), Some(entry.clone()));

    mock.assert_calls(1);
    assert!(logger.messages_at(LogLevel::Error).is_empty());
    assert_eq!(entry.response.unwrap().content.unwrap().size, Some(2));
}

#[test]
fn missing_transaction_log_is_not_found() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/v1/readyapi/executions/exec-7/transactions/tx-9");
        then.status(404).body("Not Found");
    });

    let err = backend(&server)
        .transaction_log("exec-7", "tx-9", None)
        .unwrap_err();

    assert!(err.is_not_found());
}

#[test]
fn step_result_fetches_log_once_over_http() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v1/readyapi/executions/exec-7/transactions/tx-1");
        then.status(404).body("Not Found");
    });
    let backend: Arc<dyn RecipeBackend> = Arc::new(backend(&server));
    let logger = Arc::new(MemoryLogger::new());
    let mut step = StepResult::new(
        TestStepResultReport {
            test_step_name: "list pets".into(),
            transaction_id: Some("tx-1".into()),
            ..Default::default()
        },
        "exec-7",
        backend.clone(),
        backend.auth().cloned(),
        logger.clone(),
    );

    assert!(step.detailed_log().is_none());
    assert!(step.detailed_log().is_none());

    mock.assert_calls(1);
    assert!(logger.contains(LogLevel::Info, "No transaction log available for execution exec-7"));
}

#[derive(Default)]
struct Counter {
    sent: AtomicUsize,
    finished: AtomicUsize,
    errors: AtomicUsize,
}

impl ExecutionListener for Counter {
    fn request_sent(&self, _report: &ProjectResultReport) {
        self.sent.fetch_add(1, Ordering::SeqCst);
    }

    fn execution_finished(&self, _report: &ProjectResultReport) {
        self.finished.fetch_add(1, Ordering::SeqCst);
    }

    fn error_occurred(&self, _error: &recipe_runner::backend::BackendError) {
        self.errors.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn listeners_are_notified_of_http_outcomes() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/v1/readyapi/executions")
            .query_param("async", "true");
        then.status(200)
            .json_body(json!({"executionId": "exec-7", "status": "RUNNING"}));
    });
    server.mock(|when, then| {
        when.method(POST)
            .path("/v1/readyapi/executions")
            .query_param("async", "false");
        then.status(500).body("boom");
    });
    server.mock(|when, then| {
        when.method(GET).path("/v1/readyapi/executions/exec-7/status");
        then.status(200).json_body(report_json("FINISHED"));
    });

    let backend = backend(&server);
    let counter = Arc::new(Counter::default());
    let listener: Arc<dyn ExecutionListener> = counter.clone();
    backend.add_execution_listener(listener.clone());
    assert_eq!(backend.listener_count(), 1);

    backend.submit(&recipe()).unwrap();
    assert!(backend.execute(&recipe()).is_err());
    backend.execution_status("exec-7").unwrap();

    backend.remove_execution_listener(&listener);
    assert_eq!(backend.listener_count(), 0);
    backend.submit(&recipe()).unwrap();

    assert_eq!(counter.sent.load(Ordering::SeqCst), 1);
    assert_eq!(counter.errors.load(Ordering::SeqCst), 1);
    assert_eq!(counter.finished.load(Ordering::SeqCst), 1);
}

#[test]
fn ids_with_reserved_characters_stay_in_their_segment() {
    let server = MockServer::start();
    let truncated = server.mock(|when, then| {
        when.method(GET).path("/v1/readyapi/executions/exec-7/status");
        then.status(200).json_body(report_json("FINISHED"));
    });

    let err = backend(&server)
        .execution_status("exec-7/status?x=1#")
        .unwrap_err();

    truncated.assert_calls(0);
    assert!(err.is_not_found());
}

#[test]
fn finished_is_reported_once_per_execution() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/readyapi/executions");
        then.status(200).json_body(report_json("FINISHED"));
    });
    let status = server.mock(|when, then| {
        when.method(GET).path("/v1/readyapi/executions/exec-7/status");
        then.status(200).json_body(report_json("FINISHED"));
    });

    let backend = backend(&server);
    let counter = Arc::new(Counter::default());
    backend.add_execution_listener(counter.clone());

    backend.execution_status("exec-7").unwrap();
    backend.execution_status("exec-7").unwrap();
    backend.execute(&recipe()).unwrap();
    backend.execution_status("exec-7").unwrap();

    status.assert_calls(3);
    assert_eq!(counter.finished.load(Ordering::SeqCst), 1);
}
