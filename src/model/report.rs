//! Execution results reported by the server.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a backend execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStatus {
    Initialized,
    Pending,
    Running,
    Canceled,
    Finished,
    Failed,
    #[serde(other)]
    Unknown,
}

impl ExecutionStatus {
    /// Check if this is a terminal state (no more changes expected).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ExecutionStatus::Canceled | ExecutionStatus::Finished | ExecutionStatus::Failed
        )
    }

    /// Check if the execution ended unsuccessfully.
    pub fn is_failure(&self) -> bool {
        matches!(self, ExecutionStatus::Canceled | ExecutionStatus::Failed)
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExecutionStatus::Initialized => "INITIALIZED",
            ExecutionStatus::Pending => "PENDING",
            ExecutionStatus::Running => "RUNNING",
            ExecutionStatus::Canceled => "CANCELED",
            ExecutionStatus::Finished => "FINISHED",
            ExecutionStatus::Failed => "FAILED",
            ExecutionStatus::Unknown => "UNKNOWN",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of the assertions of a single step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssertionStatus {
    Ok,
    Failed,
    #[default]
    #[serde(other)]
    Unknown,
}

impl AssertionStatus {
    /// Get a display character for this status.
    pub fn display_char(&self) -> char {
        match self {
            AssertionStatus::Ok => '✓',
            AssertionStatus::Failed => '✗',
            AssertionStatus::Unknown => '?',
        }
    }
}

/// Top-level report for one execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResultReport {
    /// Backend identifier of the execution.
    pub execution_id: String,

    /// Current status.
    pub status: ExecutionStatus,

    /// Total time taken in milliseconds, once known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_taken: Option<u64>,

    #[serde(default)]
    pub test_suite_result_reports: Vec<TestSuiteResultReport>,
}

impl ProjectResultReport {
    /// Create a report with no results yet.
    pub fn new(execution_id: impl Into<String>, status: ExecutionStatus) -> Self {
        Self {
            execution_id: execution_id.into(),
            status,
            time_taken: None,
            test_suite_result_reports: Vec::new(),
        }
    }

    /// Iterate over every step report, in suite/case/step order.
    pub fn step_reports(&self) -> impl Iterator<Item = &TestStepResultReport> {
        self.test_suite_result_reports
            .iter()
            .flat_map(|suite| suite.test_case_result_reports.iter())
            .flat_map(|case| case.test_step_result_reports.iter())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSuiteResultReport {
    #[serde(default)]
    pub test_suite_name: String,
    #[serde(default)]
    pub test_case_result_reports: Vec<TestCaseResultReport>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseResultReport {
    #[serde(default)]
    pub test_case_name: String,
    #[serde(default)]
    pub test_case_status: AssertionStatus,
    #[serde(default)]
    pub test_step_result_reports: Vec<TestStepResultReport>,
}

/// Result of a single executed step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestStepResultReport {
    #[serde(default)]
    pub test_step_name: String,

    #[serde(default)]
    pub assertion_status: AssertionStatus,

    /// Time taken in milliseconds.
    #[serde(default)]
    pub time_taken: u64,

    /// Assertion and error messages.
    #[serde(default)]
    pub messages: Vec<String>,

    /// Key of the detailed transaction log for this step, if one was recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}
