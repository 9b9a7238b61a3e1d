//! Wire types exchanged with the execution backend.
//!
//! - [`test_case`] - TestCases and the Recipes built from them
//! - [`report`] - Execution results reported by the server
//! - [`transaction_log`] - HAR-style transaction logs for individual steps
//!
//! All types serialize with camelCase field names and tolerate missing
//! optional fields.

pub mod report;
pub mod test_case;
pub mod transaction_log;

pub use report::{
    AssertionStatus, ExecutionStatus, ProjectResultReport, TestCaseResultReport,
    TestStepResultReport, TestSuiteResultReport,
};
pub use test_case::{Recipe, TestCase, TestStep};
pub use transaction_log::{
    LogContent, LogEntry, LogHeader, LogPostData, LogRequest, LogResponse, LogRoot,
    TransactionLog,
};
