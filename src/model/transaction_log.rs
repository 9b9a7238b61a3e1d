//! HAR-style transaction logs.
//!
//! The server answers a transaction log lookup with a [`LogRoot`]. Any level
//! of the structure may be missing, so everything is optional or defaulted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogRoot {
    #[serde(default)]
    pub log: Option<TransactionLog>,
}

impl LogRoot {
    /// The first recorded entry, if the log has any.
    pub fn first_entry(&self) -> Option<&LogEntry> {
        self.log
            .as_ref()
            .and_then(|log| log.entries.as_ref())
            .and_then(|entries| entries.first())
    }

    /// Consume the root and return its first entry.
    pub fn into_first_entry(self) -> Option<LogEntry> {
        self.log
            .and_then(|log| log.entries)
            .and_then(|entries| entries.into_iter().next())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionLog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub entries: Option<Vec<LogEntry>>,
}

/// A detailed request/response record for one step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_date_time: Option<DateTime<Utc>>,

    /// Total elapsed time in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<LogRequest>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<LogResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRequest {
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub headers: Vec<LogHeader>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_data: Option<LogPostData>,
}

/// Body sent with a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogPostData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogResponse {
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub status_text: String,
    #[serde(default)]
    pub headers: Vec<LogHeader>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<LogContent>,
}

/// Body received with a response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogHeader {
    pub name: String,
    pub value: String,
}
