//! Shared display helpers for executions and step results.

use std::io::{self, Write};

use console::style;

use crate::execution::{Execution, StepResult};
use crate::model::{AssertionStatus, ExecutionStatus, LogContent, LogEntry};

/// Print the execution header line.
pub fn write_execution_header(out: &mut dyn Write, execution: &Execution) -> io::Result<()> {
    let status = styled_status(execution.status());
    match execution.report().time_taken {
        Some(ms) => writeln!(out, "Execution {}: {} ({} ms)", execution.id(), status, ms),
        None => writeln!(out, "Execution {}: {}", execution.id(), status),
    }
}

/// Print one step's status line and its messages.
pub fn write_step(out: &mut dyn Write, step: &StepResult) -> io::Result<()> {
    let status = step.assertion_status();
    let icon = status.display_char().to_string();
    let icon = match status {
        AssertionStatus::Ok => style(icon).green(),
        AssertionStatus::Failed => style(icon).red(),
        AssertionStatus::Unknown => style(icon).yellow(),
    };
    writeln!(
        out,
        "  {} {} ({} ms)",
        icon,
        step.name(),
        step.report().time_taken
    )?;
    for message in step.messages() {
        writeln!(out, "      {}", style(message).dim())?;
    }
    Ok(())
}

/// Print a one-line summary of a transaction log entry.
pub fn write_log_summary(out: &mut dyn Write, entry: Option<&LogEntry>) -> io::Result<()> {
    let Some(entry) = entry else {
        return writeln!(out, "      {}", style("no transaction log").dim());
    };

    let request = entry
        .request
        .as_ref()
        .map(|r| format!("{} {}", r.method, r.url))
        .unwrap_or_else(|| "<no request>".to_string());
    let response = entry
        .response
        .as_ref()
        .map(|r| {
            let line = format!("{} {}", r.status, r.status_text).trim_end().to_string();
            match r.content.as_ref().and_then(content_summary) {
                Some(content) => format!("{} ({})", line, content),
                None => line,
            }
        })
        .unwrap_or_else(|| "<no response>".to_string());
    writeln!(out, "      {} -> {}", request, response)
}

fn content_summary(content: &LogContent) -> Option<String> {
    match (content.mime_type.as_deref(), content.size) {
        (Some(mime), Some(size)) if size >= 0 => Some(format!("{}, {} bytes", mime, size)),
        (Some(mime), _) => Some(mime.to_string()),
        (None, Some(size)) if size >= 0 => Some(format!("{} bytes", size)),
        _ => None,
    }
}

fn styled_status(status: ExecutionStatus) -> console::StyledObject<String> {
    let text = status.to_string();
    if status.is_failure() {
        style(text).red().bold()
    } else if status.is_terminal() {
        style(text).green().bold()
    } else {
        style(text).yellow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::logging::MemoryLogger;
    use crate::model::{LogRequest, LogResponse, ProjectResultReport, TestStepResultReport};
    use std::sync::Arc;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        console::strip_ansi_codes(&String::from_utf8(out).unwrap()).to_string()
    }

    #[test]
    fn header_includes_time_when_known() {
        let mut report = ProjectResultReport::new("exec-9", ExecutionStatus::Finished);
        report.time_taken = Some(250);
        let execution = Execution::new(
            report,
            Arc::new(MockBackend::new()),
            Arc::new(MemoryLogger::new()),
        );

        let text = render(|out| write_execution_header(out, &execution));
        assert_eq!(text, "Execution exec-9: FINISHED (250 ms)\n");
    }

    #[test]
    fn step_line_shows_icon_and_messages() {
        let step = StepResult::new(
            TestStepResultReport {
                test_step_name: "check body".into(),
                assertion_status: AssertionStatus::Failed,
                time_taken: 8,
                messages: vec!["expected 'ok'".into()],
                transaction_id: None,
            },
            "exec-9",
            Arc::new(MockBackend::new()),
            None,
            Arc::new(MemoryLogger::new()),
        );

        let text = render(|out| write_step(out, &step));
        assert!(text.contains("✗ check body (8 ms)"));
        assert!(text.contains("expected 'ok'"));
    }

    #[test]
    fn log_summary_shows_request_and_response() {
        let entry = LogEntry {
            request: Some(LogRequest {
                method: "POST".into(),
                url: "https://api.example/orders".into(),
                ..Default::default()
            }),
            response: Some(LogResponse {
                status: 201,
                status_text: "Created".into(),
                ..Default::default()
            }),
            ..Default::default()
        };

        let text = render(|out| write_log_summary(out, Some(&entry)));
        assert_eq!(text, "      POST https://api.example/orders -> 201 Created\n");
    }

    #[test]
    fn log_summary_includes_content_type_and_size() {
        let entry = LogEntry {
            response: Some(LogResponse {
                status: 200,
                status_text: "OK".into(),
                content: Some(LogContent {
                    size: Some(2),
                    mime_type: Some("application/json".into()),
                    text: Some("[]".into()),
                }),
                ..Default::default()
            }),
            ..Default::default()
        };

        let text = render(|out| write_log_summary(out, Some(&entry)));
        assert_eq!(text, "      <no request> -> 200 OK (application/json, 2 bytes)\n");
    }

    #[test]
    fn log_summary_without_entry() {
        let text = render(|out| write_log_summary(out, None));
        assert!(text.contains("no transaction log"));
    }
}
