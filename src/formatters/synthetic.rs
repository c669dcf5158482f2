//! Synthetic (browser) check results

use serde_json::Value;

use super::base::{
    DEFAULT_TRUNCATE_LEN, FormatterContext, Section, Severity, Tone, format_duration_value,
    format_size,
};
use super::metadata::{
    CheckMetadata, field_display, first_field, value_as_f64, value_as_u64, value_to_display,
};

pub(super) const SIGNATURE_KEYS: &[&str] = &["console_logs", "screenshots", "network_requests"];

const LOG_LIMIT: usize = 5;
const FAILED_REQUEST_LIMIT: usize = 5;
const ERROR_LIMIT: usize = 5;

pub(super) fn format(ctx: &FormatterContext, metadata: &CheckMetadata) -> String {
    let mut section = Section::new(ctx, "Synthetic Check Results");

    if let Some(status) = metadata.display("status") {
        let tone = Severity::from_status(&status).tone();
        section.field("Status", &status, tone);
    }
    if let Some(browser) = metadata.display("browser") {
        section.field("Browser", &browser, Tone::Value);
    }

    let execution = metadata
        .get("execution_time")
        .or_else(|| metadata.get("duration"))
        .filter(|v| !v.is_null());
    if let Some(execution) = execution {
        section.field("Execution Time", &format_duration_value(execution), Tone::Accent);
    }

    if let Some(logs) = metadata.array("console_logs").filter(|l| !l.is_empty()) {
        section.field("Console Logs", &logs.len().to_string(), Tone::Value);
        let (shown, hidden) = ctx.visible(logs, LOG_LIMIT);
        for entry in shown {
            let line = log_line(entry);
            let line = section.clip(&line, DEFAULT_TRUNCATE_LEN);
            section.item(&line);
        }
        section.more(hidden, "log entries");
    }

    if let Some(shots) = metadata.array("screenshots") {
        section.field("Screenshots", &shots.len().to_string(), Tone::Value);
    }

    if let Some(requests) = metadata.array("network_requests").filter(|r| !r.is_empty()) {
        let total_bytes: u64 = requests
            .iter()
            .filter_map(|r| {
                r.get("size")
                    .or_else(|| r.get("transfer_size"))
                    .and_then(value_as_u64)
            })
            .fold(0u64, u64::saturating_add);
        section.field(
            "Network Requests",
            &format!("{} ({} transferred)", requests.len(), format_size(total_bytes)),
            Tone::Value,
        );

        let failed: Vec<&Value> = requests.iter().filter(|r| request_failed(r)).collect();
        if !failed.is_empty() {
            section.field("Failed Requests", &failed.len().to_string(), Tone::Alert);
            let (shown, hidden) = ctx.visible(&failed, FAILED_REQUEST_LIMIT);
            for request in shown {
                let line = request_line(request);
                let line = section.clip(&line, DEFAULT_TRUNCATE_LEN);
                section.item(&line);
            }
            section.more(hidden, "failed requests");
        }
    }

    if let Some(errors) = metadata.array("errors").filter(|e| !e.is_empty()) {
        section.field("Errors", &errors.len().to_string(), Tone::Alert);
        let (shown, hidden) = ctx.visible(errors, ERROR_LIMIT);
        for error in shown {
            let text = section.clip(&value_to_display(error), DEFAULT_TRUNCATE_LEN);
            section.item(&text);
        }
        section.more(hidden, "errors");
    } else if let Some(error) = metadata.display("error") {
        section.field("Error", &error, Tone::Alert);
    }

    section.finish()
}

/// `[level] message`; bare strings are shown as-is.
fn log_line(entry: &Value) -> String {
    if !entry.is_object() {
        return value_to_display(entry);
    }
    let message = first_field(entry, &["text", "message"]).unwrap_or_default();
    match first_field(entry, &["level", "type"]) {
        Some(level) => format!("[{}] {}", level, message),
        None => message,
    }
}

fn request_failed(request: &Value) -> bool {
    if request.get("failed").and_then(Value::as_bool) == Some(true) {
        return true;
    }
    request
        .get("status")
        .and_then(value_as_f64)
        .is_some_and(|status| status >= 400.0)
}

/// `404 GET https://cdn.example/app.js`
fn request_line(request: &Value) -> String {
    let status = field_display(request, "status").unwrap_or_else(|| "failed".to_string());
    let url = field_display(request, "url").unwrap_or_default();
    match field_display(request, "method") {
        Some(method) => format!("{} {} {}", status, method, url),
        None => format!("{} {}", status, url),
    }
}
