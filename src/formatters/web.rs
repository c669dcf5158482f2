//! HTTP(S) endpoint check results

use super::base::{
    DEFAULT_TRUNCATE_LEN, FormatterContext, Section, Severity, Tone, format_duration_value,
    format_size,
};
use super::metadata::{CheckMetadata, value_to_display};

pub(super) const SIGNATURE_KEYS: &[&str] = &["status_code", "response_headers"];

const HEADER_LIMIT: usize = 10;
const REDIRECT_LIMIT: usize = 5;
const BODY_PREVIEW_LEN: usize = 200;

/// Severity tier for an HTTP status code.
pub fn status_code_severity(code: u64) -> Severity {
    match code {
        200..=399 => Severity::Ok,
        400..=499 => Severity::Warning,
        _ => Severity::Critical,
    }
}

pub(super) fn format(ctx: &FormatterContext, metadata: &CheckMetadata) -> String {
    let mut section = Section::new(ctx, "Web Check Results");

    if let Some(url) = metadata.display("url") {
        let method = metadata.str("method").unwrap_or("GET");
        section.field("Request", &format!("{} {}", method, url), Tone::Value);
    }

    if let Some(status) = metadata.get("status_code").filter(|v| !v.is_null()) {
        let tone = metadata
            .u64("status_code")
            .map(|code| status_code_severity(code).tone())
            .unwrap_or(Tone::Value);
        section.field("Status Code", &value_to_display(status), tone);
    }

    if let Some(time) = metadata.get("response_time").filter(|v| !v.is_null()) {
        section.field("Response Time", &format_duration_value(time), Tone::Accent);
    }

    let size = metadata
        .u64("content_length")
        .or_else(|| metadata.u64("response_size"));
    if let Some(size) = size {
        section.field("Response Size", &format_size(size), Tone::Value);
    }

    if let Some(content_type) = metadata.display("content_type") {
        section.field("Content Type", &content_type, Tone::Value);
    }

    if let Some(final_url) = metadata.display("final_url") {
        section.field("Final URL", &final_url, Tone::Value);
    }

    if let Some(redirects) = metadata.array("redirects").filter(|r| !r.is_empty()) {
        section.field("Redirects", &redirects.len().to_string(), Tone::Accent);
        let (shown, hidden) = ctx.visible(redirects, REDIRECT_LIMIT);
        for hop in shown {
            section.item(&value_to_display(hop));
        }
        section.more(hidden, "redirects");
    } else if let Some(count) = metadata.u64("redirect_count").filter(|c| *c > 0) {
        section.field("Redirects", &count.to_string(), Tone::Accent);
    }

    if let Some(headers) = metadata.object("response_headers").filter(|h| !h.is_empty()) {
        section.field("Response Headers", &headers.len().to_string(), Tone::Value);
        let entries: Vec<_> = headers.iter().collect();
        let (shown, hidden) = ctx.visible(&entries, HEADER_LIMIT);
        for (name, value) in shown {
            let value = section.clip(&value_to_display(value), DEFAULT_TRUNCATE_LEN);
            section.item(&format!("{}: {}", name, value));
        }
        section.more(hidden, "headers");
    }

    let body = metadata
        .display("response_body")
        .or_else(|| metadata.display("body"));
    if let Some(body) = body.filter(|b| !b.trim().is_empty()) {
        let preview = section.clip(body.trim(), BODY_PREVIEW_LEN);
        section.field("Body", &preview, Tone::Dim);
    }

    if let Some(error) = metadata.display("error") {
        section.field("Error", &error, Tone::Alert);
    }

    section.finish()
}
