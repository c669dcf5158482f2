//! Shared formatter context and rendering helpers
//!
//! Every check-type formatter builds its output through [`Section`], which
//! takes care of headings, bullet layout, styling and the "see more" hint
//! appended when data was elided outside verbose mode.

use chrono::{DateTime, NaiveDateTime, Utc};
use colored::Colorize;
use serde_json::Value;

use super::metadata::{value_as_f64, value_to_display};

/// Default character limit for [`truncate_text`].
pub const DEFAULT_TRUNCATE_LEN: usize = 100;

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// Placeholder for optional settings that were never provided.
pub const NOT_SET: &str = "Not set";

/// Placeholder for values the check did not report.
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for values that could not be classified.
pub const UNKNOWN: &str = "Unknown";

/// Default base URL of the web application used in truncation hints.
pub const DEFAULT_APP_URL: &str = "https://app.pingera.ru";

/// Binary name used in truncation hints.
const CLI_NAME: &str = "pngr";

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Per-invocation formatter configuration.
///
/// Built once from the command line and shared by every formatter in a
/// registry; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatterContext {
    /// Show full lists and untruncated values
    pub verbose: bool,
    /// Job the results belong to, used for "see more" hints
    pub job_id: Option<String>,
    /// Result being rendered, used for "see more" hints
    pub result_id: Option<String>,
    /// Emit terminal styling
    pub color: bool,
    /// Base URL of the web application
    pub app_url: String,
}

impl Default for FormatterContext {
    fn default() -> Self {
        Self {
            verbose: false,
            job_id: None,
            result_id: None,
            color: false,
            app_url: DEFAULT_APP_URL.to_string(),
        }
    }
}

impl FormatterContext {
    /// Plain (uncolored) context with the given verbosity.
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            ..Self::default()
        }
    }

    pub fn with_job_id(mut self, job_id: impl Into<String>) -> Self {
        self.job_id = Some(job_id.into());
        self
    }

    pub fn with_result_id(mut self, result_id: impl Into<String>) -> Self {
        self.result_id = Some(result_id.into());
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_app_url(mut self, app_url: impl Into<String>) -> Self {
        self.app_url = app_url.into();
        self
    }

    /// Apply a tone to text when styling is enabled.
    pub fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.color {
            return text.to_string();
        }

        match tone {
            Tone::Heading => text.cyan().bold().to_string(),
            Tone::Value => text.white().to_string(),
            Tone::Dim => text.dimmed().to_string(),
            Tone::Good => text.green().to_string(),
            Tone::Accent => text.yellow().to_string(),
            Tone::Alert => text.red().to_string(),
        }
    }

    /// Split a list into the part to display and the number of hidden items.
    ///
    /// Verbose mode always shows everything.
    pub fn visible<'a, T>(&self, items: &'a [T], limit: usize) -> (&'a [T], usize) {
        if self.verbose || items.len() <= limit {
            (items, 0)
        } else {
            (&items[..limit], items.len() - limit)
        }
    }

    /// Hint telling the user how to get the untruncated result.
    pub fn truncation_note(&self) -> String {
        let app_url = self.app_url.trim_end_matches('/');
        let header = "💡 Some details truncated.";

        let (url, command) = if let Some(result_id) = &self.result_id {
            (
                format!("{}/checks/results/{}", app_url, result_id),
                format!("{} checks results --result-id {}", CLI_NAME, result_id),
            )
        } else if let Some(job_id) = &self.job_id {
            (
                format!("{}/checks/jobs/{}", app_url, job_id),
                format!("{} checks jobs status {} --verbose", CLI_NAME, job_id),
            )
        } else {
            return format!(
                "\n\n{}",
                self.paint(
                    &format!("{} Use --verbose flag for full results.", header),
                    Tone::Dim
                )
            );
        };

        format!(
            "\n\n{}\n{}\n{}{}",
            self.paint(
                &format!(
                    "{} Use --verbose flag or view full results at:",
                    header
                ),
                Tone::Dim
            ),
            self.paint(&format!("   {}", url), Tone::Dim),
            self.paint("   Or run: ", Tone::Dim),
            self.paint(&command, Tone::Value),
        )
    }
}

/// Visual role of a piece of output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Heading,
    Value,
    Dim,
    Good,
    Accent,
    Alert,
}

/// Three-tier health classification shared by check types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Ok,
    Warning,
    Critical,
}

impl Severity {
    pub fn tone(self) -> Tone {
        match self {
            Severity::Ok => Tone::Good,
            Severity::Warning => Tone::Accent,
            Severity::Critical => Tone::Alert,
        }
    }

    /// Classify a free-form step/check status string.
    pub fn from_status(status: &str) -> Self {
        match status.trim().to_ascii_lowercase().as_str() {
            "success" | "succeeded" | "passed" | "pass" | "ok" | "up" => Severity::Ok,
            "skipped" | "warning" | "degraded" => Severity::Warning,
            _ => Severity::Critical,
        }
    }
}

/// Output builder for one formatted check result.
pub struct Section<'a> {
    ctx: &'a FormatterContext,
    out: String,
    truncated: bool,
}

impl<'a> Section<'a> {
    pub fn new(ctx: &'a FormatterContext, title: &str) -> Self {
        Self {
            ctx,
            out: ctx.paint(&format!("{}:", title), Tone::Heading),
            truncated: false,
        }
    }

    /// `• Label: value`
    pub fn field(&mut self, label: &str, value: &str, tone: Tone) {
        let value = self.ctx.paint(value, tone);
        self.out.push_str(&format!("\n• {}: {}", label, value));
    }

    /// Nested bullet; `text` may already carry styling.
    pub fn item(&mut self, text: &str) {
        self.out.push_str(&format!("\n  • {}", text));
    }

    /// Indented continuation line under an item.
    pub fn detail(&mut self, text: &str) {
        self.out
            .push_str(&format!("\n    {}", self.ctx.paint(text, Tone::Dim)));
    }

    /// Top-level dimmed line.
    pub fn note(&mut self, text: &str) {
        self.out
            .push_str(&format!("\n• {}", self.ctx.paint(text, Tone::Dim)));
    }

    /// Report items hidden by [`FormatterContext::visible`].
    pub fn more(&mut self, hidden: usize, noun: &str) {
        if hidden == 0 {
            return;
        }
        let text = format!("... and {} more {}", hidden, noun);
        self.out
            .push_str(&format!("\n  {}", self.ctx.paint(&text, Tone::Dim)));
        self.truncated = true;
    }

    /// Truncate text outside verbose mode, remembering that data was elided.
    pub fn clip(&mut self, text: &str, max_len: usize) -> String {
        if self.ctx.verbose {
            return text.to_string();
        }
        if text.chars().count() > max_len {
            self.truncated = true;
        }
        truncate_text(text, max_len)
    }

    /// Finish the section, appending the truncation note when needed.
    pub fn finish(mut self) -> String {
        if self.truncated && !self.ctx.verbose {
            self.out.push_str(&self.ctx.truncation_note());
        }
        self.out
    }
}

/// Shorten text to `max_len` characters followed by [`ELLIPSIS`].
///
/// Counts characters, not bytes, so multi-byte text is never split.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        Some((idx, _)) => format!("{}{}", &text[..idx], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Render a byte count with binary unit scaling.
pub fn format_size(bytes: u64) -> String {
    if bytes >= MIB {
        format!("{:.1}MB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1}KB", bytes as f64 / KIB as f64)
    } else if bytes > 0 {
        format!("{}B", bytes)
    } else {
        "0B".to_string()
    }
}

/// Render milliseconds without decimals.
pub fn format_duration(ms: f64) -> String {
    if ms > 0.0 {
        format!("{:.0}ms", ms)
    } else {
        "0ms".to_string()
    }
}

/// Render a millisecond field, falling back to the raw value when it is not
/// numeric.
pub fn format_duration_value(value: &Value) -> String {
    match value_as_f64(value) {
        Some(ms) => format_duration(ms),
        None => value_to_display(value),
    }
}

/// Render a timestamp-like value as `YYYY-MM-DD HH:MM:SS UTC`.
///
/// Accepts RFC 3339 strings, naive ISO date-times and Unix epochs in seconds
/// or milliseconds. Anything else is returned in its raw string form.
pub fn format_timestamp(value: &Value) -> String {
    const OUTPUT: &str = "%Y-%m-%d %H:%M:%S UTC";

    let parsed = match value {
        Value::String(s) => parse_timestamp_str(s.trim()),
        Value::Number(n) => n.as_i64().and_then(epoch_to_datetime),
        _ => None,
    };

    match parsed {
        Some(dt) => dt.format(OUTPUT).to_string(),
        None => value_to_display(value),
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, pattern) {
            return Some(naive.and_utc());
        }
    }

    s.parse::<i64>().ok().and_then(epoch_to_datetime)
}

fn epoch_to_datetime(epoch: i64) -> Option<DateTime<Utc>> {
    // Anything past year 5138 in seconds is treated as milliseconds
    if epoch.abs() >= 100_000_000_000 {
        DateTime::from_timestamp_millis(epoch)
    } else {
        DateTime::from_timestamp(epoch, 0)
    }
}
