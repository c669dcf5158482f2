//! Check result display models

use serde::Serialize;
use serde_json::Value;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::client::{CheckJob, CheckResult};
use crate::error::Result;
use crate::formatters::base::{
    NOT_AVAILABLE, NOT_SET, Section, Tone, format_duration, format_timestamp,
};
use crate::formatters::{CheckMetadata, Formatter, FormatterRegistry, Severity, generic};
use crate::output::{Formattable, json, table};

const NO_METADATA: &str = "No metadata available.";

/// One metadata entry for table output.
#[derive(Debug, Clone, PartialEq, Tabled, Serialize)]
pub struct MetadataRow {
    #[tabled(rename = "FIELD")]
    pub field: String,

    #[tabled(rename = "VALUE")]
    pub value: String,
}

/// Formatted check metadata.
///
/// Serializes as the selected check type plus the raw metadata; the
/// terminal renderings are computed once when the display is built.
#[derive(Debug, Clone, Serialize)]
pub struct CheckDisplay {
    pub check_type: Formatter,
    pub metadata: CheckMetadata,

    #[serde(skip)]
    pub text: String,

    #[serde(skip)]
    pub rows: Vec<MetadataRow>,

    /// Truncation note shown under the table when a value was shortened
    #[serde(skip)]
    pub table_note: Option<String>,
}

impl CheckDisplay {
    pub fn render(registry: &FormatterRegistry, metadata: CheckMetadata) -> Self {
        let check_type = registry.select(&metadata).unwrap_or(Formatter::Generic);
        let text = registry.format_metadata(&metadata);
        let (entries, clipped) = generic::entries(registry.context(), &metadata);
        let rows = entries
            .into_iter()
            .map(|(field, value)| MetadataRow { field, value })
            .collect();
        let table_note = clipped.then(|| registry.context().truncation_note());

        Self {
            check_type,
            metadata,
            text,
            rows,
            table_note,
        }
    }

    fn table(&self) -> String {
        let table = table::format_table(&self.rows, NO_METADATA);
        match &self.table_note {
            Some(note) => format!("{}{}", table, note),
            None => table,
        }
    }
}

impl Formattable for Vec<CheckDisplay> {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Pretty => Ok(join_blocks(self.iter().map(|c| c.text.clone()))),
            OutputFormat::Table => Ok(join_blocks(self.iter().map(CheckDisplay::table))),
            OutputFormat::Json => match self.as_slice() {
                [single] => Ok(json::format_json(single)?),
                many => Ok(json::format_json(many)?),
            },
        }
    }
}

/// Summary row for a check result.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ResultRow {
    #[tabled(rename = "RESULT ID")]
    pub id: String,
    #[tabled(rename = "STATUS")]
    pub status: String,
    #[tabled(rename = "CHECKED AT")]
    pub checked_at: String,
    #[tabled(rename = "RESPONSE TIME")]
    pub response_time: String,
    #[tabled(rename = "TYPE")]
    pub check_type: Formatter,
}

/// A fetched check result with its formatted metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ResultDisplay {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_at: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    #[serde(flatten)]
    pub check: CheckDisplay,

    #[serde(skip)]
    header: String,
}

impl ResultDisplay {
    pub fn render(registry: &FormatterRegistry, result: CheckResult) -> Self {
        let metadata = result.check_metadata();
        let check = CheckDisplay::render(registry, metadata);

        let mut section = Section::new(registry.context(), &format!("Check Result {}", result.id));
        if let Some(status) = &result.status {
            section.field("Status", status, Severity::from_status(status).tone());
        }
        if let Some(checked_at) = &result.checked_at {
            let when = format_timestamp(&Value::String(checked_at.clone()));
            section.field("Checked At", &when, Tone::Value);
        }
        if let Some(ms) = result.response_time {
            section.field("Response Time", &format_duration(ms), Tone::Accent);
        }
        if let Some(region) = &result.region {
            section.field("Region", region, Tone::Value);
        }
        if let Some(error) = &result.error_message {
            section.field("Error", error, Tone::Alert);
        }

        Self {
            id: result.id,
            status: result.status,
            checked_at: result.checked_at,
            response_time: result.response_time,
            region: result.region,
            error_message: result.error_message,
            check,
            header: section.finish(),
        }
    }

    fn row(&self) -> ResultRow {
        ResultRow {
            id: self.id.clone(),
            status: self.status.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            checked_at: self
                .checked_at
                .as_ref()
                .map(|t| format_timestamp(&Value::String(t.clone())))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            response_time: self
                .response_time
                .map(format_duration)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            check_type: self.check.check_type,
        }
    }

    fn pretty(&self) -> String {
        format!("{}\n\n{}", self.header, self.check.text)
    }

    fn table(&self) -> String {
        join_blocks([table::format_table(&[self.row()], ""), self.check.table()])
    }
}

impl Formattable for ResultDisplay {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Pretty => Ok(self.pretty()),
            OutputFormat::Table => Ok(self.table()),
            OutputFormat::Json => Ok(json::format_json(self)?),
        }
    }
}

/// Summary row for a check job.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct JobRow {
    #[tabled(rename = "JOB ID")]
    pub id: String,
    #[tabled(rename = "STATUS")]
    pub status: String,
    #[tabled(rename = "TYPE")]
    pub check_type: String,
    #[tabled(rename = "RESULTS")]
    pub results: usize,
}

/// A check job and the formatted results it produced.
#[derive(Debug, Clone, Serialize)]
pub struct JobDisplay {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    pub results: Vec<ResultDisplay>,

    #[serde(skip)]
    header: String,
}

impl JobDisplay {
    pub fn render(registry: &FormatterRegistry, job: CheckJob) -> Self {
        let mut section = Section::new(registry.context(), &format!("Check Job {}", job.id));
        if let Some(status) = &job.status {
            section.field("Status", status, job_tone(status));
        }
        if let Some(check_type) = &job.check_type {
            section.field("Check Type", check_type, Tone::Value);
        }
        for (label, when) in [("Created At", &job.created_at), ("Completed At", &job.completed_at)]
        {
            if let Some(when) = when {
                let when = format_timestamp(&Value::String(when.clone()));
                section.field(label, &when, Tone::Value);
            }
        }
        if let Some(error) = &job.error_message {
            section.field("Error", error, Tone::Alert);
        }
        if job.results.is_empty() {
            section.note("No results yet");
        } else {
            section.field("Results", &job.results.len().to_string(), Tone::Value);
        }

        let results = job
            .results
            .into_iter()
            .map(|result| ResultDisplay::render(registry, result))
            .collect();

        Self {
            id: job.id,
            status: job.status,
            check_type: job.check_type,
            created_at: job.created_at,
            completed_at: job.completed_at,
            error_message: job.error_message,
            results,
            header: section.finish(),
        }
    }

    fn row(&self) -> JobRow {
        JobRow {
            id: self.id.clone(),
            status: self.status.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            check_type: self.check_type.clone().unwrap_or_else(|| NOT_SET.to_string()),
            results: self.results.len(),
        }
    }
}

/// Pending and running jobs are not failures.
fn job_tone(status: &str) -> Tone {
    match status.trim().to_ascii_lowercase().as_str() {
        "pending" | "queued" | "running" => Tone::Accent,
        "completed" | "done" => Tone::Good,
        other => Severity::from_status(other).tone(),
    }
}

impl Formattable for JobDisplay {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Pretty => Ok(join_blocks(
                std::iter::once(self.header.clone()).chain(self.results.iter().map(|r| r.pretty())),
            )),
            OutputFormat::Table => Ok(join_blocks(
                std::iter::once(table::format_table(&[self.row()], ""))
                    .chain(self.results.iter().map(|r| r.table())),
            )),
            OutputFormat::Json => Ok(json::format_json(self)?),
        }
    }
}

fn join_blocks(blocks: impl IntoIterator<Item = String>) -> String {
    blocks.into_iter().collect::<Vec<_>>().join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatters::FormatterContext;
    use serde_json::json;

    fn registry() -> FormatterRegistry {
        FormatterRegistry::new(FormatterContext::new(false))
    }

    fn icmp_result() -> CheckResult {
        serde_json::from_value(json!({
            "id": "res-9",
            "status": "ok",
            "checked_at": "2026-03-01T10:15:00Z",
            "response_time": 42.4,
            "metadata": {"packet_loss": 0, "avg_rtt": 12.5, "host": "example.com"}
        }))
        .unwrap()
    }

    #[test]
    fn test_check_display_selects_formatter() {
        let display = CheckDisplay::render(
            &registry(),
            CheckMetadata::from(json!({"status_code": 200})),
        );

        assert_eq!(display.check_type, Formatter::Web);
        assert!(display.text.starts_with("Web Check Results:"));
        assert_eq!(display.rows[0].field, "status_code");
    }

    #[test]
    fn test_batch_pretty_separates_blocks() {
        let registry = registry();
        let batch = vec![
            CheckDisplay::render(&registry, CheckMetadata::from(json!({"avg_rtt": 1}))),
            CheckDisplay::render(&registry, CheckMetadata::from(json!({"nameservers": ["ns1"]}))),
        ];

        let out = batch.format(OutputFormat::Pretty).unwrap();

        assert!(out.starts_with("ICMP Ping Results:"));
        assert!(out.contains("\n\nDNS Query Results:"));
    }

    #[test]
    fn test_json_single_vs_batch() {
        let registry = registry();
        let one = vec![CheckDisplay::render(
            &registry,
            CheckMetadata::from(json!({"open_ports": [22]})),
        )];
        let parsed: Value =
            serde_json::from_str(&one.format(OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(parsed["data"]["check_type"], "portscan");
        assert_eq!(parsed["data"]["metadata"]["open_ports"], json!([22]));

        let two = vec![one[0].clone(), one[0].clone()];
        let parsed: Value =
            serde_json::from_str(&two.format(OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(parsed["data"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_table_lists_fields() {
        let batch = vec![CheckDisplay::render(
            &registry(),
            CheckMetadata::from(json!({"packet_loss": 25, "host": "h"})),
        )];

        let out = batch.format(OutputFormat::Table).unwrap();

        assert!(out.contains("FIELD"));
        assert!(out.contains("packet_loss"));
        assert!(out.contains("25"));
        assert!(!out.contains("Some details truncated"));
    }

    #[test]
    fn test_table_notes_clipped_values() {
        let metadata = CheckMetadata::from(json!({"payload": "p".repeat(150)}));
        let registry = FormatterRegistry::new(FormatterContext::new(false).with_result_id("res-3"));

        let out = vec![CheckDisplay::render(&registry, metadata.clone())]
            .format(OutputFormat::Table)
            .unwrap();
        assert!(out.contains("Some details truncated"));
        assert!(out.contains("pngr checks results --result-id res-3"));

        let verbose = FormatterRegistry::new(FormatterContext::new(true));
        let out = vec![CheckDisplay::render(&verbose, metadata)]
            .format(OutputFormat::Table)
            .unwrap();
        assert!(!out.contains("Some details truncated"));
    }

    #[test]
    fn test_empty_metadata_table() {
        let batch = vec![CheckDisplay::render(&registry(), CheckMetadata::default())];
        assert_eq!(batch.format(OutputFormat::Table).unwrap(), NO_METADATA);
    }

    #[test]
    fn test_result_pretty_has_header_and_metadata() {
        let display = ResultDisplay::render(&registry(), icmp_result());

        let out = display.format(OutputFormat::Pretty).unwrap();

        assert!(out.starts_with("Check Result res-9:"));
        assert!(out.contains("• Status: ok"));
        assert!(out.contains("• Checked At: 2026-03-01 10:15:00 UTC"));
        assert!(out.contains("• Response Time: 42ms"));
        assert!(out.contains("ICMP Ping Results:"));
    }

    #[test]
    fn test_result_json_flattens_check() {
        let display = ResultDisplay::render(&registry(), icmp_result());

        let parsed: Value =
            serde_json::from_str(&display.format(OutputFormat::Json).unwrap()).unwrap();

        assert_eq!(parsed["data"]["id"], "res-9");
        assert_eq!(parsed["data"]["check_type"], "icmp");
        assert_eq!(parsed["data"]["metadata"]["host"], "example.com");
        assert!(parsed["data"].get("text").is_none());
    }

    #[test]
    fn test_result_table() {
        let display = ResultDisplay::render(&registry(), icmp_result());

        let out = display.format(OutputFormat::Table).unwrap();

        assert!(out.contains("RESULT ID"));
        assert!(out.contains("res-9"));
        assert!(out.contains("icmp"));
        assert!(out.contains("avg_rtt"));
    }

    #[test]
    fn test_job_without_results() {
        let job = CheckJob {
            id: "job-3".to_string(),
            status: Some("running".to_string()),
            ..Default::default()
        };

        let out = JobDisplay::render(&registry(), job)
            .format(OutputFormat::Pretty)
            .unwrap();

        assert!(out.starts_with("Check Job job-3:"));
        assert!(out.contains("• Status: running"));
        assert!(out.contains("No results yet"));
    }

    #[test]
    fn test_job_renders_each_result() {
        let job = CheckJob {
            id: "job-4".to_string(),
            status: Some("completed".to_string()),
            check_type: Some("icmp".to_string()),
            results: vec![icmp_result(), icmp_result()],
            ..Default::default()
        };

        let display = JobDisplay::render(&registry(), job);
        let pretty = display.format(OutputFormat::Pretty).unwrap();
        assert_eq!(pretty.matches("ICMP Ping Results:").count(), 2);
        assert!(pretty.contains("• Results: 2"));

        let table = display.format(OutputFormat::Table).unwrap();
        assert!(table.contains("JOB ID"));
        assert!(table.contains("job-4"));
    }
}
