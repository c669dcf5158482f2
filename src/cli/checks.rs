//! Check result command implementations

use std::io::Read;

use log::debug;
use serde_json::Value;

use crate::cli::{CommandContext, GlobalOptions};
use crate::client::ChecksApi;
use crate::error::{Error, Result};
use crate::formatters::{CheckMetadata, FormatterRegistry};
use crate::models::{CheckDisplay, JobDisplay, ResultDisplay};
use crate::output;

/// Run `checks format`: render metadata read from a file or stdin.
pub fn format(
    opts: &GlobalOptions,
    file: Option<&str>,
    job_id: Option<&str>,
    result_id: Option<&str>,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let input = read_input(file)?;

    let registry = ctx.registry(|mut c| {
        c.job_id = job_id.map(str::to_string);
        c.result_id = result_id.map(str::to_string);
        c
    });
    let displays = format_document(&registry, &input)?;

    output::print(&displays, ctx.format)
}

/// Run `checks results --result-id ID`.
pub async fn results(opts: &GlobalOptions, result_id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let client = ctx.client()?;
    let registry = ctx.registry(|c| c.with_result_id(result_id));

    let display = fetch_result(&client, &registry, result_id).await?;

    output::print(&display, ctx.format)
}

/// Run `checks jobs status JOB_ID`.
pub async fn job_status(opts: &GlobalOptions, job_id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let client = ctx.client()?;
    let registry = ctx.registry(|c| c.with_job_id(job_id));

    let display = fetch_job(&client, &registry, job_id).await?;

    output::print(&display, ctx.format)
}

/// Parse a JSON document into one display per metadata mapping.
///
/// An array is a batch; anything else is a single mapping.
pub fn format_document(registry: &FormatterRegistry, input: &str) -> Result<Vec<CheckDisplay>> {
    let value: Value = serde_json::from_str(input)?;
    let items = match value {
        Value::Array(items) => items,
        other => vec![other],
    };
    debug!("Formatting {} metadata document(s)", items.len());

    Ok(items
        .into_iter()
        .map(|item| CheckDisplay::render(registry, CheckMetadata::from(item)))
        .collect())
}

pub async fn fetch_result<C: ChecksApi + ?Sized>(
    client: &C,
    registry: &FormatterRegistry,
    result_id: &str,
) -> Result<ResultDisplay> {
    let spinner = output::spinner(&format!("Fetching check result {}...", result_id));
    let result = client.get_result(result_id).await;
    spinner.finish_and_clear();

    Ok(ResultDisplay::render(registry, result?))
}

pub async fn fetch_job<C: ChecksApi + ?Sized>(
    client: &C,
    registry: &FormatterRegistry,
    job_id: &str,
) -> Result<JobDisplay> {
    let spinner = output::spinner(&format!("Fetching check job {}...", job_id));
    let job = client.get_job(job_id).await;
    spinner.finish_and_clear();

    Ok(JobDisplay::render(registry, job?))
}

fn read_input(file: Option<&str>) -> Result<String> {
    match file {
        None | Some("-") => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| Error::Other(format!("Failed to read {}: {}", path, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::client::{CheckJob, CheckResult, MockChecksClient};
    use crate::error::ApiError;
    use crate::formatters::{Formatter, FormatterContext};
    use crate::output::Formattable;
    use serde_json::json;

    fn registry() -> FormatterRegistry {
        FormatterRegistry::new(FormatterContext::new(false))
    }

    #[test]
    fn test_format_document_object() {
        let displays = format_document(&registry(), r#"{"packet_loss": 0, "avg_rtt": 5}"#).unwrap();

        assert_eq!(displays.len(), 1);
        assert_eq!(displays[0].check_type, Formatter::Icmp);
    }

    #[test]
    fn test_format_document_batch_shares_registry() {
        let input = r#"[{"status_code": 404}, {"records": []}, {"anything": 1}]"#;

        let displays = format_document(&registry(), input).unwrap();

        let types: Vec<Formatter> = displays.iter().map(|d| d.check_type).collect();
        assert_eq!(types, vec![Formatter::Web, Formatter::Dns, Formatter::Generic]);
    }

    #[test]
    fn test_format_document_invalid_json() {
        let err = format_document(&registry(), "{not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_format_document_scalar_still_renders() {
        let displays = format_document(&registry(), "42").unwrap();

        assert_eq!(displays[0].check_type, Formatter::Generic);
        assert!(displays[0].text.contains("• value: 42"));
    }

    #[test]
    fn test_truncation_hint_uses_job_id() {
        let registry = FormatterRegistry::new(FormatterContext::new(false).with_job_id("job-77"));
        let ports: Vec<u64> = (1..=15).collect();
        let input = json!({ "open_ports": ports }).to_string();

        let displays = format_document(&registry, &input).unwrap();

        assert!(displays[0].text.contains("pngr checks jobs status job-77 --verbose"));
    }

    #[tokio::test]
    async fn test_fetch_result_renders_metadata() {
        let mock = MockChecksClient::new()
            .with_result(CheckResult {
                id: "res-1".to_string(),
                status: Some("ok".to_string()),
                metadata: json!({"certificate": {"issuer": {"CN": "Test CA"}}, "days_until_expiry": 90})
                    .as_object()
                    .cloned()
                    .unwrap_or_default(),
                ..Default::default()
            })
            .await;
        let registry = FormatterRegistry::new(FormatterContext::new(false).with_result_id("res-1"));

        let display = fetch_result(&mock, &registry, "res-1").await.unwrap();
        let out = display.format(OutputFormat::Pretty).unwrap();

        assert_eq!(display.check.check_type, Formatter::Ssl);
        assert!(out.contains("Check Result res-1:"));
        assert!(out.contains("SSL Certificate Results:"));
        assert_eq!(mock.requests().await, vec!["res-1".to_string()]);
    }

    #[tokio::test]
    async fn test_fetch_result_error_propagates() {
        let mock = MockChecksClient::new()
            .with_error(ApiError::Unauthorized)
            .await;

        let err = fetch_result(&mock, &registry(), "res-1").await.unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_fetch_job_formats_each_result() {
        let results = vec![
            serde_json::from_value::<CheckResult>(
                json!({"id": "r1", "metadata": {"open_ports": [22, 80], "ports_scanned": 1000}}),
            )
            .unwrap(),
            serde_json::from_value::<CheckResult>(json!({"id": "r2"})).unwrap(),
        ];
        let mock = MockChecksClient::new()
            .with_job(CheckJob {
                id: "job-1".to_string(),
                status: Some("completed".to_string()),
                results,
                ..Default::default()
            })
            .await;

        let display = fetch_job(&mock, &registry(), "job-1").await.unwrap();

        assert_eq!(display.results.len(), 2);
        assert_eq!(display.results[0].check.check_type, Formatter::PortScan);
        assert_eq!(display.results[1].check.check_type, Formatter::Generic);
    }

    #[tokio::test]
    async fn test_fetch_job_not_found() {
        let mock = MockChecksClient::new();

        let err = fetch_job(&mock, &registry(), "missing").await.unwrap_err();

        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input(Some("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
