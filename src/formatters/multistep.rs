//! Multistep (scripted API) check results

use serde_json::Value;

use super::base::{
    DEFAULT_TRUNCATE_LEN, FormatterContext, Section, Severity, Tone, UNKNOWN,
    format_duration_value,
};
use super::metadata::{CheckMetadata, field_display, first_field};

pub(super) const SIGNATURE_KEYS: &[&str] = &["steps"];

const STEP_LIMIT: usize = 10;

pub(super) fn format(ctx: &FormatterContext, metadata: &CheckMetadata) -> String {
    let mut section = Section::new(ctx, "Multistep Check Results");

    let steps = metadata.array("steps").map(Vec::as_slice).unwrap_or_default();

    if !steps.is_empty() {
        let passed = steps
            .iter()
            .filter(|step| step_severity(step) == Some(Severity::Ok))
            .count();
        let failed = steps
            .iter()
            .filter(|step| step_severity(step) == Some(Severity::Critical))
            .count();
        let tone = if failed > 0 { Tone::Alert } else { Tone::Good };
        section.field(
            "Steps",
            &format!("{} ({} passed, {} failed)", steps.len(), passed, failed),
            tone,
        );
    } else {
        section.field("Steps", "0", Tone::Dim);
    }

    let total = metadata
        .get("total_duration")
        .or_else(|| metadata.get("duration"))
        .filter(|v| !v.is_null());
    if let Some(total) = total {
        section.field("Total Duration", &format_duration_value(total), Tone::Accent);
    }

    let (shown, hidden) = ctx.visible(steps, STEP_LIMIT);
    for (index, step) in shown.iter().enumerate() {
        let line = step_line(ctx, index + 1, step);
        section.item(&line);
        if let Some(error) = first_field(step, &["error", "error_message"]) {
            let error = section.clip(&error, DEFAULT_TRUNCATE_LEN);
            section.detail(&format!("Error: {}", error));
        }
    }
    section.more(hidden, "steps");

    if let Some(error) = metadata.display("error") {
        section.field("Error", &error, Tone::Alert);
    }

    section.finish()
}

fn step_severity(step: &Value) -> Option<Severity> {
    field_display(step, "status").map(|s| Severity::from_status(&s))
}

/// `1. Login [passed] 120ms`
fn step_line(ctx: &FormatterContext, position: usize, step: &Value) -> String {
    let name = first_field(step, &["name", "title", "url"])
        .unwrap_or_else(|| format!("Step {}", position));
    let mut line = format!("{}. {}", position, name);

    let status = field_display(step, "status").unwrap_or_else(|| UNKNOWN.to_string());
    let tone = step_severity(step).map(Severity::tone).unwrap_or(Tone::Value);
    line.push_str(&format!(" [{}]", ctx.paint(&status, tone)));

    if let Some(duration) = step.get("duration").filter(|v| !v.is_null()) {
        line.push_str(&format!(" {}", format_duration_value(duration)));
    }
    line
}
