//! DNS lookup results

use serde_json::Value;

use super::base::{
    FormatterContext, NOT_AVAILABLE, Section, Tone, UNKNOWN, format_duration_value,
};
use super::metadata::{CheckMetadata, field_display, value_to_display};

pub(super) const SIGNATURE_KEYS: &[&str] = &["records", "nameservers"];

const RECORD_LIMIT: usize = 5;

pub(super) fn format(ctx: &FormatterContext, metadata: &CheckMetadata) -> String {
    let mut section = Section::new(ctx, "DNS Query Results");

    if let Some(query_type) = metadata.display("query_type") {
        section.field("Query Type", &query_type, Tone::Value);
    }
    if let Some(domain) = metadata.display("domain") {
        section.field("Domain", &domain, Tone::Value);
    }

    if let Some(records) = metadata.array("records").filter(|r| !r.is_empty()) {
        section.field("Records Found", &records.len().to_string(), Tone::Good);

        let (shown, hidden) = ctx.visible(records, RECORD_LIMIT);
        for record in shown {
            section.item(&record_line(record));
        }
        section.more(hidden, "records");
    }

    if let Some(nameservers) = metadata.get("nameservers").and_then(nameserver_list) {
        section.field("Nameservers", &nameservers, Tone::Value);
    }

    if let Some(query_time) = metadata.get("query_time").filter(|v| !v.is_null()) {
        section.field("Query Time", &format_duration_value(query_time), Tone::Accent);
    }

    section.finish()
}

/// `[TYPE] value`; bare string records have no type.
fn record_line(record: &Value) -> String {
    if record.is_object() {
        let record_type = field_display(record, "type").unwrap_or_else(|| UNKNOWN.to_string());
        let value = field_display(record, "value")
            .or_else(|| field_display(record, "data"))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        format!("[{}] {}", record_type, value)
    } else {
        format!("[{}] {}", UNKNOWN, value_to_display(record))
    }
}

fn nameserver_list(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) if !items.is_empty() => Some(
            items
                .iter()
                .map(value_to_display)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}
