//! Port scan results

use serde_json::Value;

use super::base::{FormatterContext, Section, Tone, format_duration_value};
use super::metadata::{CheckMetadata, field_display, first_field, value_to_display};

pub(super) const SIGNATURE_KEYS: &[&str] = &["open_ports", "ports_scanned"];

const PORT_LIMIT: usize = 10;

pub(super) fn format(ctx: &FormatterContext, metadata: &CheckMetadata) -> String {
    let mut section = Section::new(ctx, "Port Scan Results");

    if let Some(host) = metadata.display("host").or_else(|| metadata.display("target")) {
        section.field("Host", &host, Tone::Value);
    }

    if let Some(scanned) = metadata.get("ports_scanned").and_then(count) {
        section.field("Ports Scanned", &scanned, Tone::Value);
    }

    match metadata.get("open_ports") {
        Some(Value::Array(ports)) if !ports.is_empty() => {
            section.field("Open Ports", &ports.len().to_string(), Tone::Accent);
            let (shown, hidden) = ctx.visible(ports, PORT_LIMIT);
            for port in shown {
                section.item(&port_line(port));
            }
            section.more(hidden, "open ports");
        }
        Some(Value::Array(_)) => section.field("Open Ports", "none", Tone::Good),
        Some(other) if !other.is_null() => {
            section.field("Open Ports", &value_to_display(other), Tone::Value)
        }
        _ => {}
    }

    if let Some(closed) = metadata.get("closed_ports").and_then(count) {
        section.field("Closed Ports", &closed, Tone::Value);
    }
    if let Some(filtered) = metadata.get("filtered_ports").and_then(count) {
        section.field("Filtered Ports", &filtered, Tone::Dim);
    }

    let duration = metadata
        .get("scan_duration")
        .or_else(|| metadata.get("duration"))
        .filter(|v| !v.is_null());
    if let Some(duration) = duration {
        section.field("Scan Duration", &format_duration_value(duration), Tone::Accent);
    }

    section.finish()
}

/// Lists count as their length; scalars are shown as reported.
fn count(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Array(items) => Some(items.len().to_string()),
        other => Some(value_to_display(other)),
    }
}

/// `443/tcp https (open)` from either a bare port number or a port record.
fn port_line(port: &Value) -> String {
    if !port.is_object() {
        return value_to_display(port);
    }

    let number = field_display(port, "port").unwrap_or_else(|| "?".to_string());
    let mut line = match field_display(port, "protocol") {
        Some(protocol) => format!("{}/{}", number, protocol),
        None => number,
    };
    if let Some(service) = first_field(port, &["service", "name"]) {
        line.push_str(&format!(" {}", service));
    }
    if let Some(state) = field_display(port, "state") {
        line.push_str(&format!(" ({})", state));
    }
    line
}
