//! TLS certificate check results

use serde_json::{Map, Value};

use super::base::{FormatterContext, Section, Severity, Tone, UNKNOWN, format_timestamp};
use super::metadata::{CheckMetadata, value_as_f64, value_to_display};

pub(super) const SIGNATURE_KEYS: &[&str] = &["certificate", "days_until_expiry"];

const SAN_LIMIT: usize = 5;

/// Severity tier for the remaining certificate lifetime.
pub fn expiry_severity(days: f64) -> Severity {
    if days > 30.0 {
        Severity::Ok
    } else if days > 7.0 {
        Severity::Warning
    } else {
        Severity::Critical
    }
}

/// Certificate fields may be nested under `certificate` or sit at the top
/// level; the nested object wins.
struct CertView<'a> {
    cert: Option<&'a Map<String, Value>>,
    metadata: &'a CheckMetadata,
}

impl<'a> CertView<'a> {
    fn get(&self, key: &str) -> Option<&'a Value> {
        self.cert
            .and_then(|c| c.get(key))
            .or_else(|| self.metadata.get(key))
            .filter(|v| !v.is_null())
    }

    fn first(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter().find_map(|key| self.get(key))
    }
}

pub(super) fn format(ctx: &FormatterContext, metadata: &CheckMetadata) -> String {
    let mut section = Section::new(ctx, "SSL Certificate Results");
    let view = CertView {
        cert: metadata.object("certificate"),
        metadata,
    };

    if let Some(host) = metadata.display("host").or_else(|| metadata.display("domain")) {
        section.field("Host", &host, Tone::Value);
    }
    if let Some(subject) = view.get("subject") {
        section.field("Subject", &distinguished_name(subject), Tone::Value);
    }
    if let Some(issuer) = view.get("issuer") {
        section.field("Issuer", &distinguished_name(issuer), Tone::Value);
    }
    if let Some(valid) = view.first(&["is_valid", "valid"]) {
        let (label, tone) = match valid.as_bool() {
            Some(true) => ("Valid", Tone::Good),
            Some(false) => ("Invalid", Tone::Alert),
            None => (UNKNOWN, Tone::Value),
        };
        section.field("Status", label, tone);
    }
    if let Some(from) = view.first(&["valid_from", "not_before"]) {
        section.field("Valid From", &format_timestamp(from), Tone::Value);
    }
    if let Some(to) = view.first(&["valid_to", "valid_until", "not_after"]) {
        section.field("Valid Until", &format_timestamp(to), Tone::Value);
    }

    if let Some(days) = view.get("days_until_expiry") {
        match value_as_f64(days) {
            Some(d) if d < 0.0 => {
                let text = format!("expired {} days ago", (-d).ceil() as i64);
                section.field("Expires In", &text, Tone::Alert);
            }
            Some(d) => {
                let text = format!("{} days", d.floor() as i64);
                section.field("Expires In", &text, expiry_severity(d).tone());
            }
            None => section.field("Expires In", &value_to_display(days), Tone::Value),
        }
    }

    if let Some(protocol) = view.first(&["protocol", "tls_version"]) {
        section.field("Protocol", &value_to_display(protocol), Tone::Value);
    }
    if let Some(cipher) = view.get("cipher") {
        section.field("Cipher", &value_to_display(cipher), Tone::Value);
    }
    if let Some(serial) = view.get("serial_number") {
        section.field("Serial Number", &value_to_display(serial), Tone::Dim);
    }
    if let Some(chain) = view
        .get("certificate_chain")
        .and_then(Value::as_array)
        .filter(|c| !c.is_empty())
    {
        section.field("Chain Length", &chain.len().to_string(), Tone::Value);
    }

    if let Some(names) = view
        .first(&["san", "subject_alt_names"])
        .and_then(Value::as_array)
        .filter(|n| !n.is_empty())
    {
        section.field("Alternative Names", &names.len().to_string(), Tone::Value);
        let (shown, hidden) = ctx.visible(names, SAN_LIMIT);
        for name in shown {
            section.item(&value_to_display(name));
        }
        section.more(hidden, "names");
    }

    if let Some(error) = metadata.display("error") {
        section.field("Error", &error, Tone::Alert);
    }

    section.finish()
}

/// Render `{"CN": "x", "O": "y"}` as `CN=x, O=y`; other shapes as-is.
fn distinguished_name(value: &Value) -> String {
    match value {
        Value::Object(parts) if !parts.is_empty() => parts
            .iter()
            .map(|(k, v)| format!("{}={}", k, value_to_display(v)))
            .collect::<Vec<_>>()
            .join(", "),
        other => value_to_display(other),
    }
}
