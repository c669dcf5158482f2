//! ICMP ping results

use serde_json::Value;

use super::base::{FormatterContext, Section, Severity, Tone};
use super::metadata::{CheckMetadata, value_as_f64, value_to_display};

pub(super) const SIGNATURE_KEYS: &[&str] = &["packet_loss", "avg_rtt"];

/// Severity tier for a packet loss percentage.
pub fn packet_loss_severity(loss: f64) -> Severity {
    if loss <= 0.0 {
        Severity::Ok
    } else if loss < 50.0 {
        Severity::Warning
    } else {
        Severity::Critical
    }
}

pub(super) fn format(ctx: &FormatterContext, metadata: &CheckMetadata) -> String {
    let mut section = Section::new(ctx, "ICMP Ping Results");

    if let Some(sent) = metadata.display("packets_sent") {
        section.field("Packets Sent", &sent, Tone::Value);
    }
    if let Some(received) = metadata.display("packets_received") {
        section.field("Packets Received", &received, Tone::Value);
    }
    if let Some(loss) = metadata.get("packet_loss").filter(|v| !v.is_null()) {
        let tone = metadata
            .f64("packet_loss")
            .map(|l| packet_loss_severity(l).tone())
            .unwrap_or(Tone::Value);
        section.field("Packet Loss", &format!("{}%", value_to_display(loss)), tone);
    }

    let rtt_fields = [
        ("min_rtt", "Min RTT", Tone::Good),
        ("avg_rtt", "Avg RTT", Tone::Accent),
        ("max_rtt", "Max RTT", Tone::Alert),
        ("stddev_rtt", "Std Dev", Tone::Value),
    ];
    for (key, label, tone) in rtt_fields {
        if let Some(value) = metadata.get(key).filter(|v| !v.is_null()) {
            section.field(label, &rtt(value), tone);
        }
    }

    section.finish()
}

fn rtt(value: &Value) -> String {
    match value_as_f64(value) {
        Some(ms) => format!("{:.2}ms", ms),
        None => value_to_display(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_packet_loss_tiers() {
        assert_eq!(packet_loss_severity(0.0), Severity::Ok);
        assert_eq!(packet_loss_severity(30.0), Severity::Warning);
        assert_eq!(packet_loss_severity(49.9), Severity::Warning);
        assert_eq!(packet_loss_severity(50.0), Severity::Critical);
        assert_eq!(packet_loss_severity(70.0), Severity::Critical);
    }

    #[test]
    fn test_full_rendering() {
        let metadata = CheckMetadata::from(json!({
            "packets_sent": 4,
            "packets_received": 3,
            "packet_loss": 25,
            "min_rtt": 10.123,
            "avg_rtt": 12.5,
            "max_rtt": 15,
            "stddev_rtt": 1.98765
        }));

        let out = format(&FormatterContext::new(false), &metadata);

        assert!(out.starts_with("ICMP Ping Results:"));
        assert!(out.contains("• Packets Sent: 4"));
        assert!(out.contains("• Packets Received: 3"));
        assert!(out.contains("• Packet Loss: 25%"));
        assert!(out.contains("• Min RTT: 10.12ms"));
        assert!(out.contains("• Avg RTT: 12.50ms"));
        assert!(out.contains("• Max RTT: 15.00ms"));
        assert!(out.contains("• Std Dev: 1.99ms"));
    }

    #[test]
    fn test_non_numeric_values_fall_back_to_raw() {
        let metadata = CheckMetadata::from(json!({
            "packet_loss": "unknown",
            "avg_rtt": {"value": 3}
        }));

        let out = format(&FormatterContext::new(false), &metadata);

        assert!(out.contains("• Packet Loss: unknown%"));
        assert!(out.contains("• Avg RTT: {\"value\":3}"));
    }

    #[test]
    fn test_only_signature_key_present() {
        let metadata = CheckMetadata::from(json!({ "avg_rtt": 7 }));

        let out = format(&FormatterContext::new(false), &metadata);

        assert_eq!(out, "ICMP Ping Results:\n• Avg RTT: 7.00ms");
    }

    #[test]
    fn test_packet_loss_colored_by_tier() {
        colored::control::set_override(true);
        let ctx = FormatterContext::new(false).with_color(true);

        let render = |loss: u64| format(&ctx, &CheckMetadata::from(json!({ "packet_loss": loss })));

        assert!(render(0).contains("• Packet Loss: \x1b[32m0%\x1b[0m"));
        assert!(render(30).contains("• Packet Loss: \x1b[33m30%\x1b[0m"));
        assert!(render(70).contains("• Packet Loss: \x1b[31m70%\x1b[0m"));
    }
}
