//! Fallback rendering for metadata no other formatter recognises

use super::base::{DEFAULT_TRUNCATE_LEN, FormatterContext, Section, Tone, truncate_text};
use super::metadata::{CheckMetadata, value_to_display};

pub(super) fn format(ctx: &FormatterContext, metadata: &CheckMetadata) -> String {
    let mut section = Section::new(ctx, "Check Metadata");

    if metadata.is_empty() {
        section.note("No metadata available");
        return section.finish();
    }

    for (key, value) in metadata.iter() {
        let text = section.clip(&value_to_display(value), DEFAULT_TRUNCATE_LEN);
        section.field(key, &text, Tone::Value);
    }

    section.finish()
}

/// Flat `(key, value)` pairs for tabular output, plus whether any value was
/// shortened.
pub fn entries(
    ctx: &FormatterContext,
    metadata: &CheckMetadata,
) -> (Vec<(String, String)>, bool) {
    let mut clipped = false;
    let rows = metadata
        .iter()
        .map(|(key, value)| {
            let text = value_to_display(value);
            if !ctx.verbose && text.chars().count() > DEFAULT_TRUNCATE_LEN {
                clipped = true;
                return (key.clone(), truncate_text(&text, DEFAULT_TRUNCATE_LEN));
            }
            (key.clone(), text)
        })
        .collect();
    (rows, clipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lists_every_key() {
        let metadata = CheckMetadata::from(json!({
            "alpha": 1,
            "beta": "two",
            "gamma": {"nested": true},
            "delta": [1, 2, 3]
        }));

        let out = format(&FormatterContext::new(false), &metadata);

        assert!(out.starts_with("Check Metadata:"));
        assert!(out.contains("• alpha: 1"));
        assert!(out.contains("• beta: two"));
        assert!(out.contains("• gamma: {\"nested\":true}"));
        assert!(out.contains("• delta: [1,2,3]"));
    }

    #[test]
    fn test_empty_metadata() {
        let out = format(&FormatterContext::new(false), &CheckMetadata::default());

        assert_eq!(out, "Check Metadata:\n• No metadata available");
    }

    #[test]
    fn test_oversized_values_truncated() {
        let metadata = CheckMetadata::from(json!({ "blob": "b".repeat(150) }));

        let quiet = format(&FormatterContext::new(false), &metadata);
        assert!(quiet.contains(&format!("• blob: {}...", "b".repeat(100))));
        assert!(quiet.contains("Some details truncated"));

        let verbose = format(&FormatterContext::new(true), &metadata);
        assert!(verbose.contains(&"b".repeat(150)));
        assert!(!verbose.contains("Some details truncated"));
    }

    #[test]
    fn test_entries_for_table() {
        let metadata = CheckMetadata::from(json!({ "a": "x".repeat(120), "b": 2 }));

        let (rows, clipped) = entries(&FormatterContext::new(false), &metadata);

        assert!(clipped);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, "a");
        assert_eq!(rows[0].1.chars().count(), 103);
        assert_eq!(rows[1], ("b".to_string(), "2".to_string()));

        let (rows, clipped) = entries(&FormatterContext::new(true), &metadata);
        assert!(!clipped);
        assert_eq!(rows[0].1.chars().count(), 120);
    }

    #[test]
    fn test_entries_short_values_not_clipped() {
        let metadata = CheckMetadata::from(json!({ "a": "x", "b": 2 }));

        let (_, clipped) = entries(&FormatterContext::new(false), &metadata);

        assert!(!clipped);
    }
}
