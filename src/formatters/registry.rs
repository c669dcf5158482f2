//! Ordered formatter dispatch

use log::{debug, warn};

use super::Formatter;
use super::base::{FormatterContext, Section};
use super::metadata::CheckMetadata;

/// Holds the formatter priority list and the shared context for one CLI
/// invocation.
///
/// Dispatch is a linear scan: the first formatter whose signature matches
/// renders the metadata. The default list ends with [`Formatter::Generic`],
/// which accepts anything, so formatting is total.
#[derive(Debug, Clone)]
pub struct FormatterRegistry {
    context: FormatterContext,
    formatters: Vec<Formatter>,
}

impl FormatterRegistry {
    /// Registry with every check type in the default priority order.
    pub fn new(context: FormatterContext) -> Self {
        Self::with_formatters(context, Formatter::DEFAULT_ORDER.to_vec())
    }

    /// Registry with an explicit priority list.
    pub fn with_formatters(context: FormatterContext, formatters: Vec<Formatter>) -> Self {
        Self {
            context,
            formatters,
        }
    }

    pub fn context(&self) -> &FormatterContext {
        &self.context
    }

    /// Formatter names in dispatch order.
    pub fn formatter_names(&self) -> Vec<&'static str> {
        self.formatters.iter().map(|formatter| formatter.name()).collect()
    }

    /// The formatter that would render this metadata.
    pub fn select(&self, metadata: &CheckMetadata) -> Option<Formatter> {
        self.formatters
            .iter()
            .copied()
            .find(|formatter| formatter.can_format(metadata))
    }

    /// Render metadata with the first matching formatter.
    pub fn format_metadata(&self, metadata: &CheckMetadata) -> String {
        match self.select(metadata) {
            Some(formatter) => {
                debug!(
                    "Formatting {} metadata keys with the {} formatter",
                    metadata.len(),
                    formatter
                );
                formatter.format(&self.context, metadata)
            }
            None => {
                warn!(
                    "No formatter matched check metadata keys: {}",
                    metadata.keys().collect::<Vec<_>>().join(", ")
                );
                let mut section = Section::new(&self.context, "Check Metadata");
                section.note("No formatter available");
                section.finish()
            }
        }
    }
}
