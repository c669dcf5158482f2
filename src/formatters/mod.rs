//! Check result formatters
//!
//! Monitoring checks return untyped metadata whose shape depends on the check
//! type. Each [`Formatter`] variant recognises one shape by its signature
//! keys and renders it for the terminal. [`FormatterRegistry`] picks the first
//! matching variant in priority order, falling back to a generic key/value
//! listing so any metadata can be displayed.
//!
//! Formatters never fail: absent fields are skipped or shown as a
//! placeholder, and values of an unexpected type are shown in raw form.

use std::fmt;

use serde::Serialize;

pub mod base;
mod dns;
pub mod generic;
mod icmp;
pub mod metadata;
mod multistep;
mod portscan;
pub mod registry;
mod ssl;
mod synthetic;
mod web;

pub use base::{FormatterContext, Severity};
pub use metadata::CheckMetadata;
pub use registry::FormatterRegistry;

/// Check types with a dedicated rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Formatter {
    Web,
    Ssl,
    #[serde(rename = "portscan")]
    PortScan,
    Multistep,
    Synthetic,
    Icmp,
    Dns,
    Generic,
}

impl Formatter {
    /// Priority order used by [`FormatterRegistry::new`]; more specific
    /// signatures first, the catch-all last.
    pub const DEFAULT_ORDER: [Formatter; 8] = [
        Formatter::Web,
        Formatter::Ssl,
        Formatter::PortScan,
        Formatter::Multistep,
        Formatter::Synthetic,
        Formatter::Icmp,
        Formatter::Dns,
        Formatter::Generic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Formatter::Web => "web",
            Formatter::Ssl => "ssl",
            Formatter::PortScan => "portscan",
            Formatter::Multistep => "multistep",
            Formatter::Synthetic => "synthetic",
            Formatter::Icmp => "icmp",
            Formatter::Dns => "dns",
            Formatter::Generic => "generic",
        }
    }

    /// Keys whose presence identifies this check type. Empty for the
    /// catch-all.
    pub fn signature_keys(self) -> &'static [&'static str] {
        match self {
            Formatter::Web => web::SIGNATURE_KEYS,
            Formatter::Ssl => ssl::SIGNATURE_KEYS,
            Formatter::PortScan => portscan::SIGNATURE_KEYS,
            Formatter::Multistep => multistep::SIGNATURE_KEYS,
            Formatter::Synthetic => synthetic::SIGNATURE_KEYS,
            Formatter::Icmp => icmp::SIGNATURE_KEYS,
            Formatter::Dns => dns::SIGNATURE_KEYS,
            Formatter::Generic => &[],
        }
    }

    pub fn can_format(self, metadata: &CheckMetadata) -> bool {
        match self {
            Formatter::Generic => true,
            other => metadata.contains_any(other.signature_keys()),
        }
    }

    pub fn format(self, ctx: &FormatterContext, metadata: &CheckMetadata) -> String {
        match self {
            Formatter::Web => web::format(ctx, metadata),
            Formatter::Ssl => ssl::format(ctx, metadata),
            Formatter::PortScan => portscan::format(ctx, metadata),
            Formatter::Multistep => multistep::format(ctx, metadata),
            Formatter::Synthetic => synthetic::format(ctx, metadata),
            Formatter::Icmp => icmp::format(ctx, metadata),
            Formatter::Dns => dns::format(ctx, metadata),
            Formatter::Generic => generic::format(ctx, metadata),
        }
    }
}

impl fmt::Display for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
