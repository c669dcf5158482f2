//! Common CLI types shared across commands

use std::str::FromStr;

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - formatted check details for reading in a terminal
    #[default]
    Pretty,
    /// Table format - one FIELD/VALUE row per metadata entry
    Table,
    /// JSON format - structured for scripts/APIs
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    /// Parse a format name as written in the config file.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as clap::ValueEnum>::from_str(s, true)
    }
}
