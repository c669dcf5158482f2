//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// CLI flag > environment variable > config file > default. This struct
/// captures the CLI/env layer; config file defaults are resolved in
/// `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format, if given on the command line
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.pngr/config.yaml)
    pub config: Option<String>,

    /// Show full check details
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Custom API base URL for development/testing
    pub api_url: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            verbose: cli.verbose,
            no_color: cli.no_color,
            api_url: cli.api_url.clone(),
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_cli() {
        let cli = Cli::try_parse_from([
            "pngr",
            "--format",
            "json",
            "--config",
            "/custom/path",
            "--verbose",
            "--no-color",
            "--api-url",
            "http://localhost:8080",
            "version",
        ])
        .unwrap();

        let opts = GlobalOptions::from_cli(&cli);

        assert_eq!(opts.format, Some(OutputFormat::Json));
        assert_eq!(opts.config_ref(), Some("/custom/path"));
        assert_eq!(opts.api_url.as_deref(), Some("http://localhost:8080"));
        assert!(opts.verbose);
        assert!(opts.no_color);
    }

    #[test]
    fn test_none_accessors() {
        let opts = GlobalOptions::default();

        assert_eq!(opts.format, None);
        assert_eq!(opts.config_ref(), None);
        assert_eq!(opts.api_url, None);
        assert!(!opts.verbose);
    }
}
