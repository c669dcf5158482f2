//! Command execution context
//!
//! Resolves config, output format, and formatter settings once per
//! invocation so handlers only deal with their own arguments.

use std::io::IsTerminal;
use std::path::PathBuf;

use log::{debug, warn};

use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::PingeraClient;
use crate::config::Config;
use crate::error::Result;
use crate::formatters::{FormatterContext, FormatterRegistry};

/// Context for command execution containing config and runtime options.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Loaded configuration (defaults when the file is absent)
    pub config: Config,
    /// Where the configuration was read from
    pub config_path: PathBuf,
    /// Output format after applying the config preference
    pub format: OutputFormat,
    /// Show full details
    pub verbose: bool,
    /// Style pretty output
    pub color: bool,
    api_url: Option<String>,
}

impl CommandContext {
    /// Load config and merge it with the global options.
    ///
    /// # Errors
    /// Returns error if the config file exists but cannot be read or parsed.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config_path = Config::resolve_path(opts.config_ref())?;
        let config = Config::load_or_default(&config_path)?;

        let format = match (opts.format, config.preferences.format.as_deref()) {
            (Some(format), _) => format,
            (None, Some(pref)) => pref.parse().unwrap_or_else(|_| {
                warn!("Ignoring unknown format preference '{}'", pref);
                OutputFormat::default()
            }),
            (None, None) => OutputFormat::default(),
        };

        let verbose = opts.verbose || config.preferences.verbose;
        let color = !opts.no_color
            && std::env::var_os("NO_COLOR").is_none()
            && std::io::stdout().is_terminal();

        debug!(
            "Resolved format={:?} verbose={} color={} config={}",
            format,
            verbose,
            color,
            config_path.display()
        );

        Ok(Self {
            config,
            config_path,
            format,
            verbose,
            color,
            api_url: opts.api_url.clone(),
        })
    }

    /// API base URL: CLI/env override, else config.
    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(&self.config.api_url)
    }

    /// Formatter context for this invocation, without job/result IDs.
    pub fn formatter_context(&self) -> FormatterContext {
        FormatterContext::new(self.verbose)
            .with_color(self.color)
            .with_app_url(self.config.app_url.clone())
    }

    /// Registry built from [`Self::formatter_context`] plus `adjust`.
    pub fn registry(
        &self,
        adjust: impl FnOnce(FormatterContext) -> FormatterContext,
    ) -> FormatterRegistry {
        let registry = FormatterRegistry::new(adjust(self.formatter_context()));
        debug!("Formatter order: {}", registry.formatter_names().join(", "));
        registry
    }

    /// Create an API client, requiring a configured API key.
    pub fn client(&self) -> Result<PingeraClient> {
        let api_key = self.config.require_api_key()?;
        PingeraClient::new(api_key, self.api_url())
    }
}
