//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod checks;
pub mod context;
pub mod status;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// pngr - Pingera monitoring from the command line
#[derive(Parser, Debug)]
#[command(name = "pngr")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "PNGR_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "PNGR_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Show full check details instead of truncated summaries
    #[arg(short, long, global = true, env = "PNGR_VERBOSE", hide_env = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true, env = "PNGR_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Override the API base URL
    #[arg(long, global = true, env = "PNGR_API_URL", hide = true)]
    pub api_url: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect monitoring check results
    #[command(subcommand)]
    Checks(ChecksCommands),

    /// Show configuration status
    Status,

    /// Display version information
    Version,

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   pngr completion bash > /etc/bash_completion.d/pngr
  zsh:    pngr completion zsh > \"${fpath[1]}/_pngr\"
  fish:   pngr completion fish > ~/.config/fish/completions/pngr.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Check result subcommands
#[derive(Subcommand, Debug)]
pub enum ChecksCommands {
    /// Format check metadata from a JSON file or stdin
    #[command(after_help = "\
Input is a JSON object of check metadata, or an array of them.

Examples:
  pngr checks format result.json
  curl -s ... | jq .metadata | pngr checks format --verbose")]
    Format {
        /// JSON file to read ('-' or omitted for stdin)
        file: Option<String>,

        /// Job the metadata came from (used in truncation hints)
        #[arg(long)]
        job_id: Option<String>,

        /// Result the metadata came from (used in truncation hints)
        #[arg(long)]
        result_id: Option<String>,
    },

    /// Fetch and display a single check result
    Results {
        /// Result ID
        #[arg(long)]
        result_id: String,
    },

    /// On-demand check jobs
    #[command(subcommand)]
    Jobs(JobsCommands),
}

/// Check job subcommands
#[derive(Subcommand, Debug)]
pub enum JobsCommands {
    /// Show a job's status and results
    Status {
        /// Job ID
        job_id: String,
    },
}
