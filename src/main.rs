//! pngr - Pingera monitoring from the command line

use clap::{CommandFactory, Parser};
use log::LevelFilter;

mod cli;
mod client;
mod config;
mod error;
mod formatters;
mod models;
mod output;

use cli::{ChecksCommands, Cli, Commands, GlobalOptions, JobsCommands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Checks(cmd) => match cmd {
            ChecksCommands::Format {
                file,
                job_id,
                result_id,
            } => cli::checks::format(
                &opts,
                file.as_deref(),
                job_id.as_deref(),
                result_id.as_deref(),
            ),
            ChecksCommands::Results { result_id } => cli::checks::results(&opts, &result_id).await,
            ChecksCommands::Jobs(JobsCommands::Status { job_id }) => {
                cli::checks::job_status(&opts, &job_id).await
            }
        },
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("pngr version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Completion { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "pngr", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// `--debug` forces debug output for this crate; otherwise `RUST_LOG`
/// applies, defaulting to warnings only.
fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_module(env!("CARGO_CRATE_NAME"), LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}
