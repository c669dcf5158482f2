//! Output formatting for CLI results

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod json;
pub mod table;

/// Trait for types that can be formatted for output
pub trait Formattable {
    /// Format the data according to the specified format
    fn format(&self, format: OutputFormat) -> Result<String>;
}

/// Format and print data to stdout
pub fn print<T: Formattable + ?Sized>(data: &T, format: OutputFormat) -> Result<()> {
    let output = data.format(format)?;
    println!("{}", output);
    Ok(())
}

/// Spinner on stderr for in-flight API requests. Hidden when stderr is not a
/// terminal so piped output stays clean.
pub fn spinner(message: &str) -> ProgressBar {
    if !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
