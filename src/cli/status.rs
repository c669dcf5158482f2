//! Status command implementation

use colored::Colorize;

use crate::cli::{CommandContext, GlobalOptions};
use crate::config::API_KEY_ENV;
use crate::error::Result;

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    println!("{}", render(&ctx));
    Ok(())
}

fn render(ctx: &CommandContext) -> String {
    let mut lines = vec![format!("{}\n", "pngr Configuration Status".bold())];

    let path = ctx.config_path.display().to_string();
    if ctx.config_path.exists() {
        lines.push(format!("Config file: {}", path.cyan()));
    } else {
        lines.push(format!(
            "Config file: {} {}",
            path.cyan(),
            "(not found, using defaults)".dimmed()
        ));
    }
    lines.push(String::new());

    match (&ctx.config.api_key, ctx.config.api_key()) {
        (Some(_), _) => lines.push(format!("{} API key configured", "✓".green())),
        (None, Some(_)) => lines.push(format!("{} API key from {}", "✓".green(), API_KEY_ENV)),
        (None, None) => {
            lines.push(format!("{} API key not configured", "✗".red()));
            lines.push(format!(
                "  → Set api_key in {} or export {}",
                path, API_KEY_ENV
            ));
        }
    }

    lines.push(format!("{} API URL: {}", "○".dimmed(), ctx.api_url()));
    lines.push(format!("{} App URL: {}", "○".dimmed(), ctx.config.app_url));
    lines.push(format!("{} Output format: {:?}", "○".dimmed(), ctx.format));
    lines.push(format!(
        "{} Verbose: {}",
        "○".dimmed(),
        if ctx.verbose { "on" } else { "off" }
    ));

    lines.join("\n")
}
