// ============================================================================
// vid2gif-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: env_logger Initialization for the CLI
//
// All diagnostics go to stderr because stdout may carry the GIF itself.
// Levels:
// - info (default): progress lines and warnings
// - debug (-v / -p): planned commands, tool discovery, tool stderr
// - RUST_LOG, when set, overrides both
//
// Colors come from `console` and are disabled when NO_COLOR is set or stderr
// is not a terminal.

use console::style;
use log::{Level, LevelFilter};
use std::io::Write;

/// Log level implied by the verbosity flags.
#[must_use]
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initializes the global logger. Call once, before anything logs.
pub fn init(verbose: bool) {
    if std::env::var_os("NO_COLOR").is_some() {
        console::set_colors_enabled_stderr(false);
    }

    let default_level = level_for(verbose).to_string().to_lowercase();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format(|buf, record| {
            let message = record.args();
            match record.level() {
                Level::Error => writeln!(buf, "{} {message}", style("Error:").for_stderr().red().bold()),
                Level::Warn => writeln!(buf, "{} {message}", style("Warning:").for_stderr().yellow().bold()),
                Level::Info => writeln!(buf, "{message}"),
                Level::Debug | Level::Trace => {
                    writeln!(buf, "{}", style(format!("  {message}")).for_stderr().dim())
                }
            }
        })
        .target(env_logger::Target::Stderr)
        .init();
}
