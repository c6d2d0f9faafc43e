// ============================================================================
// vid2gif-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Result alias and error reporting for the CLI
//
// The CLI reuses vid2gif-core's error type. Every fatal error is reported as
// a single `Error: ...` line on stderr followed by exit status 1.

use vid2gif_core::{CoreError, CoreResult};

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

/// Exit status for any fatal error.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Renders an error as one line, folding any multi-line tool output.
#[must_use]
pub fn error_line(error: &CoreError) -> String {
    error
        .to_string()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}
