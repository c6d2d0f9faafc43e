// vid2gif-cli/src/lib.rs
//
// Library portion of the vid2gif CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod terminal;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, PipelineArg};
pub use commands::convert::{build_config, run_convert};
