//! Command implementations for the CLI.

/// Builds the conversion config from the parsed arguments and runs it.
pub mod convert;
