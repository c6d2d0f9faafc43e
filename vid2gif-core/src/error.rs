// ============================================================================
// vid2gif-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Custom Error Types for vid2gif-core
//
// This module defines the error types used throughout the vid2gif-core
// library. It uses the thiserror crate to derive Error implementations and
// groups every variant into one of a handful of error kinds so callers can
// decide how to report them.
//
// KEY COMPONENTS:
// - CoreError: Enum of all possible errors in the library
// - ErrorKind: Coarse classification (usage, environment, arithmetic, ...)
// - CoreResult: Type alias for Result with CoreError
// - Helper functions for creating command errors

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Coarse classification of a [`CoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or conflicting options.
    Usage,
    /// Something about the host is unsuitable (terminal, missing tools).
    Environment,
    /// A numeric option or derived value could not be computed.
    Arithmetic,
    /// An external tool failed to start or exited unsuccessfully.
    Execution,
    /// Filesystem or other I/O failure.
    Io,
}

/// Errors that can occur in the vid2gif-core library.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid option: {0}")]
    Usage(String),

    #[error("Refusing to {action} an interactive terminal; {hint}")]
    InteractiveTerminal { action: &'static str, hint: &'static str },

    #[error("Required tool '{0}' not found")]
    DependencyNotFound(String),

    #[error("Tool '{tool}' is missing required capability: {capability}")]
    MissingCapability { tool: String, capability: String },

    #[error("Invalid number '{0}'")]
    InvalidNumber(String),

    #[error("Division by zero while computing {0}")]
    DivisionByZero(String),

    #[error("Computed {what} is not greater than zero: {detail}")]
    NonPositive { what: String, detail: String },

    #[error("Failed to execute {0}: {1}")]
    CommandStart(String, io::Error),

    #[error("Failed to wait for {0}: {1}")]
    CommandWait(String, io::Error),

    #[error("Decoder produced no frames in {}", .0.display())]
    NoFrames(PathBuf),

    #[error("Command {cmd} failed with status {status}: {stderr}")]
    CommandFailed {
        cmd: String,
        status: ExitStatus,
        stderr: String,
    },
}

impl CoreError {
    /// Returns the classification of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::Io(_) => ErrorKind::Io,
            CoreError::Usage(_) => ErrorKind::Usage,
            CoreError::InteractiveTerminal { .. }
            | CoreError::DependencyNotFound(_)
            | CoreError::MissingCapability { .. } => ErrorKind::Environment,
            CoreError::InvalidNumber(_)
            | CoreError::DivisionByZero(_)
            | CoreError::NonPositive { .. } => ErrorKind::Arithmetic,
            CoreError::CommandStart(..)
            | CoreError::CommandWait(..)
            | CoreError::CommandFailed { .. }
            | CoreError::NoFrames(_) => ErrorKind::Execution,
        }
    }
}

/// Result type for vid2gif-core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Creates a command start error.
pub fn command_start_error(cmd: impl Into<String>, error: io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), error)
}

/// Creates a command wait error.
pub fn command_wait_error(cmd: impl Into<String>, error: io::Error) -> CoreError {
    CoreError::CommandWait(cmd.into(), error)
}

/// Creates a command failed error.
pub fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        cmd: cmd.into(),
        status,
        stderr: stderr.into(),
    }
}
