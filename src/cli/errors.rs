//! CLI-specific error types.

use std::io;

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI errors. All are fatal: the process prints them and exits non-zero.
#[derive(Debug, Error)]
pub enum CliError {
    /// Socket or runtime I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
