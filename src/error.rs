use std::io;
use thiserror::Error;

use crate::config::settings::ConfigError;

/// Errors that can occur during git operations
#[derive(Debug, Error)]
pub enum GitError {
    /// Rejected before git was invoked
    #[error("{operation}: {reason}")]
    InvalidArguments {
        operation: &'static str,
        reason: &'static str,
    },

    #[error("Command 'git {command}' failed with exit code {exit_code}: {stderr}")]
    CommandFailed {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("Empty command")]
    EmptyCommand,

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl GitError {
    /// True when the error was raised by argument validation rather than by git
    pub fn is_validation(&self) -> bool {
        matches!(self, GitError::InvalidArguments { .. })
    }
}

/// Top-level error for callers that combine git operations with configuration
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for git operations
pub type GitResult<T> = std::result::Result<T, GitError>;

/// Result type for application-level operations
pub type AppResult<T> = std::result::Result<T, AppError>;
