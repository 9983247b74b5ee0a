pub mod args;
pub mod commands;
pub mod executor;

// Re-export commonly used types
pub use commands::Git;
pub use executor::{CommandOutput, CommandRunner, GitExecutor};
