pub mod audit;
pub mod config;
pub mod error;
pub mod git;

// Re-export commonly used types for convenience
pub use audit::AuditLogger;
pub use config::Config;
pub use error::{AppError, AppResult, GitError, GitResult};
pub use git::{CommandOutput, CommandRunner, Git, GitExecutor};
