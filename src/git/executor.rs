use crate::config::Config;
use crate::error::{GitError, GitResult};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Result of executing a git command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub success: bool,
}

/// Runs git with a prepared argument list
///
/// The program name is supplied by the implementation; callers only pass the
/// arguments that follow it.
pub trait CommandRunner {
    fn run(&self, args: &[String]) -> GitResult<CommandOutput>;

    /// Directory the commands run in, used for audit records
    fn working_dir(&self) -> Option<&Path> {
        None
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, args: &[String]) -> GitResult<CommandOutput> {
        (**self).run(args)
    }

    fn working_dir(&self) -> Option<&Path> {
        (**self).working_dir()
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for Box<R> {
    fn run(&self, args: &[String]) -> GitResult<CommandOutput> {
        (**self).run(args)
    }

    fn working_dir(&self) -> Option<&Path> {
        (**self).working_dir()
    }
}

/// Spawns the git binary for each command
#[derive(Debug, Clone)]
pub struct GitExecutor {
    program: String,
    repo_path: Option<PathBuf>,
}

impl GitExecutor {
    /// Create a GitExecutor that runs inside the given directory
    pub fn new<P: AsRef<Path>>(repo_path: P) -> Self {
        Self {
            program: "git".to_string(),
            repo_path: Some(repo_path.as_ref().to_path_buf()),
        }
    }

    /// Create a GitExecutor that inherits the process working directory
    pub fn in_current_dir() -> Self {
        Self {
            program: "git".to_string(),
            repo_path: None,
        }
    }

    /// Build an executor from the `[git]` section of the configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            program: config.git.program.clone(),
            repo_path: config.git.working_dir.clone(),
        }
    }

    /// Override the program that is executed
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Get the program name
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Get the repository path, if one was set
    pub fn repo_path(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }

    /// Process command output into CommandOutput struct
    fn process_output(&self, output: Output, args: &[String]) -> GitResult<CommandOutput> {
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        // Killed by a signal
        let exit_code = output.status.code().unwrap_or(-1);
        let success = output.status.success();

        if !success {
            return Err(GitError::CommandFailed {
                command: args.join(" "),
                exit_code,
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(CommandOutput {
            stdout,
            stderr,
            exit_code,
            success,
        })
    }
}

impl CommandRunner for GitExecutor {
    fn run(&self, args: &[String]) -> GitResult<CommandOutput> {
        if args.is_empty() {
            return Err(GitError::EmptyCommand);
        }

        // Arguments go straight to the process, never through a shell
        let mut command = Command::new(&self.program);
        command.args(args);
        if let Some(path) = &self.repo_path {
            command.current_dir(path);
        }

        let output = command.output()?;
        self.process_output(output, args)
    }

    fn working_dir(&self) -> Option<&Path> {
        self.repo_path()
    }
}
