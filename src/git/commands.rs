use crate::audit::AuditLogger;
use crate::config::Config;
use crate::error::{AppResult, GitError, GitResult};
use crate::git::args;
use crate::git::executor::{CommandOutput, CommandRunner, GitExecutor};
use std::path::Path;

/// Version-control operations over an injected command runner
///
/// Each operation validates its inputs, builds the argument list and invokes
/// the runner exactly once. A validation failure never reaches the runner.
/// Runner errors are returned unchanged.
#[derive(Debug)]
pub struct Git<R> {
    runner: R,
    audit: Option<AuditLogger>,
}

impl<R: CommandRunner> Git<R> {
    pub fn new(runner: R) -> Self {
        Self { runner, audit: None }
    }

    /// Record every invocation and rejection in the given audit log
    pub fn with_audit_logger(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn audit_logger(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Initialize a repository in `dir` (or the working directory when empty)
    pub fn init(&self, dir: &str, template: &str) -> GitResult<CommandOutput> {
        self.execute(args::init(dir, template))
    }

    /// Clone `url` into `dir` (or git's default directory when empty)
    pub fn clone(&self, url: &str, dir: &str) -> GitResult<CommandOutput> {
        self.dispatch(args::clone(url, dir))
    }

    /// Stage the given files, or everything when `files` is empty
    pub fn add<S: AsRef<str>>(&self, files: &[S]) -> GitResult<CommandOutput> {
        self.execute(args::add(files))
    }

    /// Remove the given files; with no files, `recursive` must be set and
    /// everything is removed
    pub fn remove<S: AsRef<str>>(&self, recursive: bool, files: &[S]) -> GitResult<CommandOutput> {
        self.dispatch(args::remove(recursive, files))
    }

    pub fn commit(&self, message: &str) -> GitResult<CommandOutput> {
        self.execute(args::commit(message))
    }

    pub fn branch(&self, name: &str) -> GitResult<CommandOutput> {
        self.dispatch(args::branch(name))
    }

    pub fn delete_branch(&self, name: &str) -> GitResult<CommandOutput> {
        self.dispatch(args::delete_branch(name))
    }

    pub fn checkout(&self, branch: &str) -> GitResult<CommandOutput> {
        self.dispatch(args::checkout(branch))
    }

    /// Create a tag; an empty message makes an annotated tag via `-a`
    pub fn tag(&self, name: &str, message: &str) -> GitResult<CommandOutput> {
        self.dispatch(args::tag(name, message))
    }

    pub fn delete_tag(&self, name: &str) -> GitResult<CommandOutput> {
        self.dispatch(args::delete_tag(name))
    }

    /// Merge `branch` into the current branch
    pub fn merge(&self, branch: &str, message: &str, fast_forward: bool) -> GitResult<CommandOutput> {
        self.dispatch(args::merge(branch, message, fast_forward))
    }

    pub fn remote_add(&self, name: &str, location: &str) -> GitResult<CommandOutput> {
        self.dispatch(args::remote_add(name, location))
    }

    pub fn remote_remove(&self, name: &str) -> GitResult<CommandOutput> {
        self.dispatch(args::remote_remove(name))
    }

    pub fn remote_set_url(&self, name: &str, location: &str) -> GitResult<CommandOutput> {
        self.dispatch(args::remote_set_url(name, location))
    }

    /// Fetch the given branches from `remote`, or all branches when empty
    pub fn fetch<S: AsRef<str>>(&self, remote: &str, branches: &[S]) -> GitResult<CommandOutput> {
        self.dispatch(args::fetch(remote, branches))
    }

    pub fn pull<S: AsRef<str>>(&self, remote: &str, branches: &[S]) -> GitResult<CommandOutput> {
        self.dispatch(args::pull(remote, branches))
    }

    fn dispatch(&self, built: GitResult<Vec<String>>) -> GitResult<CommandOutput> {
        match built {
            Ok(args) => self.execute(args),
            Err(err) => {
                if let GitError::InvalidArguments { operation, reason } = &err {
                    self.audit_rejection(operation, reason);
                }
                Err(err)
            }
        }
    }

    fn execute(&self, args: Vec<String>) -> GitResult<CommandOutput> {
        let result = self.runner.run(&args);

        if let Some(logger) = &self.audit {
            let exit_code = match &result {
                Ok(output) => output.exit_code,
                Err(GitError::CommandFailed { exit_code, .. }) => *exit_code,
                Err(_) => -1,
            };
            if let Err(e) = logger.log_command(&args, self.repo_path(), exit_code) {
                eprintln!("Failed to write audit log: {}", e);
            }
        }

        result
    }

    fn audit_rejection(&self, operation: &str, reason: &str) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log_validation_failure(operation, reason, self.repo_path()) {
                eprintln!("Failed to write audit log: {}", e);
            }
        }
    }

    fn repo_path(&self) -> &Path {
        self.runner.working_dir().unwrap_or_else(|| Path::new("."))
    }
}

impl Git<GitExecutor> {
    /// Build a git front for the configured program and working directory,
    /// with auditing when `[audit] enabled = true`
    pub fn from_config(config: &Config) -> AppResult<Self> {
        config.validate()?;

        let git = Git::new(GitExecutor::from_config(config));
        if !config.audit.enabled {
            return Ok(git);
        }

        let logger = match &config.audit.log_path {
            Some(path) => AuditLogger::with_path(path)?,
            None => AuditLogger::new()?,
        };
        Ok(git.with_audit_logger(logger))
    }
}
