#![allow(dead_code)]

use gitwrap::{CommandOutput, CommandRunner, GitError, GitResult};
use std::cell::RefCell;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Runner that records every argument list and reports success
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: RefCell<Vec<Vec<String>>>,
}

impl RecordingRunner {
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    /// The single recorded argument list; panics unless exactly one call was made
    pub fn only_call(&self) -> Vec<String> {
        let calls = self.calls.borrow();
        assert_eq!(calls.len(), 1, "expected exactly one invocation, got {:?}", calls);
        calls[0].clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, args: &[String]) -> GitResult<CommandOutput> {
        self.calls.borrow_mut().push(args.to_vec());
        Ok(CommandOutput {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: 0,
            success: true,
        })
    }
}

/// Runner that fails every invocation the way a non-zero git exit does
#[derive(Debug)]
pub struct FailingRunner {
    pub exit_code: i32,
    pub stderr: String,
}

impl CommandRunner for FailingRunner {
    fn run(&self, args: &[String]) -> GitResult<CommandOutput> {
        Err(GitError::CommandFailed {
            command: args.join(" "),
            exit_code: self.exit_code,
            stderr: self.stderr.clone(),
        })
    }
}

/// Helper to create an empty directory for git to work in
pub fn create_test_dir() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().to_path_buf();
    (temp_dir, path)
}

/// Helper to set a committer identity on a freshly initialized repository
pub fn configure_identity(repo_path: &PathBuf) {
    Command::new("git")
        .args(["config", "user.name", "Test User"])
        .current_dir(repo_path)
        .output()
        .expect("Failed to set git user.name");

    Command::new("git")
        .args(["config", "user.email", "test@example.com"])
        .current_dir(repo_path)
        .output()
        .expect("Failed to set git user.email");
}

/// Run a read-only git query and return trimmed stdout
pub fn git_output(repo_path: &PathBuf, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .output()
        .expect("Failed to run git");
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}
