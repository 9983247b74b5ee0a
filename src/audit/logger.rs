use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use chrono::Utc;

const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024; // 10MB

/// Append-only record of executed git commands and rejected requests
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create a new AuditLogger with the default log path
    pub fn new() -> std::io::Result<Self> {
        Self::with_path(Self::default_log_path()?)
    }

    /// Create an AuditLogger with a custom log path
    pub fn with_path<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let log_path = path.as_ref().to_path_buf();

        if let Some(parent) = log_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(Self { log_path })
    }

    /// Get the default log path: ~/.config/gitwrap/history.log
    fn default_log_path() -> std::io::Result<PathBuf> {
        let home = std::env::var("HOME").map_err(|_| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "HOME environment variable not set",
            )
        })?;

        Ok(PathBuf::from(home)
            .join(".config")
            .join("gitwrap")
            .join("history.log"))
    }

    /// Log one git invocation with its exit code (-1 if git never ran)
    pub fn log_command(&self, args: &[String], repo_path: &Path, exit_code: i32) -> std::io::Result<()> {
        let entry = format!("[exit:{}] git {}", exit_code, args.join(" "));
        self.append(repo_path, &entry)
    }

    /// Log a request that failed argument validation and never reached git
    pub fn log_validation_failure(
        &self,
        operation: &str,
        reason: &str,
        repo_path: &Path,
    ) -> std::io::Result<()> {
        let entry = format!(
            "[VALIDATION-REJECTED] operation=\"{}\" reason=\"{}\"",
            operation, reason
        );
        self.append(repo_path, &entry)
    }

    fn append(&self, repo_path: &Path, entry: &str) -> std::io::Result<()> {
        self.rotate_if_needed()?;

        let timestamp = Utc::now().to_rfc3339();
        let user = std::env::var("USER").unwrap_or_else(|_| "unknown".to_string());
        let record = format!("[{}] [{}] [{}] {}", timestamp, user, repo_path.display(), entry);
        let line = format!("{}\n", single_line(&record));

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        file.write_all(line.as_bytes())?;
        file.flush()?;

        Ok(())
    }

    /// Rotate log file if it exceeds MAX_LOG_SIZE
    fn rotate_if_needed(&self) -> std::io::Result<()> {
        if !self.log_path.exists() {
            return Ok(());
        }

        let metadata = fs::metadata(&self.log_path)?;
        if metadata.len() > MAX_LOG_SIZE {
            // history.log -> history.log.1
            let backup_path = self.log_path.with_extension("log.1");
            fs::rename(&self.log_path, backup_path)?;
        }

        Ok(())
    }

    /// Get the path to the log file
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

/// One record per line: embedded line breaks are written as `\n` / `\r`
fn single_line(record: &str) -> String {
    record.replace('\r', "\\r").replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_create_logger_makes_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("nested").join("test.log");

        let logger = AuditLogger::with_path(&log_path).unwrap();
        assert_eq!(logger.log_path(), log_path);
        assert!(log_path.parent().unwrap().is_dir());
    }

    #[test]
    fn test_log_command() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("test.log");

        let logger = AuditLogger::with_path(&log_path).unwrap();
        logger
            .log_command(&args(&["commit", "--message='wip'"]), Path::new("/test/repo"), 0)
            .unwrap();

        let content = fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("git commit --message='wip'"));
        assert!(content.contains("/test/repo"));
        assert!(content.contains("exit:0"));
    }

    #[test]
    fn test_multiple_log_entries() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("test.log");

        let logger = AuditLogger::with_path(&log_path).unwrap();
        let repo_path = Path::new("/test/repo");

        logger.log_command(&args(&["add", "."]), repo_path, 0).unwrap();
        logger.log_command(&args(&["checkout", "main"]), repo_path, 1).unwrap();
        logger.log_command(&args(&["fetch", "origin", "--all"]), repo_path, 128).unwrap();

        let content = fs::read_to_string(&log_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("[exit:1] git checkout main"));
        assert!(lines[2].contains("[exit:128] git fetch origin --all"));
    }

    #[test]
    fn test_log_rotation() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("test.log");

        let logger = AuditLogger::with_path(&log_path).unwrap();
        let repo_path = Path::new("/test/repo");

        let huge = "x".repeat(MAX_LOG_SIZE as usize);
        logger.log_command(&args(&["add", huge.as_str()]), repo_path, 0).unwrap();

        // Second write rotates the oversized file
        logger.log_command(&args(&["status"]), repo_path, 0).unwrap();

        let backup_path = log_path.with_extension("log.1");
        assert!(backup_path.exists());
        assert!(fs::metadata(&log_path).unwrap().len() < MAX_LOG_SIZE);
    }

    #[test]
    fn test_log_validation_failure() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("test.log");

        let logger = AuditLogger::with_path(&log_path).unwrap();
        logger
            .log_validation_failure(
                "remove",
                "called without specifying files or recursive",
                Path::new("/test/repo"),
            )
            .unwrap();

        let content = fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("VALIDATION-REJECTED"));
        assert!(content.contains("operation=\"remove\""));
        assert!(content.contains("without specifying files"));
    }

    #[test]
    fn test_line_breaks_stay_in_one_record() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("test.log");

        let logger = AuditLogger::with_path(&log_path).unwrap();
        let message = "--message='fix\n[2020-01-01T00:00:00+00:00] [root] [/srv] [exit:0] git push --force\r'";
        logger
            .log_command(&args(&["commit", message]), Path::new("/test/repo"), 0)
            .unwrap();

        let content = fs::read_to_string(&log_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("fix\\n[2020-01-01"));
        assert!(lines[0].ends_with("--force\\r'"));
    }
}
