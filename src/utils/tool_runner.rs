use crate::utils::{Error, Result};
use std::ffi::OsStr;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, error, warn};

/// Runs an external executable with a timeout and captured output.
#[derive(Debug, Clone)]
pub struct ToolRunner {
    tool_path: String,
    timeout: Duration,
    /// Exit code that still counts as success, but with warnings.
    warning_exit_code: Option<i32>,
}

impl ToolRunner {
    pub fn new(tool_path: String, timeout_seconds: u64) -> Self {
        Self {
            tool_path,
            timeout: Duration::from_secs(timeout_seconds),
            warning_exit_code: None,
        }
    }

    pub fn with_warning_exit_code(mut self, code: i32) -> Self {
        self.warning_exit_code = Some(code);
        self
    }

    pub fn tool_path(&self) -> &str {
        &self.tool_path
    }

    pub async fn check_availability(
        &self,
        version_arg: &str,
        expected_output: &str,
    ) -> Result<String> {
        debug!("Checking tool availability at: {}", self.tool_path);

        let output = Command::new(&self.tool_path)
            .arg(version_arg)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| Error::tool(format!("Failed to run {}: {}", self.tool_path, e)))?;

        if !output.status.success() {
            return Err(Error::tool(format!(
                "{} check failed with exit code: {}",
                self.tool_path, output.status
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.contains(expected_output) {
            return Err(Error::tool(format!(
                "{} does not look like {} (version output: {})",
                self.tool_path,
                expected_output,
                stdout.trim()
            )));
        }

        let version = stdout.lines().next().unwrap_or_default().trim().to_string();
        debug!("Tool is available: {}", version);
        Ok(version)
    }

    /// Runs the tool and returns its stdout.
    ///
    /// When `output_file` is given, the call only succeeds if the tool
    /// actually produced that file.
    pub async fn run<A: AsRef<OsStr>>(
        &self,
        args: &[A],
        output_file: Option<&Path>,
    ) -> Result<String> {
        let mut command = Command::new(&self.tool_path);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(
            "Running: {} {}",
            self.tool_path,
            args.iter()
                .map(|a| a.as_ref().to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let child = command
            .spawn()
            .map_err(|e| Error::tool(format!("Failed to spawn {}: {}", self.tool_path, e)))?;

        // Dropping the future on timeout kills the child.
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                Error::tool(format!(
                    "{} timed out after {} seconds",
                    self.tool_path,
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| Error::tool(format!("{} failed: {}", self.tool_path, e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let code = output.status.code();

        if !output.status.success() {
            if code.is_some() && code == self.warning_exit_code {
                warn!("{} completed with warnings", self.tool_path);
                for line in stdout.lines().filter(|l| l.starts_with("Warning")) {
                    warn!("  {}", line);
                }
            } else {
                let stderr = String::from_utf8_lossy(&output.stderr);

                error!("{} failed:", self.tool_path);
                error!("Exit code: {}", output.status);
                error!("Stdout: {}", stdout.trim());
                error!("Stderr: {}", stderr.trim());

                // mkvmerge reports its errors on stdout
                let detail = if stderr.trim().is_empty() {
                    stdout.trim().to_string()
                } else {
                    stderr.trim().to_string()
                };
                return Err(Error::tool(format!(
                    "{} failed with exit code {}: {}",
                    self.tool_path, output.status, detail
                )));
            }
        }

        if let Some(file) = output_file {
            if !file.exists() {
                return Err(Error::tool(format!(
                    "{} completed but output file not found: {}",
                    self.tool_path,
                    file.display()
                )));
            }
        }

        debug!("Tool output: {} bytes", stdout.len());
        Ok(stdout)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_tool_is_tool_error() {
        let runner = ToolRunner::new("/nonexistent/mkvmerge".to_string(), 5);
        let result = runner.check_availability("--version", "mkvmerge").await;
        assert!(matches!(result, Err(Error::Tool { .. })));
    }

    #[tokio::test]
    async fn test_run_captures_stdout() {
        let runner = ToolRunner::new("echo".to_string(), 5);
        let stdout = runner.run(&["hello".to_string()], None).await.unwrap();
        assert_eq!(stdout.trim(), "hello");
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_error() {
        let runner = ToolRunner::new("false".to_string(), 5);
        assert!(runner.run::<&str>(&[], None).await.is_err());
    }

    #[tokio::test]
    async fn test_warning_exit_code_is_success() {
        let runner = ToolRunner::new("sh".to_string(), 5).with_warning_exit_code(1);
        let args = vec!["-c".to_string(), "echo 'Warning: odd'; exit 1".to_string()];
        assert!(runner.run(&args, None).await.is_ok());

        let args = vec!["-c".to_string(), "exit 2".to_string()];
        assert!(runner.run(&args, None).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_output_file_is_error() {
        let runner = ToolRunner::new("true".to_string(), 5);
        let missing = Path::new("/nonexistent/output.mkv");
        assert!(runner.run::<&str>(&[], Some(missing)).await.is_err());
    }

    #[tokio::test]
    async fn test_timeout_is_error() {
        let runner = ToolRunner::new("sleep".to_string(), 1);
        let result = runner.run(&["5".to_string()], None).await;
        assert!(matches!(result, Err(Error::Tool { message }) if message.contains("timed out")));
    }
}
