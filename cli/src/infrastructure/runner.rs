//! External command execution
//!
//! Every external call made by a deploy goes through [`CommandRunner`], so
//! the pipeline can be exercised without touching AWS.

use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::error::ToolError;

/// How a command's standard streams are wired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdioMode {
    /// Stream output straight to the terminal (long-running sync)
    Inherit,
    /// Capture output for inspection (checks, metadata updates)
    Capture,
}

/// A fully-specified external command
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
    pub stdio: StdioMode,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdio: StdioMode::Capture,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn inherit(mut self) -> Self {
        self.stdio = StdioMode::Inherit;
        self
    }

    /// Whether `flag` appears as an argument
    pub fn has_arg(&self, flag: &str) -> bool {
        self.args.iter().any(|a| a == flag)
    }

    /// Value following `flag`, if present
    pub fn arg_value(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    /// Shell-like rendering for logs and dry-run output
    pub fn display(&self) -> String {
        let mut rendered = self.program.clone();
        for arg in &self.args {
            rendered.push(' ');
            if arg.is_empty() || arg.contains(|c: char| c.is_whitespace() || "*?[]\"';&|".contains(c)) {
                rendered.push('"');
                rendered.push_str(&arg.replace('"', "\\\""));
                rendered.push('"');
            } else {
                rendered.push_str(arg);
            }
        }
        rendered
    }
}

/// Result of running a command
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn ok() -> Self {
        Self {
            success: true,
            code: Some(0),
            ..Self::default()
        }
    }

    pub fn failed(code: i32, stderr: &str) -> Self {
        Self {
            success: false,
            code: Some(code),
            stderr: stderr.to_string(),
            ..Self::default()
        }
    }

    /// Short description of why the command failed
    pub fn failure_message(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.lines().last().unwrap_or(stderr).to_string();
        }
        match self.code {
            Some(code) => format!("exited with status {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Executes external commands
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn run(&self, command: &ToolCommand) -> Result<CommandOutput, ToolError>;
}

/// Runs commands as real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn run(&self, command: &ToolCommand) -> Result<CommandOutput, ToolError> {
        debug!("$ {}", command.display());

        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args);

        let spawn_error = |e: std::io::Error| ToolError::SpawnFailed {
            command: command.display(),
            message: e.to_string(),
        };

        match command.stdio {
            StdioMode::Inherit => {
                let status = cmd
                    .stdin(Stdio::null())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()
                    .await
                    .map_err(spawn_error)?;
                Ok(CommandOutput {
                    success: status.success(),
                    code: status.code(),
                    ..CommandOutput::default()
                })
            }
            StdioMode::Capture => {
                let output = cmd
                    .stdin(Stdio::null())
                    .output()
                    .await
                    .map_err(spawn_error)?;
                Ok(CommandOutput {
                    success: output.status.success(),
                    code: output.status.code(),
                    stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                    stderr: String::from_utf8_lossy(&output.stderr).to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_quotes_globs() {
        let cmd = ToolCommand::new("aws").args(["s3", "sync", "--exclude", "*.md"]);
        assert_eq!(cmd.display(), "aws s3 sync --exclude \"*.md\"");
    }

    #[test]
    fn test_display_quotes_spaces() {
        let cmd = ToolCommand::new("aws").args(["--content-type", "text/html; charset=utf-8"]);
        assert_eq!(cmd.display(), "aws --content-type \"text/html; charset=utf-8\"");
    }

    #[test]
    fn test_arg_value() {
        let cmd = ToolCommand::new("aws").args(["--profile", "waves-prod", "--force"]);
        assert_eq!(cmd.arg_value("--profile"), Some("waves-prod"));
        assert_eq!(cmd.arg_value("--force"), None);
        assert!(cmd.has_arg("--force"));
    }

    #[test]
    fn test_failure_message_prefers_stderr() {
        let out = CommandOutput::failed(255, "warning\nAccessDenied: nope\n");
        assert_eq!(out.failure_message(), "AccessDenied: nope");
        assert_eq!(CommandOutput::failed(2, "").failure_message(), "exited with status 2");
    }

    #[tokio::test]
    async fn test_system_runner_reports_spawn_failure() {
        let cmd = ToolCommand::new("/nonexistent/waves-tool-binary");
        let err = SystemRunner.run(&cmd).await.unwrap_err();
        assert!(matches!(err, ToolError::SpawnFailed { .. }));
    }
}
