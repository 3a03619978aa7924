use crate::error::Result;
use crate::traits::{parse_input, Tool, ToolOutput};
use async_trait::async_trait;
use relay_core::{Context, ToolDefinition, ToolParameter};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

pub struct ExecuteShellTool {
    def: ToolDefinition,
    default_timeout: Duration,
}

impl ExecuteShellTool {
    pub fn new() -> Self {
        let def = ToolDefinition::new("execute_shell", "Execute a shell command")
            .with_required_param(
                "command",
                ToolParameter::string().with_description("The shell command to execute"),
            )
            .with_param(
                "working_dir",
                ToolParameter::string().with_description("Working directory for the command"),
            )
            .with_param(
                "timeout_ms",
                ToolParameter::integer()
                    .with_description("Timeout in milliseconds (default: 60000)")
                    .with_default(Value::Number(60000.into())),
            )
            .with_category("system")
            .dangerous();
        Self {
            def,
            default_timeout: Duration::from_secs(60),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }
}

impl Default for ExecuteShellTool {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct ExecuteShellInput {
    command: String,
    working_dir: Option<String>,
    timeout_ms: Option<u64>,
}

#[derive(Serialize, Deserialize)]
struct ShellOutput {
    exit_code: Option<i32>,
    stdout: String,
    stderr: String,
    success: bool,
}

#[async_trait]
impl Tool for ExecuteShellTool {
    fn definition(&self) -> &ToolDefinition {
        &self.def
    }

    async fn execute(&self, ctx: &Context, input: Value) -> Result<ToolOutput> {
        let input: ExecuteShellInput = parse_input(self.name(), input)?;

        let (shell, flag) = if cfg!(target_os = "windows") {
            ("cmd", "/C")
        } else {
            ("sh", "-c")
        };

        let mut cmd = Command::new(shell);
        cmd.arg(flag)
            .arg(&input.command)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(Stdio::null())
            .kill_on_drop(true);

        match (&input.working_dir, &ctx.working_dir) {
            (Some(dir), _) => {
                cmd.current_dir(ctx.resolve_path(dir));
            }
            (None, Some(dir)) => {
                cmd.current_dir(dir);
            }
            (None, None) => {}
        }

        let timeout_duration = input
            .timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(self.default_timeout);

        debug!(command = %input.command, timeout_ms = timeout_duration.as_millis() as u64, "Running shell command");

        match timeout(timeout_duration, cmd.output()).await {
            Ok(Ok(out)) => {
                let output = ShellOutput {
                    exit_code: out.status.code(),
                    stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
                    success: out.status.success(),
                };
                let result = ToolOutput::json(&output)?
                    .with_metadata("command", &input.command)
                    .with_metadata("exit_code", output.exit_code.unwrap_or(-1));
                if output.success {
                    Ok(result)
                } else {
                    Ok(ToolOutput {
                        is_error: true,
                        ..result
                    })
                }
            }
            Ok(Err(e)) => Ok(ToolOutput::error(format!("Failed to execute command: {}", e))),
            Err(_) => Ok(ToolOutput::error(format!(
                "Command timed out after {}ms",
                timeout_duration.as_millis()
            ))),
        }
    }
}
