use crate::error::Result;
use crate::traits::{Tool, ToolOutput};
use async_trait::async_trait;
use relay_core::{Context, ToolDefinition};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::env;

pub struct GetSystemInfoTool {
    def: ToolDefinition,
}

impl GetSystemInfoTool {
    pub fn new() -> Self {
        let def = ToolDefinition::new(
            "get_system_info",
            "Get the operating system, architecture, current directory and process id",
        )
        .with_category("system");
        Self { def }
    }
}

impl Default for GetSystemInfoTool {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Deserialize)]
struct SystemInfo {
    os: String,
    family: String,
    arch: String,
    current_dir: Option<String>,
    pid: u32,
    user: Option<String>,
}

#[async_trait]
impl Tool for GetSystemInfoTool {
    fn definition(&self) -> &ToolDefinition {
        &self.def
    }

    async fn execute(&self, ctx: &Context, _input: Value) -> Result<ToolOutput> {
        let current_dir = ctx
            .working_dir
            .clone()
            .or_else(|| env::current_dir().ok())
            .map(|p| p.to_string_lossy().to_string());

        let info = SystemInfo {
            os: env::consts::OS.to_string(),
            family: env::consts::FAMILY.to_string(),
            arch: env::consts::ARCH.to_string(),
            current_dir,
            pid: std::process::id(),
            user: env::var("USER").ok().or_else(|| env::var("USERNAME").ok()),
        };

        ToolOutput::json(&info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_system_info() {
        let tool = GetSystemInfoTool::new();

        let output = tool.execute(&Context::new(), Value::Null).await.unwrap();
        assert!(!output.is_error);

        let info: SystemInfo = serde_json::from_str(&output.content).unwrap();
        assert_eq!(info.os, env::consts::OS);
        assert!(!info.arch.is_empty());
        assert!(info.pid > 0);
    }

    #[tokio::test]
    async fn test_reports_context_working_dir() {
        let tool = GetSystemInfoTool::new();
        let ctx = Context::new().with_working_dir("/srv/project");

        let output = tool.execute(&ctx, Value::Null).await.unwrap();
        let info: SystemInfo = serde_json::from_str(&output.content).unwrap();
        assert_eq!(info.current_dir.as_deref(), Some("/srv/project"));
    }

    #[test]
    fn test_definition() {
        let tool = GetSystemInfoTool::new();
        assert_eq!(tool.definition().name, "get_system_info");
        assert!(!tool.is_dangerous());
        assert!(tool.definition().params.is_empty());
    }
}
