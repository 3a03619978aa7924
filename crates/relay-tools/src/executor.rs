use crate::error::{Result, ToolError};
use crate::registry::ToolRegistry;
use crate::traits::ToolOutput;
use relay_core::Context;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

pub struct ToolExecutor {
    registry: Arc<ToolRegistry>,
    default_timeout: Duration,
}

impl ToolExecutor {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            default_timeout: Duration::from_secs(60),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Looks up `name`, checks `input` against its declared parameters and
    /// runs it. The tool body is never entered when either step fails.
    pub async fn execute(&self, ctx: &Context, name: &str, input: Value) -> Result<ToolOutput> {
        let tool = self
            .registry
            .get(name)
            .ok_or_else(|| ToolError::unknown_tool(name))?;

        let input = if input.is_null() {
            Value::Object(Default::default())
        } else {
            input
        };

        if let Err(violation) = tool.definition().validate(&input) {
            warn!(tool = name, error = %violation, "Rejected tool arguments");
            return Err(ToolError::schema(name, violation));
        }

        info!(tool = name, "Executing tool");

        let execute_timeout = ctx
            .remaining()
            .unwrap_or(self.default_timeout)
            .min(self.default_timeout);

        match timeout(execute_timeout, tool.execute(ctx, input)).await {
            Ok(Ok(output)) => {
                info!(tool = name, is_error = output.is_error, "Tool execution completed");
                Ok(output)
            }
            Ok(Err(e)) => {
                warn!(tool = name, error = %e, "Tool execution failed");
                Err(e)
            }
            Err(_) => {
                warn!(tool = name, timeout_ms = execute_timeout.as_millis() as u64, "Tool execution timed out");
                Err(ToolError::Timeout(execute_timeout.as_millis() as u64))
            }
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }
}
