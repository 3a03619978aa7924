use relay_core::error::Error as CoreError;
use relay_core::tool::SchemaViolation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Tool already registered: {0}")]
    AlreadyRegistered(String),

    #[error("Bad arguments for {tool}: {reason}")]
    BadArguments { tool: String, reason: String },

    #[error("Execution failed: {tool} - {message}")]
    ExecutionFailed { tool: String, message: String },

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type Result<T> = std::result::Result<T, ToolError>;

impl ToolError {
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    pub fn bad_arguments(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::BadArguments {
            tool: tool.into(),
            reason: reason.into(),
        }
    }

    pub fn schema(tool: impl Into<String>, violation: SchemaViolation) -> Self {
        Self::bad_arguments(tool, violation.to_string())
    }

    pub fn execution_failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExecutionFailed {
            tool: tool.into(),
            message: message.into(),
        }
    }
}
