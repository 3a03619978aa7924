use relay_core::error::Error as CoreError;
use relay_llm::LlmError;
use relay_tools::ToolError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Max iterations reached: {0}")]
    MaxIterationsReached(usize),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

pub type Result<T> = std::result::Result<T, AgentError>;

impl AgentError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
