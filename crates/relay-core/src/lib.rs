pub mod config;
pub mod context;
pub mod error;
pub mod message;
pub mod provider;
pub mod tool;
pub mod types;

pub use config::Config;
pub use context::Context;
pub use error::{ConfigError, Error, Result};
pub use message::{ContentBlock, Message, Role, ToolResult, ToolUse};
pub use provider::{Backend, EnvSource, ProcessEnv, ProviderConfig};
pub use tool::{SchemaViolation, ToolDefinition, ToolParameter};
pub use types::{Id, MessageId, Metadata, RequestId, SessionId, Timestamp, TokenUsage};

pub mod prelude {
    pub use crate::config::Config;
    pub use crate::context::Context;
    pub use crate::error::{ConfigError, Error, Result};
    pub use crate::message::{ContentBlock, Message, Role, ToolResult, ToolUse};
    pub use crate::provider::{resolve, Backend, EnvSource, ProcessEnv, ProviderConfig};
    pub use crate::tool::{SchemaViolation, ToolDefinition, ToolParameter};
    pub use crate::types::{Id, Metadata, SessionId, Timestamp, TokenUsage};
}
