mod loader;
mod types;

pub use loader::LOG_LEVEL_VAR;
pub use types::{AgentDefaults, Config, GeneralConfig, LogLevel, ToolsConfig};
