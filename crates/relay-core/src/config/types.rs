use serde::{Deserialize, Serialize};

/// File configuration. Provider credentials never come from here; they are
/// read from the environment by [`crate::provider::resolve`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub agent: AgentDefaults,
    #[serde(default)]
    pub tools: ToolsConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

/// Defaults applied to every agent the CLI builds unless a scenario
/// overrides them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentDefaults {
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(default = "default_max_context_messages")]
    pub max_context_messages: usize,
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_max_iterations() -> usize {
    10
}

fn default_max_context_messages() -> usize {
    50
}

impl Default for AgentDefaults {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            max_iterations: default_max_iterations(),
            max_context_messages: default_max_context_messages(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub disabled_tools: Vec<String>,
    #[serde(default = "default_tool_timeout_secs")]
    pub tool_timeout_secs: u64,
    #[serde(default = "default_shell_timeout_secs")]
    pub shell_timeout_secs: u64,
}

fn default_tool_timeout_secs() -> u64 {
    60
}

fn default_shell_timeout_secs() -> u64 {
    60
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            disabled_tools: Vec::new(),
            tool_timeout_secs: default_tool_timeout_secs(),
            shell_timeout_secs: default_shell_timeout_secs(),
        }
    }
}

impl ToolsConfig {
    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled_tools.iter().any(|t| t == name)
    }
}
