use relay_core::config::AgentDefaults;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default = "default_name")]
    pub name: String,

    pub system_prompt: String,

    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default)]
    pub max_tokens: Option<u32>,

    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    #[serde(default = "default_max_context_messages")]
    pub max_context_messages: usize,

    #[serde(default = "default_tool_timeout_secs")]
    pub tool_timeout_secs: u64,
}

fn default_name() -> String {
    "assistant".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_iterations() -> usize {
    10
}

fn default_max_context_messages() -> usize {
    50
}

fn default_tool_timeout_secs() -> u64 {
    60
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            system_prompt: String::new(),
            model: String::new(),
            temperature: default_temperature(),
            max_tokens: None,
            max_iterations: default_max_iterations(),
            max_context_messages: default_max_context_messages(),
            tool_timeout_secs: default_tool_timeout_secs(),
        }
    }
}

/// Seeds an agent config from the `[agent]` file section. The model and
/// system prompt are left empty for the caller to fill in.
impl From<&AgentDefaults> for AgentConfig {
    fn from(defaults: &AgentDefaults) -> Self {
        Self {
            temperature: defaults.temperature,
            max_tokens: Some(defaults.max_tokens),
            max_iterations: defaults.max_iterations,
            max_context_messages: defaults.max_context_messages,
            ..Default::default()
        }
    }
}

impl AgentConfig {
    pub fn new(model: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system_prompt: system_prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_max_context_messages(mut self, max_messages: usize) -> Self {
        self.max_context_messages = max_messages;
        self
    }

    pub fn with_tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout_secs = timeout.as_secs();
        self
    }

    pub fn tool_timeout(&self) -> Duration {
        Duration::from_secs(self.tool_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = AgentConfig::default();
        assert_eq!(config.name, "assistant");
        assert_eq!(config.max_iterations, 10);
        assert_eq!(config.max_tokens, None);
    }

    #[test]
    fn test_config_builder() {
        let config = AgentConfig::new("gpt-4o", "You are helpful.")
            .with_name("my-agent")
            .with_temperature(0.5)
            .with_max_tokens(1000)
            .with_max_iterations(5);

        assert_eq!(config.name, "my-agent");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.temperature, 0.5);
        assert_eq!(config.max_tokens, Some(1000));
        assert_eq!(config.max_iterations, 5);
    }

    #[test]
    fn test_from_file_defaults() {
        let defaults = AgentDefaults {
            temperature: 0.2,
            max_tokens: 512,
            max_iterations: 4,
            max_context_messages: 20,
        };
        let config = AgentConfig::from(&defaults);
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.max_tokens, Some(512));
        assert_eq!(config.max_iterations, 4);
        assert_eq!(config.max_context_messages, 20);
        assert!(config.model.is_empty());
    }
}
