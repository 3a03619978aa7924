use crate::error::{Result, ToolError};
use async_trait::async_trait;
use relay_core::{Context, Metadata, ToolDefinition};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What a tool hands back to the model. Domain failures are carried with
/// `is_error` set rather than as an `Err`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ToolOutput {
    pub content: String,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
    #[serde(default)]
    pub is_error: bool,
}

impl ToolOutput {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: Metadata::new(),
            is_error: false,
        }
    }

    pub fn json<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Self::text(serde_json::to_string_pretty(value)?))
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: message.into(),
            metadata: Metadata::new(),
            is_error: true,
        }
    }

    pub fn with_metadata<K: Into<String>, V: Serialize>(mut self, key: K, value: V) -> Self {
        self.metadata.insert(key, value);
        self
    }
}

#[async_trait]
pub trait Tool: Send + Sync {
    fn definition(&self) -> &ToolDefinition;

    async fn execute(&self, ctx: &Context, input: Value) -> Result<ToolOutput>;

    fn name(&self) -> &str {
        &self.definition().name
    }

    fn is_dangerous(&self) -> bool {
        self.definition().dangerous
    }
}

/// Deserializes tool input, treating `null` as `{}`.
pub fn parse_input<T: DeserializeOwned>(tool: &str, input: Value) -> Result<T> {
    let input = if input.is_null() {
        Value::Object(Default::default())
    } else {
        input
    };
    serde_json::from_value(input).map_err(|e| ToolError::bad_arguments(tool, e.to_string()))
}
