use crate::error::Result;
use crate::traits::{parse_input, Tool, ToolOutput};
use async_trait::async_trait;
use chrono::{Local, SecondsFormat, Utc};
use relay_core::{Context, ToolDefinition, ToolParameter};
use serde::Deserialize;
use serde_json::Value;

pub struct CurrentTimeTool {
    def: ToolDefinition,
}

impl CurrentTimeTool {
    pub fn new() -> Self {
        let def = ToolDefinition::new("current_time", "Get the current date and time in RFC 3339")
            .with_param(
                "timezone",
                ToolParameter::string()
                    .with_description("UTC or local (default: UTC)")
                    .with_default(Value::String("UTC".into())),
            )
            .with_category("time");
        Self { def }
    }
}

impl Default for CurrentTimeTool {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct CurrentTimeInput {
    timezone: Option<String>,
}

#[async_trait]
impl Tool for CurrentTimeTool {
    fn definition(&self) -> &ToolDefinition {
        &self.def
    }

    async fn execute(&self, _ctx: &Context, input: Value) -> Result<ToolOutput> {
        let input: CurrentTimeInput = parse_input(self.name(), input)?;
        let zone = input.timezone.unwrap_or_else(|| "UTC".to_string());

        let now = match zone.trim().to_lowercase().as_str() {
            "utc" | "z" => Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            "local" => Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
            _ => {
                return Ok(ToolOutput::error(format!(
                    "Unsupported timezone '{}': use UTC or local",
                    zone
                )))
            }
        };

        Ok(ToolOutput::text(now).with_metadata("timezone", zone))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use serde_json::json;

    #[tokio::test]
    async fn test_utc_default() {
        let output = CurrentTimeTool::new()
            .execute(&Context::new(), Value::Null)
            .await
            .unwrap();

        assert!(!output.is_error);
        assert!(output.content.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(&output.content).is_ok());
    }

    #[tokio::test]
    async fn test_local() {
        let output = CurrentTimeTool::new()
            .execute(&Context::new(), json!({"timezone": "Local"}))
            .await
            .unwrap();
        assert!(DateTime::parse_from_rfc3339(&output.content).is_ok());
    }

    #[tokio::test]
    async fn test_unknown_zone() {
        let output = CurrentTimeTool::new()
            .execute(&Context::new(), json!({"timezone": "Mars/Olympus"}))
            .await
            .unwrap();
        assert!(output.is_error);
    }
}
