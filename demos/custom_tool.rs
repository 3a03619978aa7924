//! Custom tool example
//!
//! Run with: cargo run --example custom_tool

use async_trait::async_trait;
use relay_agent::{run, Agent, InvocationRequest};
use relay_core::{provider, Context, ProcessEnv, ToolDefinition, ToolParameter};
use relay_tools::{parse_input, Result, Tool, ToolOutput, ToolRegistry};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Converts temperatures between Celsius and Fahrenheit
struct TemperatureTool {
    def: ToolDefinition,
}

impl TemperatureTool {
    fn new() -> Self {
        let def = ToolDefinition::new("convert_temperature", "Convert a temperature between units")
            .with_required_param("value", ToolParameter::number().with_description("Temperature"))
            .with_required_param(
                "to",
                ToolParameter::string()
                    .with_description("Target unit")
                    .with_enum(vec!["celsius".into(), "fahrenheit".into()]),
            );
        Self { def }
    }
}

#[derive(Deserialize)]
struct TemperatureInput {
    value: f64,
    to: String,
}

#[async_trait]
impl Tool for TemperatureTool {
    fn definition(&self) -> &ToolDefinition {
        &self.def
    }

    async fn execute(&self, _ctx: &Context, input: Value) -> Result<ToolOutput> {
        let input: TemperatureInput = parse_input(self.name(), input)?;

        let converted = match input.to.as_str() {
            "celsius" => (input.value - 32.0) * 5.0 / 9.0,
            _ => input.value * 9.0 / 5.0 + 32.0,
        };

        Ok(ToolOutput::text(format!("{:.1} {}", converted, input.to)))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let provider = provider::resolve(&ProcessEnv)?;
    let llm = relay_llm::from_config(&provider)?;

    let registry = ToolRegistry::register([Arc::new(TemperatureTool::new()) as Arc<dyn Tool>])?;

    let agent = Agent::builder()
        .system_prompt("You are a weather assistant. Use the converter for unit conversions.")
        .model(provider.model())
        .llm(llm)
        .tool_registry(Arc::new(registry))
        .build()?;

    let result = run(&agent, &InvocationRequest::new("What is 72°F in Celsius?")).await?;

    println!("Response: {}", result.message);

    for tc in &result.tool_calls {
        println!("Tool: {} -> {}", tc.name, tc.output);
    }

    Ok(())
}
