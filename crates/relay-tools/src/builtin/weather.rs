use crate::error::Result;
use crate::traits::{parse_input, Tool, ToolOutput};
use async_trait::async_trait;
use relay_core::{Context, ToolDefinition, ToolParameter};
use serde::Deserialize;
use serde_json::Value;

const DEFAULT_WEATHER: &str = "Sunny, 72°F (22°C)";

/// Canned conditions; lookup is exact and case-sensitive.
const WEATHER: [(&str, &str); 4] = [
    ("San Francisco", "Foggy, 58°F (14°C)"),
    ("New York", "Sunny, 75°F (24°C)"),
    ("London", "Rainy, 55°F (13°C)"),
    ("Tokyo", "Clear, 72°F (22°C)"),
];

/// Mock weather lookup for demonstrations. Never touches the network.
pub struct WeatherInfoTool {
    def: ToolDefinition,
}

impl WeatherInfoTool {
    pub fn new() -> Self {
        let def = ToolDefinition::new(
            "weather_info",
            "Get weather information for a location (mock data)",
        )
        .with_required_param(
            "location",
            ToolParameter::string().with_description("City or location name"),
        )
        .with_category("demo");
        Self { def }
    }
}

impl Default for WeatherInfoTool {
    fn default() -> Self {
        Self::new()
    }
}

pub fn weather_for(location: &str) -> String {
    let entry = WEATHER
        .iter()
        .find(|(city, _)| *city == location)
        .map(|(_, w)| *w)
        .unwrap_or(DEFAULT_WEATHER);
    format!("Weather in {}: {}", location, entry)
}

#[derive(Deserialize)]
struct WeatherInput {
    location: String,
}

#[async_trait]
impl Tool for WeatherInfoTool {
    fn definition(&self) -> &ToolDefinition {
        &self.def
    }

    async fn execute(&self, _ctx: &Context, input: Value) -> Result<ToolOutput> {
        let input: WeatherInput = parse_input(self.name(), input)?;
        Ok(ToolOutput::text(weather_for(&input.location)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_cities() {
        assert_eq!(weather_for("Tokyo"), "Weather in Tokyo: Clear, 72°F (22°C)");
        assert_eq!(weather_for("London"), "Weather in London: Rainy, 55°F (13°C)");
    }

    #[test]
    fn test_default_is_stable_and_case_sensitive() {
        let first = weather_for("Atlantis");
        assert_eq!(first, "Weather in Atlantis: Sunny, 72°F (22°C)");
        assert_eq!(weather_for("Atlantis"), first);
        assert_eq!(weather_for("tokyo"), "Weather in tokyo: Sunny, 72°F (22°C)");
    }

    #[tokio::test]
    async fn test_tool() {
        let output = WeatherInfoTool::new()
            .execute(&Context::new(), json!({"location": "San Francisco"}))
            .await
            .unwrap();
        assert!(output.content.contains("Foggy, 58°F (14°C)"));
    }
}
