use crate::error::Result;
use crate::traits::{parse_input, Tool, ToolOutput};
use async_trait::async_trait;
use relay_core::{Context, ToolDefinition, ToolParameter};
use serde::Deserialize;
use serde_json::{json, Value};

const OPERATIONS: [&str; 6] = ["add", "subtract", "multiply", "divide", "power", "modulo"];

pub struct CalculatorTool {
    def: ToolDefinition,
}

impl CalculatorTool {
    pub fn new() -> Self {
        let def = ToolDefinition::new(
            "calculator",
            "Perform an arithmetic operation on two numbers",
        )
        .with_required_param(
            "operation",
            ToolParameter::string()
                .with_description("One of add, subtract, multiply, divide, power, modulo")
                .with_enum(OPERATIONS.iter().map(|op| json!(op)).collect()),
        )
        .with_required_param("a", ToolParameter::number().with_description("Left operand"))
        .with_required_param("b", ToolParameter::number().with_description("Right operand"))
        .with_category("math");
        Self { def }
    }
}

impl Default for CalculatorTool {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct CalculatorInput {
    operation: String,
    a: f64,
    b: f64,
}

fn evaluate(operation: &str, a: f64, b: f64) -> std::result::Result<(f64, &'static str), String> {
    let (result, symbol) = match operation {
        "add" => (a + b, "+"),
        "subtract" => (a - b, "-"),
        "multiply" => (a * b, "*"),
        "divide" if b == 0.0 => return Err("Division by zero".into()),
        "divide" => (a / b, "/"),
        "power" => (a.powf(b), "^"),
        "modulo" if b == 0.0 => return Err("Modulo by zero".into()),
        "modulo" => (a % b, "%"),
        other => return Err(format!("Unsupported operation: {}", other)),
    };
    if !result.is_finite() {
        return Err(format!("Result of {} {} {} is not a finite number", a, symbol, b));
    }
    Ok((result, symbol))
}

#[async_trait]
impl Tool for CalculatorTool {
    fn definition(&self) -> &ToolDefinition {
        &self.def
    }

    async fn execute(&self, _ctx: &Context, input: Value) -> Result<ToolOutput> {
        let input: CalculatorInput = parse_input(self.name(), input)?;

        match evaluate(&input.operation, input.a, input.b) {
            Ok((result, symbol)) => Ok(ToolOutput::text(format!(
                "{} {} {} = {}",
                input.a, symbol, input.b, result
            ))
            .with_metadata("result", result)),
            Err(message) => Ok(ToolOutput::error(message)),
        }
    }
}
