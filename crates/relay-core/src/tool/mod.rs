mod schema;

pub use schema::{JsonSchemaType, ParamSpec, SchemaViolation, ToolDefinition, ToolParameter};
