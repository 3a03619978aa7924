use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonSchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
}

impl JsonSchemaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JsonSchemaType::String => "string",
            JsonSchemaType::Number => "number",
            JsonSchemaType::Integer => "integer",
            JsonSchemaType::Boolean => "boolean",
            JsonSchemaType::Array => "array",
            JsonSchemaType::Object => "object",
            JsonSchemaType::Null => "null",
        }
    }

    /// `integer` accepts any integral number, including `2.0`.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            JsonSchemaType::String => value.is_string(),
            JsonSchemaType::Number => value.is_number(),
            JsonSchemaType::Integer => {
                value.is_i64()
                    || value.is_u64()
                    || value.as_f64().map_or(false, |f| f.is_finite() && f.fract() == 0.0)
            }
            JsonSchemaType::Boolean => value.is_boolean(),
            JsonSchemaType::Array => value.is_array(),
            JsonSchemaType::Object => value.is_object(),
            JsonSchemaType::Null => value.is_null(),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolParameter {
    #[serde(rename = "type")]
    pub schema_type: JsonSchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ToolParameter>>,
}

impl ToolParameter {
    fn of(schema_type: JsonSchemaType) -> Self {
        Self {
            schema_type,
            description: None,
            default: None,
            enum_values: None,
            items: None,
        }
    }

    pub fn string() -> Self {
        Self::of(JsonSchemaType::String)
    }

    pub fn number() -> Self {
        Self::of(JsonSchemaType::Number)
    }

    pub fn integer() -> Self {
        Self::of(JsonSchemaType::Integer)
    }

    pub fn boolean() -> Self {
        Self::of(JsonSchemaType::Boolean)
    }

    pub fn object() -> Self {
        Self::of(JsonSchemaType::Object)
    }

    pub fn array(items: ToolParameter) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of(JsonSchemaType::Array)
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_enum(mut self, values: Vec<Value>) -> Self {
        self.enum_values = Some(values);
        self
    }

    fn check(&self, name: &str, value: &Value) -> Result<(), SchemaViolation> {
        if !self.schema_type.matches(value) {
            return Err(SchemaViolation::WrongType {
                name: name.to_string(),
                expected: self.schema_type.as_str(),
                found: json_type_name(value),
            });
        }
        if let Some(allowed) = &self.enum_values {
            if !allowed.contains(value) {
                return Err(SchemaViolation::NotAllowed {
                    name: name.to_string(),
                    value: value.to_string(),
                });
            }
        }
        if let (Some(items), Value::Array(elements)) = (&self.items, value) {
            for (i, element) in elements.iter().enumerate() {
                items.check(&format!("{}[{}]", name, i), element)?;
            }
        }
        Ok(())
    }
}

/// One declared input of a tool. Declaration order is preserved.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    #[serde(flatten)]
    pub param: ToolParameter,
    #[serde(default)]
    pub required: bool,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    #[error("arguments must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("missing required parameter '{0}'")]
    MissingParam(String),

    #[error("unexpected parameter '{0}'")]
    UnknownParam(String),

    #[error("parameter '{name}' must be {expected}, got {found}")]
    WrongType {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("parameter '{name}' does not allow value {value}")]
    NotAllowed { name: String, value: String },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub params: Vec<ParamSpec>,
    #[serde(default)]
    pub dangerous: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
            dangerous: false,
            category: None,
        }
    }

    pub fn with_param(self, name: impl Into<String>, param: ToolParameter) -> Self {
        self.push_param(name.into(), param, false)
    }

    pub fn with_required_param(self, name: impl Into<String>, param: ToolParameter) -> Self {
        self.push_param(name.into(), param, true)
    }

    fn push_param(mut self, name: String, param: ToolParameter, required: bool) -> Self {
        self.params.retain(|p| p.name != name);
        self.params.push(ParamSpec {
            name,
            param,
            required,
        });
        self
    }

    pub fn dangerous(mut self) -> Self {
        self.dangerous = true;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn required_params(&self) -> impl Iterator<Item = &str> {
        self.params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
    }

    /// JSON Schema object handed to model providers.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        for spec in &self.params {
            let value = serde_json::to_value(&spec.param).unwrap_or_else(|_| json!({}));
            properties.insert(spec.name.clone(), value);
        }
        json!({
            "type": "object",
            "properties": properties,
            "required": self.required_params().collect::<Vec<_>>(),
        })
    }

    /// Checks `input` against the declared parameters.
    ///
    /// `null` counts as an empty object, and an explicit `null` for an
    /// optional parameter counts as absent.
    pub fn validate(&self, input: &Value) -> Result<(), SchemaViolation> {
        let empty = Map::new();
        let args = match input {
            Value::Null => &empty,
            Value::Object(map) => map,
            other => return Err(SchemaViolation::NotAnObject(json_type_name(other))),
        };

        for key in args.keys() {
            if self.param(key).is_none() {
                return Err(SchemaViolation::UnknownParam(key.clone()));
            }
        }

        for spec in &self.params {
            match args.get(&spec.name) {
                None | Some(Value::Null) if spec.required => {
                    return Err(SchemaViolation::MissingParam(spec.name.clone()));
                }
                None | Some(Value::Null) => {}
                Some(value) => spec.param.check(&spec.name, value)?,
            }
        }

        Ok(())
    }
}
