//! AWS Bedrock client over the non-streaming Converse API.

use super::sigv4::{self, SigningKeys};
use crate::error::{LlmError, Result};
use crate::traits::LlmProvider;
use crate::types::{CompletionRequest, CompletionResponse, StopReason};
use async_trait::async_trait;
use chrono::Utc;
use relay_core::message::{ContentBlock, ToolUse};
use relay_core::provider::DEFAULT_BEDROCK_REGION;
use relay_core::{Message, Role, TokenUsage};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

const SERVICE: &str = "bedrock";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

pub struct BedrockProvider {
    client: Client,
    access_key_id: String,
    secret_access_key: String,
    session_token: Option<String>,
    region: String,
    default_model: String,
}

impl BedrockProvider {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
            region: DEFAULT_BEDROCK_REGION.to_string(),
            default_model: model.into(),
        })
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    fn host(&self) -> String {
        format!("bedrock-runtime.{}.amazonaws.com", self.region)
    }

    fn converse_path(model: &str) -> String {
        format!("/model/{}/converse", sigv4::urlencoded(model))
    }

    fn build_body(&self, request: &CompletionRequest) -> Value {
        let mut system_parts: Vec<Value> = Vec::new();
        if let Some(sys) = &request.system {
            system_parts.push(json!({ "text": sys }));
        }

        let mut messages: Vec<Value> = Vec::new();
        for m in &request.messages {
            if m.role == Role::System {
                system_parts.push(json!({ "text": m.text_content() }));
                continue;
            }
            let role = match m.role {
                Role::Assistant => "assistant",
                _ => "user",
            };
            let content: Vec<Value> = m.content.iter().filter_map(convert_block).collect();
            if content.is_empty() {
                continue;
            }
            messages.push(json!({ "role": role, "content": content }));
        }

        let mut inference = json!({});
        if let Some(max_tokens) = request.max_tokens {
            inference["maxTokens"] = max_tokens.into();
        }
        if let Some(temp) = request.temperature {
            inference["temperature"] = temp.into();
        }
        if let Some(top_p) = request.top_p {
            inference["topP"] = top_p.into();
        }
        if let Some(stop) = &request.stop {
            inference["stopSequences"] = stop.clone().into();
        }

        let mut body = json!({
            "messages": messages,
            "inferenceConfig": inference,
        });
        if !system_parts.is_empty() {
            body["system"] = json!(system_parts);
        }
        if !request.tools.is_empty() {
            let tools: Vec<Value> = request
                .tools
                .iter()
                .map(|t| {
                    json!({
                        "toolSpec": {
                            "name": t.name,
                            "description": t.description,
                            "inputSchema": { "json": t.input_schema() },
                        }
                    })
                })
                .collect();
            body["toolConfig"] = json!({ "tools": tools });
        }
        body
    }
}

fn convert_block(block: &ContentBlock) -> Option<Value> {
    match block {
        ContentBlock::Text { text } if text.is_empty() => None,
        ContentBlock::Text { text } => Some(json!({ "text": text })),
        ContentBlock::ToolUse(tu) => Some(json!({
            "toolUse": {
                "toolUseId": tu.id,
                "name": tu.name,
                "input": tu.input,
            }
        })),
        ContentBlock::ToolResult(tr) => Some(json!({
            "toolResult": {
                "toolUseId": tr.tool_use_id,
                "content": [{ "text": tr.content }],
                "status": if tr.is_error { "error" } else { "success" },
            }
        })),
    }
}

fn parse_converse(model: &str, body: &Value) -> Result<CompletionResponse> {
    let content = body["output"]["message"]["content"]
        .as_array()
        .ok_or_else(|| LlmError::invalid_response("Converse response has no output message"))?;

    let mut blocks = Vec::new();
    for part in content {
        if let Some(text) = part["text"].as_str() {
            if !text.is_empty() {
                blocks.push(ContentBlock::text(text));
            }
        }
        if let Some(tu) = part.get("toolUse") {
            let id = tu["toolUseId"]
                .as_str()
                .ok_or_else(|| LlmError::invalid_response("toolUse block without toolUseId"))?;
            let name = tu["name"]
                .as_str()
                .ok_or_else(|| LlmError::invalid_response("toolUse block without name"))?;
            blocks.push(ContentBlock::ToolUse(ToolUse::new(
                id,
                name,
                tu["input"].clone(),
            )));
        }
    }

    let message = Message::new(Role::Assistant, blocks);

    let stop_reason = match body["stopReason"].as_str() {
        Some("tool_use") => StopReason::ToolUse,
        Some("max_tokens") => StopReason::MaxTokens,
        Some("stop_sequence") => StopReason::StopSequence,
        _ if message.has_tool_use() => StopReason::ToolUse,
        _ => StopReason::EndTurn,
    };

    let usage = TokenUsage::new(
        body["usage"]["inputTokens"].as_u64().unwrap_or(0) as u32,
        body["usage"]["outputTokens"].as_u64().unwrap_or(0) as u32,
    );

    let id = body["ResponseMetadata"]["RequestId"]
        .as_str()
        .unwrap_or_default()
        .to_string();

    Ok(CompletionResponse::new(id, model, message)
        .with_usage(usage)
        .with_stop_reason(stop_reason))
}

#[async_trait]
impl LlmProvider for BedrockProvider {
    fn name(&self) -> &str {
        "bedrock"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let body_bytes = serde_json::to_vec(&self.build_body(&request))?;
        let host = self.host();
        let path = Self::converse_path(&request.model);

        debug!(model = %request.model, region = %self.region, "Sending Bedrock converse request");

        let keys = SigningKeys {
            access_key_id: &self.access_key_id,
            secret_access_key: &self.secret_access_key,
            session_token: self.session_token.as_deref(),
        };
        let signed = sigv4::sign_post(&keys, &self.region, SERVICE, &host, &path, &body_bytes, Utc::now())?;

        let mut builder = self
            .client
            .post(format!("https://{}{}", host, path))
            .header("authorization", &signed.authorization)
            .body(body_bytes);
        for (name, value) in &signed.headers {
            builder = builder.header(*name, value);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| LlmError::network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::from_status("bedrock", status, &text));
        }

        let body: Value = response.json().await?;
        parse_converse(&request.model, &body)
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_core::{ToolDefinition, ToolParameter, ToolResult};

    fn provider() -> BedrockProvider {
        BedrockProvider::new("AKID", "secret", "us.anthropic.claude-sonnet-4-5-20250929-v1:0")
            .unwrap()
    }

    #[test]
    fn test_defaults_and_paths() {
        let p = provider().with_region("eu-west-1");
        assert_eq!(p.name(), "bedrock");
        assert_eq!(p.region(), "eu-west-1");
        assert_eq!(p.host(), "bedrock-runtime.eu-west-1.amazonaws.com");
        assert_eq!(
            BedrockProvider::converse_path(p.default_model()),
            "/model/us.anthropic.claude-sonnet-4-5-20250929-v1%3A0/converse"
        );
        assert_eq!(provider().region(), "us-east-2");
    }

    #[test]
    fn test_build_body() {
        let call = Message::new(
            Role::Assistant,
            vec![ContentBlock::ToolUse(ToolUse::new(
                "t1",
                "get_system_info",
                json!({}),
            ))],
        );
        let req = CompletionRequest::new("m", vec![
            Message::user("What OS?"),
            call,
            Message::tool(vec![ToolResult::error("t1", "boom")]),
        ])
        .with_system("Be brief")
        .with_max_tokens(2000)
        .with_temperature(0.7)
        .with_tools(vec![ToolDefinition::new("get_system_info", "OS details")
            .with_param("verbose", ToolParameter::boolean())]);

        let body = provider().build_body(&req);

        assert_eq!(body["system"][0]["text"], "Be brief");
        assert_eq!(body["inferenceConfig"]["maxTokens"], 2000);
        assert_eq!(body["messages"].as_array().unwrap().len(), 3);
        assert_eq!(body["messages"][1]["role"], "assistant");
        assert_eq!(body["messages"][1]["content"][0]["toolUse"]["toolUseId"], "t1");
        assert_eq!(body["messages"][2]["role"], "user");
        assert_eq!(body["messages"][2]["content"][0]["toolResult"]["status"], "error");
        assert_eq!(
            body["toolConfig"]["tools"][0]["toolSpec"]["inputSchema"]["json"]["type"],
            "object"
        );
    }

    #[test]
    fn test_parse_converse_tool_use() {
        let body = json!({
            "output": {"message": {"role": "assistant", "content": [
                {"text": "Let me check."},
                {"toolUse": {"toolUseId": "tu-1", "name": "shell", "input": {"command": "uname"}}}
            ]}},
            "stopReason": "tool_use",
            "usage": {"inputTokens": 40, "outputTokens": 11, "totalTokens": 51}
        });

        let resp = parse_converse("m", &body).unwrap();
        assert_eq!(resp.text_content(), "Let me check.");
        assert_eq!(resp.stop_reason, Some(StopReason::ToolUse));
        assert_eq!(resp.usage, TokenUsage::new(40, 11));
        assert_eq!(resp.message.tool_uses()[0].input["command"], "uname");
    }

    #[test]
    fn test_parse_converse_missing_output() {
        let err = parse_converse("m", &json!({"message": "throttled"})).unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse(_)));
    }
}
