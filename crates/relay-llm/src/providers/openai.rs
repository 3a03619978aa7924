use crate::error::{LlmError, Result};
use crate::traits::LlmProvider;
use crate::types::{CompletionRequest, CompletionResponse, StopReason};
use async_trait::async_trait;
use relay_core::message::{ContentBlock, ToolUse};
use relay_core::provider::{DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL};
use relay_core::{Message, Role, TokenUsage, ToolDefinition};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AuthStyle {
    /// `Authorization: Bearer <key>`
    Bearer,
    /// `api-key: <key>`, used by Azure OpenAI.
    ApiKeyHeader,
}

/// Chat Completions client for OpenAI and Azure OpenAI deployments.
pub struct OpenAiProvider {
    client: Client,
    name: &'static str,
    api_key: String,
    completions_url: String,
    auth: AuthStyle,
    default_model: String,
    /// Azure routes by deployment in the URL and ignores `model` in the body.
    send_model: bool,
}

impl OpenAiProvider {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_OPENAI_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl AsRef<str>) -> Result<Self> {
        let base = base_url.as_ref().trim_end_matches('/');
        Ok(Self {
            client: build_client()?,
            name: "openai",
            api_key: api_key.into(),
            completions_url: format!("{}/chat/completions", base),
            auth: AuthStyle::Bearer,
            default_model: DEFAULT_OPENAI_MODEL.to_string(),
            send_model: true,
        })
    }

    pub fn azure(
        api_key: impl Into<String>,
        endpoint: &Url,
        api_version: &str,
        deployment: impl Into<String>,
    ) -> Result<Self> {
        let deployment = deployment.into();
        let base = endpoint.as_str().trim_end_matches('/');
        Ok(Self {
            client: build_client()?,
            name: "azure",
            api_key: api_key.into(),
            completions_url: format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                base, deployment, api_version
            ),
            auth: AuthStyle::ApiKeyHeader,
            default_model: deployment,
            send_model: false,
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    pub fn completions_url(&self) -> &str {
        &self.completions_url
    }

    fn convert_messages(&self, messages: &[Message], system: Option<&str>) -> Vec<OpenAiMessage> {
        let mut result = Vec::new();

        if let Some(sys) = system {
            result.push(OpenAiMessage::text("system", sys));
        }

        for msg in messages {
            match msg.role {
                Role::System => result.push(OpenAiMessage::text("system", msg.text_content())),
                Role::User => result.push(OpenAiMessage::text("user", msg.text_content())),
                Role::Assistant => {
                    let tool_calls: Vec<_> = msg
                        .tool_uses()
                        .into_iter()
                        .map(|tu| OpenAiToolCall {
                            id: tu.id.clone(),
                            r#type: "function".to_string(),
                            function: OpenAiFunctionCall {
                                name: tu.name.clone(),
                                arguments: tu.input.to_string(),
                            },
                        })
                        .collect();

                    let text_content = msg.text_content();

                    result.push(OpenAiMessage {
                        role: "assistant".to_string(),
                        content: if text_content.is_empty() {
                            None
                        } else {
                            Some(text_content)
                        },
                        tool_calls: if tool_calls.is_empty() {
                            None
                        } else {
                            Some(tool_calls)
                        },
                        tool_call_id: None,
                    });
                }
                Role::Tool => {
                    for tr in msg.tool_results() {
                        result.push(OpenAiMessage {
                            role: "tool".to_string(),
                            content: Some(tr.content.clone()),
                            tool_calls: None,
                            tool_call_id: Some(tr.tool_use_id.clone()),
                        });
                    }
                }
            }
        }

        result
    }

    fn convert_tools(&self, tools: &[ToolDefinition]) -> Vec<OpenAiTool> {
        tools
            .iter()
            .map(|t| OpenAiTool {
                r#type: "function".to_string(),
                function: OpenAiFunction {
                    name: t.name.clone(),
                    description: Some(t.description.clone()),
                    parameters: t.input_schema(),
                },
            })
            .collect()
    }

    fn build_body(&self, request: &CompletionRequest) -> Result<Value> {
        let messages = self.convert_messages(&request.messages, request.system.as_deref());

        let mut body = serde_json::json!({ "messages": messages });

        if self.send_model {
            body["model"] = request.model.clone().into();
        }
        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = max_tokens.into();
        }
        if let Some(temp) = request.temperature {
            body["temperature"] = temp.into();
        }
        if let Some(top_p) = request.top_p {
            body["top_p"] = top_p.into();
        }
        if let Some(stop) = &request.stop {
            body["stop"] = stop.clone().into();
        }
        if !request.tools.is_empty() {
            body["tools"] = serde_json::to_value(self.convert_tools(&request.tools))?;
        }

        Ok(body)
    }

    fn parse_response(&self, response: OpenAiResponse) -> Result<CompletionResponse> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::invalid_response("No choices in response"))?;

        let mut content_blocks = Vec::new();

        if let Some(text) = choice.message.content {
            if !text.is_empty() {
                content_blocks.push(ContentBlock::text(text));
            }
        }

        if let Some(tool_calls) = choice.message.tool_calls {
            for tc in tool_calls {
                // Unparseable arguments are passed through as a string so the
                // tool's schema check reports them back to the model.
                let input: Value = serde_json::from_str(&tc.function.arguments)
                    .unwrap_or(Value::String(tc.function.arguments));
                content_blocks.push(ContentBlock::ToolUse(ToolUse::new(
                    tc.id,
                    tc.function.name,
                    input,
                )));
            }
        }

        let message = Message::new(Role::Assistant, content_blocks);

        let stop_reason = match choice.finish_reason.as_deref() {
            Some("length") => StopReason::MaxTokens,
            Some("tool_calls") => StopReason::ToolUse,
            _ if message.has_tool_use() => StopReason::ToolUse,
            _ => StopReason::EndTurn,
        };

        let usage = response
            .usage
            .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        Ok(CompletionResponse::new(response.id, response.model, message)
            .with_usage(usage)
            .with_stop_reason(stop_reason))
    }
}

fn build_client() -> Result<Client> {
    Ok(Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        self.name
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let body = self.build_body(&request)?;

        debug!(
            provider = self.name,
            model = %request.model,
            messages = request.messages.len(),
            tools = request.tools.len(),
            "Sending chat completion request"
        );

        let builder = self.client.post(&self.completions_url).json(&body);
        let builder = match self.auth {
            AuthStyle::Bearer => builder.bearer_auth(&self.api_key),
            AuthStyle::ApiKeyHeader => builder.header("api-key", &self.api_key),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| LlmError::network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::from_status(self.name, status, &text));
        }

        let openai_response: OpenAiResponse = response.json().await?;
        self.parse_response(openai_response)
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<OpenAiToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

impl OpenAiMessage {
    fn text(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAiToolCall {
    id: String,
    r#type: String,
    function: OpenAiFunctionCall,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAiFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAiTool {
    r#type: String,
    function: OpenAiFunction,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAiFunction {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    parameters: Value,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    id: String,
    #[serde(default)]
    model: String,
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<OpenAiToolCall>>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_core::{ToolParameter, ToolResult};
    use serde_json::json;

    #[test]
    fn test_provider_creation() {
        let provider = OpenAiProvider::new("test-key").unwrap().with_model("gpt-4");

        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.default_model(), "gpt-4");
        assert_eq!(
            provider.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let provider = OpenAiProvider::with_base_url("k", "http://localhost:11434/v1/").unwrap();
        assert_eq!(
            provider.completions_url(),
            "http://localhost:11434/v1/chat/completions"
        );
    }

    #[test]
    fn test_azure_url_and_body() {
        let endpoint = Url::parse("https://contoso.openai.azure.com/").unwrap();
        let provider =
            OpenAiProvider::azure("az-key", &endpoint, "2024-02-15-preview", "gpt-4").unwrap();

        assert_eq!(provider.name(), "azure");
        assert_eq!(provider.default_model(), "gpt-4");
        assert_eq!(
            provider.completions_url(),
            "https://contoso.openai.azure.com/openai/deployments/gpt-4/chat/completions?api-version=2024-02-15-preview"
        );

        let body = provider
            .build_body(&CompletionRequest::new("gpt-4", vec![Message::user("Hi")]))
            .unwrap();
        assert!(body.get("model").is_none());
    }

    #[test]
    fn test_message_conversion() {
        let provider = OpenAiProvider::new("test-key").unwrap();

        let call = Message::new(
            Role::Assistant,
            vec![ContentBlock::ToolUse(ToolUse::new(
                "call_1",
                "calculator",
                json!({"expression": "2+2"}),
            ))],
        );
        let messages = vec![
            Message::user("Hello"),
            call,
            Message::tool(vec![ToolResult::success("call_1", "4")]),
            Message::assistant("It is 4."),
        ];

        let converted = provider.convert_messages(&messages, Some("You are helpful"));

        assert_eq!(converted.len(), 5);
        assert_eq!(converted[0].role, "system");
        assert_eq!(converted[1].role, "user");
        assert_eq!(converted[2].role, "assistant");
        assert!(converted[2].content.is_none());
        assert_eq!(converted[2].tool_calls.as_ref().unwrap()[0].function.name, "calculator");
        assert_eq!(converted[3].role, "tool");
        assert_eq!(converted[3].tool_call_id.as_deref(), Some("call_1"));
        assert_eq!(converted[4].content.as_deref(), Some("It is 4."));
    }

    #[test]
    fn test_tools_use_input_schema() {
        let provider = OpenAiProvider::new("k").unwrap();
        let req = CompletionRequest::new("gpt-4o", vec![Message::user("x")]).with_tools(vec![
            ToolDefinition::new("read_file", "Read a file")
                .with_required_param("path", ToolParameter::string()),
        ]);

        let body = provider.build_body(&req).unwrap();
        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["tools"][0]["type"], "function");
        assert_eq!(body["tools"][0]["function"]["parameters"]["required"][0], "path");
    }

    #[test]
    fn test_parse_tool_call_response() {
        let provider = OpenAiProvider::new("k").unwrap();
        let raw: OpenAiResponse = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "model": "gpt-4o",
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_9",
                        "type": "function",
                        "function": {"name": "current_time", "arguments": "{}"}
                    }]
                },
                "finish_reason": "tool_calls"
            }],
            "usage": {"prompt_tokens": 12, "completion_tokens": 7}
        }))
        .unwrap();

        let resp = provider.parse_response(raw).unwrap();
        assert_eq!(resp.stop_reason, Some(StopReason::ToolUse));
        assert_eq!(resp.usage, TokenUsage::new(12, 7));
        let uses = resp.message.tool_uses();
        assert_eq!(uses.len(), 1);
        assert_eq!(uses[0].id, "call_9");
        assert_eq!(uses[0].input, json!({}));
    }

    #[test]
    fn test_parse_bad_arguments_kept_raw() {
        let provider = OpenAiProvider::new("k").unwrap();
        let raw: OpenAiResponse = serde_json::from_value(json!({
            "choices": [{
                "message": {
                    "tool_calls": [{
                        "id": "c",
                        "type": "function",
                        "function": {"name": "calculator", "arguments": "{not json"}
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        }))
        .unwrap();

        let resp = provider.parse_response(raw).unwrap();
        assert_eq!(resp.message.tool_uses()[0].input, json!("{not json"));
        assert!(resp.usage.is_empty());
    }

    #[test]
    fn test_parse_empty_choices() {
        let provider = OpenAiProvider::new("k").unwrap();
        let raw: OpenAiResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(matches!(
            provider.parse_response(raw),
            Err(LlmError::InvalidResponse(_))
        ));
    }
}
