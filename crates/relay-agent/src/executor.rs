use crate::config::AgentConfig;
use crate::error::{AgentError, Result};
use crate::response::{AgentMetrics, AgentResponse, ToolCallRecord};
use crate::session::Session;
use relay_core::message::{ContentBlock, ToolResult, ToolUse};
use relay_core::{Context, Message, Role};
use relay_llm::{CompletionRequest, LlmProvider};
use relay_tools::ToolExecutor;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs the model/tool loop for one query.
pub struct Executor {
    config: AgentConfig,
    llm: Arc<dyn LlmProvider>,
    tools: Option<Arc<ToolExecutor>>,
}

impl Executor {
    pub fn new(
        config: AgentConfig,
        llm: Arc<dyn LlmProvider>,
        tools: Option<Arc<ToolExecutor>>,
    ) -> Self {
        Self { config, llm, tools }
    }

    pub async fn execute(&self, session: &mut Session, user_input: &str) -> Result<AgentResponse> {
        session.add_message(Message::user(user_input));

        let mut metrics = AgentMetrics::default();
        let mut all_tool_calls = Vec::new();

        loop {
            if metrics.cycle_count() >= self.config.max_iterations {
                warn!(max_iterations = self.config.max_iterations, "Agent loop did not converge");
                return Err(AgentError::MaxIterationsReached(self.config.max_iterations));
            }

            let started = Instant::now();
            session.increment_iterations();
            info!(iteration = metrics.cycle_count() + 1, "Starting agent loop iteration");

            let request = self.build_request(session);
            let response = self.llm.complete(request).await?;
            metrics.accumulated_usage += response.usage;

            let tool_uses: Vec<ToolUse> =
                response.message.tool_uses().into_iter().cloned().collect();
            let text = response.text_content();

            if tool_uses.is_empty() {
                session.add_message(Message::assistant(&text));
                metrics.cycle_durations.push(started.elapsed().as_secs_f64());

                debug!(
                    cycles = metrics.cycle_count(),
                    input_tokens = metrics.accumulated_usage.input_tokens,
                    output_tokens = metrics.accumulated_usage.output_tokens,
                    "Agent loop finished"
                );

                return Ok(AgentResponse::new(session.id().clone(), text)
                    .with_metrics(metrics)
                    .with_tool_calls(all_tool_calls));
            }

            let mut assistant_content = Vec::new();
            if !text.is_empty() {
                assistant_content.push(ContentBlock::text(text));
            }
            assistant_content.extend(tool_uses.iter().cloned().map(ContentBlock::tool_use));
            session.add_message(Message::new(Role::Assistant, assistant_content));

            let records = self.execute_tools(session, &tool_uses).await;
            session.increment_tool_calls(records.len());

            let results = records
                .iter()
                .map(|record| {
                    if record.is_error {
                        ToolResult::error(&record.id, &record.output)
                    } else {
                        ToolResult::success(&record.id, &record.output)
                    }
                })
                .collect();
            session.add_message(Message::tool(results));

            all_tool_calls.extend(records);
            metrics.cycle_durations.push(started.elapsed().as_secs_f64());
        }
    }

    fn build_request(&self, session: &Session) -> CompletionRequest {
        let messages = session.context_window(self.config.max_context_messages);

        let mut request = CompletionRequest::new(&self.config.model, messages)
            .with_temperature(self.config.temperature);

        if !self.config.system_prompt.is_empty() {
            request = request.with_system(&self.config.system_prompt);
        }

        if let Some(max_tokens) = self.config.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }

        if let Some(tools) = &self.tools {
            let definitions = tools.registry().definitions();
            if !definitions.is_empty() {
                request = request.with_tools(definitions);
            }
        }

        request
    }

    async fn execute_tools(&self, session: &Session, tool_uses: &[ToolUse]) -> Vec<ToolCallRecord> {
        let Some(tools) = &self.tools else {
            return tool_uses
                .iter()
                .map(|tu| {
                    ToolCallRecord::error(
                        &tu.id,
                        &tu.name,
                        tu.input.clone(),
                        format!("Tool execution not available: {}", tu.name),
                        0,
                    )
                })
                .collect();
        };

        let ctx = Context::new()
            .with_session(session.id().clone())
            .with_timeout(self.config.tool_timeout());
        let mut records = Vec::with_capacity(tool_uses.len());

        for tu in tool_uses {
            let start = Instant::now();
            debug!(tool = %tu.name, id = %tu.id, "Executing tool");

            let result = tools.execute(&ctx, &tu.name, tu.input.clone()).await;
            let duration_ms = start.elapsed().as_millis() as u64;

            match result {
                Ok(output) => {
                    records.push(ToolCallRecord::success(
                        &tu.id,
                        &tu.name,
                        tu.input.clone(),
                        &output,
                        duration_ms,
                    ));
                }
                Err(e) => {
                    warn!(tool = %tu.name, error = %e, "Tool call failed");
                    records.push(ToolCallRecord::error(
                        &tu.id,
                        &tu.name,
                        tu.input.clone(),
                        e.to_string(),
                        duration_ms,
                    ));
                }
            }
        }

        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use relay_core::{TokenUsage, ToolDefinition, ToolParameter};
    use relay_llm::{CompletionResponse, LlmError};
    use relay_tools::{Tool, ToolOutput, ToolRegistry};
    use serde_json::{json, Value};
    use std::sync::Mutex;

    struct MockLlm {
        responses: Mutex<Vec<CompletionResponse>>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl MockLlm {
        fn new(responses: Vec<CompletionResponse>) -> Self {
            Self {
                responses: Mutex::new(responses),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmProvider for MockLlm {
        fn name(&self) -> &str {
            "mock"
        }

        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> std::result::Result<CompletionResponse, LlmError> {
            self.requests.lock().unwrap().push(request);
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                Ok(CompletionResponse::new("id", "model", Message::assistant("Default response")))
            } else {
                Ok(responses.remove(0))
            }
        }

        fn default_model(&self) -> &str {
            "mock"
        }
    }

    struct AddTool {
        def: ToolDefinition,
    }

    impl AddTool {
        fn new() -> Self {
            Self {
                def: ToolDefinition::new("add", "Adds two integers")
                    .with_required_param("a", ToolParameter::integer())
                    .with_required_param("b", ToolParameter::integer()),
            }
        }
    }

    #[async_trait]
    impl Tool for AddTool {
        fn definition(&self) -> &ToolDefinition {
            &self.def
        }

        async fn execute(&self, _ctx: &Context, input: Value) -> relay_tools::Result<ToolOutput> {
            let sum = input["a"].as_i64().unwrap_or(0) + input["b"].as_i64().unwrap_or(0);
            Ok(ToolOutput::text(sum.to_string()))
        }
    }

    fn tool_call(id: &str, name: &str, input: Value) -> Message {
        Message::new(
            Role::Assistant,
            vec![ContentBlock::tool_use(ToolUse::new(id, name, input))],
        )
    }

    fn tools() -> Option<Arc<ToolExecutor>> {
        let registry = ToolRegistry::register([Arc::new(AddTool::new()) as Arc<dyn Tool>]).unwrap();
        Some(Arc::new(ToolExecutor::new(Arc::new(registry))))
    }

    #[tokio::test]
    async fn test_executor_simple_response() {
        let config = AgentConfig::new("mock", "You are helpful.");
        let llm = Arc::new(MockLlm::new(vec![CompletionResponse::new(
            "resp-1",
            "mock",
            Message::assistant("Hello!"),
        )
        .with_usage(TokenUsage::new(12, 3))]));

        let executor = Executor::new(config, llm.clone(), None);
        let mut session = Session::new();

        let response = executor.execute(&mut session, "Hi").await.unwrap();

        assert_eq!(response.text(), "Hello!");
        assert_eq!(response.metrics.cycle_durations.len(), 1);
        assert_eq!(response.metrics.accumulated_usage, TokenUsage::new(12, 3));
        assert!(!response.has_tool_calls());

        let requests = llm.requests.lock().unwrap();
        assert_eq!(requests[0].system.as_deref(), Some("You are helpful."));
        assert!(requests[0].tools.is_empty());
    }

    #[tokio::test]
    async fn test_tool_results_fed_back_and_usage_accumulates() {
        let config = AgentConfig::new("mock", "");
        let llm = Arc::new(MockLlm::new(vec![
            CompletionResponse::new("r1", "mock", tool_call("call_1", "add", json!({"a": 2, "b": 3})))
                .with_usage(TokenUsage::new(10, 4)),
            CompletionResponse::new("r2", "mock", Message::assistant("The sum is 5."))
                .with_usage(TokenUsage::new(20, 6)),
        ]));

        let executor = Executor::new(config, llm.clone(), tools());
        let mut session = Session::new();
        let response = executor.execute(&mut session, "Add 2 and 3").await.unwrap();

        assert_eq!(response.text(), "The sum is 5.");
        assert_eq!(response.metrics.accumulated_usage, TokenUsage::new(30, 10));
        assert_eq!(response.metrics.cycle_durations.len(), 2);
        assert_eq!(response.tool_calls.len(), 1);
        assert_eq!(response.tool_calls[0].output, "5");
        assert!(!response.tool_calls[0].is_error);

        let requests = llm.requests.lock().unwrap();
        assert_eq!(requests[0].tools.len(), 1);
        let fed_back = requests[1].messages.last().unwrap();
        assert_eq!(fed_back.role, Role::Tool);
        assert_eq!(fed_back.tool_results()[0].content, "5");

        // user, assistant tool call, tool result, final answer
        assert_eq!(session.message_count(), 4);
        assert_eq!(session.stats().tool_call_count, 1);
    }

    #[tokio::test]
    async fn test_tool_failure_becomes_error_result() {
        let llm = Arc::new(MockLlm::new(vec![
            CompletionResponse::new("r1", "mock", tool_call("call_1", "add", json!({"a": "two"}))),
            CompletionResponse::new("r2", "mock", Message::assistant("Sorry.")),
        ]));

        let executor = Executor::new(AgentConfig::new("mock", ""), llm.clone(), tools());
        let response = executor.execute(&mut Session::new(), "Add").await.unwrap();

        assert_eq!(response.text(), "Sorry.");
        assert!(response.tool_calls[0].is_error);

        let requests = llm.requests.lock().unwrap();
        let fed_back = requests[1].messages.last().unwrap();
        assert!(fed_back.tool_results()[0].is_error);
    }

    #[tokio::test]
    async fn test_context_window() {
        let config = AgentConfig::new("mock", "").with_max_context_messages(3);
        let llm = Arc::new(MockLlm::new(vec![]));
        let executor = Executor::new(config, llm.clone(), None);

        let mut session = Session::from_history([("a", "b"), ("c", "d")]);
        executor.execute(&mut session, "e").await.unwrap();

        let requests = llm.requests.lock().unwrap();
        let texts: Vec<_> = requests[0].messages.iter().map(|m| m.text_content()).collect();
        assert_eq!(texts, vec!["c", "d", "e"]);
    }

    #[tokio::test]
    async fn test_context_window_never_orphans_tool_results() {
        let config = AgentConfig::new("mock", "").with_max_context_messages(3);
        let llm = Arc::new(MockLlm::new(vec![
            CompletionResponse::new("r1", "mock", tool_call("call_1", "add", json!({"a": 1, "b": 2}))),
            CompletionResponse::new("r2", "mock", tool_call("call_2", "add", json!({"a": 3, "b": 4}))),
            CompletionResponse::new("r3", "mock", Message::assistant("Done.")),
        ]));

        let executor = Executor::new(config, llm.clone(), tools());
        let response = executor.execute(&mut Session::new(), "go").await.unwrap();
        assert_eq!(response.text(), "Done.");

        let requests = llm.requests.lock().unwrap();
        assert_eq!(requests.len(), 3);
        for request in requests.iter() {
            assert_eq!(request.messages[0].role, Role::User);
            assert_eq!(request.messages[0].text_content(), "go");
        }
        let roles: Vec<_> = requests[2].messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::User, Role::Assistant, Role::Tool, Role::Assistant, Role::Tool]
        );
    }

    #[tokio::test]
    async fn test_executor_max_iterations() {
        let config = AgentConfig::new("mock", "You are helpful.").with_max_iterations(2);
        let call = tool_call("call_1", "test_tool", json!({}));

        let llm = Arc::new(MockLlm::new(vec![
            CompletionResponse::new("resp-1", "mock", call.clone()),
            CompletionResponse::new("resp-2", "mock", call.clone()),
            CompletionResponse::new("resp-3", "mock", call),
        ]));

        let executor = Executor::new(config, llm.clone(), None);
        let result = executor.execute(&mut Session::new(), "Hi").await;

        assert!(matches!(result, Err(AgentError::MaxIterationsReached(2))));
        assert_eq!(llm.requests.lock().unwrap().len(), 2);
    }
}
