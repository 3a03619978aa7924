use crate::config::AgentConfig;
use crate::driver::InvocationRequest;
use crate::error::{AgentError, Result};
use crate::executor::Executor;
use crate::response::AgentResponse;
use crate::session::Session;
use relay_llm::LlmProvider;
use relay_tools::{ToolExecutor, ToolRegistry};
use std::sync::Arc;
use tracing::debug;

/// A model client plus an immutable tool registry and system prompt.
/// Each call runs in a fresh [`Session`].
pub struct Agent {
    config: AgentConfig,
    llm: Arc<dyn LlmProvider>,
    tools: Option<Arc<ToolExecutor>>,
}

impl Agent {
    pub fn builder() -> AgentBuilder {
        AgentBuilder::new()
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn llm(&self) -> &Arc<dyn LlmProvider> {
        &self.llm
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools
            .as_ref()
            .map(|t| t.registry().list())
            .unwrap_or_default()
    }

    pub async fn chat(&self, message: &str) -> Result<String> {
        let response = self.process(&mut Session::new(), message).await?;
        Ok(response.message)
    }

    pub async fn process(&self, session: &mut Session, message: &str) -> Result<AgentResponse> {
        let executor = Executor::new(self.config.clone(), self.llm.clone(), self.tools.clone());
        executor.execute(session, message).await
    }

    /// Replays the request history into a new session, then answers the query.
    pub async fn invoke(&self, request: &InvocationRequest) -> Result<AgentResponse> {
        let mut session = Session::from_history(
            request
                .history
                .iter()
                .map(|ex| (ex.query.as_str(), ex.reply.as_str())),
        );
        debug!(
            session = %session.id(),
            history = request.history.len(),
            "Invoking agent"
        );
        self.process(&mut session, &request.query).await
    }
}

#[derive(Default)]
pub struct AgentBuilder {
    config: Option<AgentConfig>,
    name: Option<String>,
    system_prompt: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    max_iterations: Option<usize>,
    llm: Option<Arc<dyn LlmProvider>>,
    tool_registry: Option<Arc<ToolRegistry>>,
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: AgentConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn llm(mut self, llm: Arc<dyn LlmProvider>) -> Self {
        self.llm = Some(llm);
        self
    }

    pub fn tool_registry(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.tool_registry = Some(registry);
        self
    }

    pub fn build(self) -> Result<Agent> {
        let llm = self.llm.ok_or_else(|| AgentError::config("LLM provider is required"))?;

        let mut config = self.config.unwrap_or_default();

        if let Some(name) = self.name {
            config.name = name;
        }
        if let Some(prompt) = self.system_prompt {
            config.system_prompt = prompt;
        }
        if let Some(model) = self.model {
            config.model = model;
        }
        if let Some(temp) = self.temperature {
            config.temperature = temp;
        }
        if let Some(max) = self.max_tokens {
            config.max_tokens = Some(max);
        }
        if let Some(max) = self.max_iterations {
            config.max_iterations = max;
        }
        if config.model.is_empty() {
            config.model = llm.default_model().to_string();
        }
        if config.max_iterations == 0 {
            return Err(AgentError::config("max_iterations must be at least 1"));
        }

        let tools = self.tool_registry.map(|registry| {
            Arc::new(ToolExecutor::new(registry).with_timeout(config.tool_timeout()))
        });

        Ok(Agent { config, llm, tools })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::Exchange;
    use async_trait::async_trait;
    use relay_core::{Message, TokenUsage};
    use relay_llm::{CompletionRequest, CompletionResponse, LlmError};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockLlm {
        seen: Mutex<Vec<usize>>,
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
            self.seen.lock().unwrap().push(request.messages.len());
            Ok(CompletionResponse::new("id", request.model, Message::assistant("Hello from mock!"))
                .with_usage(TokenUsage::new(7, 3)))
        }

        fn default_model(&self) -> &str {
            "mock-default"
        }
    }

    #[test]
    fn test_builder_missing_llm() {
        let result = Agent::builder().system_prompt("You are helpful").build();
        assert!(matches!(result, Err(AgentError::Config(_))));
    }

    #[test]
    fn test_builder_falls_back_to_provider_model() {
        let agent = Agent::builder().llm(Arc::new(MockLlm::default())).build().unwrap();
        assert_eq!(agent.config().model, "mock-default");
        assert!(agent.tool_names().is_empty());
    }

    #[tokio::test]
    async fn test_agent_chat() {
        let agent = Agent::builder()
            .system_prompt("You are helpful.")
            .model("mock")
            .llm(Arc::new(MockLlm::default()))
            .build()
            .unwrap();

        assert_eq!(agent.chat("Hi").await.unwrap(), "Hello from mock!");
    }

    #[tokio::test]
    async fn test_agent_process() {
        let agent = Agent::builder()
            .name("test-agent")
            .model("mock")
            .temperature(0.5)
            .max_iterations(5)
            .llm(Arc::new(MockLlm::default()))
            .build()
            .unwrap();

        assert_eq!(agent.config().name, "test-agent");
        assert_eq!(agent.config().temperature, 0.5);
        assert_eq!(agent.config().max_iterations, 5);

        let mut session = Session::new();
        let response = agent.process(&mut session, "Hi").await.unwrap();

        assert_eq!(response.text(), "Hello from mock!");
        assert_eq!(response.iterations(), 1);
        assert_eq!(session.message_count(), 2);
    }

    #[tokio::test]
    async fn test_invoke_replays_history() {
        let llm = Arc::new(MockLlm::default());
        let agent = Agent::builder().llm(llm.clone()).build().unwrap();

        let request = InvocationRequest::new("third").with_history(vec![
            Exchange::new("first", "one"),
            Exchange::new("second", "two"),
        ]);
        let response = agent.invoke(&request).await.unwrap();

        assert_eq!(response.metrics.accumulated_usage, TokenUsage::new(7, 3));
        assert_eq!(*llm.seen.lock().unwrap(), vec![5]);
    }
}
