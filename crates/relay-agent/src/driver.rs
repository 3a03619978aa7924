//! Turns a query plus prior exchanges into an [`InvocationResult`] by
//! delegating to an agent handle.

use crate::agent::Agent;
use crate::error::AgentError;
use crate::response::{AgentResponse, ToolCallRecord};
use async_trait::async_trait;
use relay_core::TokenUsage;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// One completed query/reply pair from earlier in a conversation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub query: String,
    pub reply: String,
}

impl Exchange {
    pub fn new(query: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            reply: reply.into(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InvocationRequest {
    pub query: String,
    #[serde(default)]
    pub history: Vec<Exchange>,
}

impl InvocationRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            history: Vec::new(),
        }
    }

    pub fn with_history(mut self, history: Vec<Exchange>) -> Self {
        self.history = history;
        self
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InvocationResult {
    pub message: String,
    pub usage: TokenUsage,
    /// Sum of the agent's per-cycle durations, in seconds.
    pub elapsed_seconds: f64,
    pub tool_calls: Vec<ToolCallRecord>,
}

impl InvocationResult {
    pub fn tools_used(&self) -> usize {
        self.tool_calls.len()
    }
}

impl From<AgentResponse> for InvocationResult {
    fn from(response: AgentResponse) -> Self {
        Self {
            elapsed_seconds: response.metrics.total_duration(),
            usage: response.metrics.accumulated_usage,
            message: response.message,
            tool_calls: response.tool_calls,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvocationError {
    #[error("Agent invocation failed: {0}")]
    CollaboratorFailure(String),
}

/// Anything that can answer an [`InvocationRequest`].
#[async_trait]
pub trait AgentHandle: Send + Sync {
    async fn invoke(&self, request: &InvocationRequest) -> Result<AgentResponse, AgentError>;
}

#[async_trait]
impl AgentHandle for Agent {
    async fn invoke(&self, request: &InvocationRequest) -> Result<AgentResponse, AgentError> {
        Agent::invoke(self, request).await
    }
}

/// Invokes `handle` once. Failures are reported, never retried.
pub async fn run(
    handle: &dyn AgentHandle,
    request: &InvocationRequest,
) -> Result<InvocationResult, InvocationError> {
    match handle.invoke(request).await {
        Ok(response) => {
            let result = InvocationResult::from(response);
            info!(
                input_tokens = result.usage.input_tokens,
                output_tokens = result.usage.output_tokens,
                elapsed_seconds = result.elapsed_seconds,
                tools_used = result.tools_used(),
                "Invocation completed"
            );
            Ok(result)
        }
        Err(e) => {
            warn!(error = %e, "Invocation failed");
            Err(InvocationError::CollaboratorFailure(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::AgentMetrics;
    use relay_core::SessionId;
    use std::sync::Mutex;

    struct CannedHandle {
        response: Result<AgentResponse, String>,
        seen: Mutex<Vec<InvocationRequest>>,
    }

    impl CannedHandle {
        fn ok(response: AgentResponse) -> Self {
            Self {
                response: Ok(response),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                response: Err(message.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AgentHandle for CannedHandle {
        async fn invoke(&self, request: &InvocationRequest) -> Result<AgentResponse, AgentError> {
            self.seen.lock().unwrap().push(request.clone());
            match &self.response {
                Ok(response) => Ok(response.clone()),
                Err(message) => Err(AgentError::config(message.clone())),
            }
        }
    }

    fn response(durations: Vec<f64>) -> AgentResponse {
        AgentResponse::new(SessionId::new(), "1234 * 5678 = 7006652").with_metrics(AgentMetrics {
            accumulated_usage: TokenUsage::new(120, 30),
            cycle_durations: durations,
        })
    }

    #[tokio::test]
    async fn test_elapsed_is_sum_of_cycles() {
        let handle = CannedHandle::ok(response(vec![0.5, 1.25]));
        let result = run(&handle, &InvocationRequest::new("What is 1234 * 5678?"))
            .await
            .unwrap();

        assert_eq!(result.message, "1234 * 5678 = 7006652");
        assert_eq!(result.usage, TokenUsage::new(120, 30));
        assert_eq!(result.elapsed_seconds, 1.75);
        assert_eq!(result.tools_used(), 0);
    }

    #[tokio::test]
    async fn test_no_cycles_means_zero_elapsed() {
        let handle = CannedHandle::ok(response(vec![]));
        let result = run(&handle, &InvocationRequest::new("hi")).await.unwrap();
        assert_eq!(result.elapsed_seconds, 0.0);
    }

    #[tokio::test]
    async fn test_history_is_passed_through() {
        let handle = CannedHandle::ok(response(vec![0.1]));
        let request = InvocationRequest::new("and now?")
            .with_history(vec![Exchange::new("hello", "hi there")]);

        run(&handle, &request).await.unwrap();

        let seen = handle.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].history, vec![Exchange::new("hello", "hi there")]);
    }

    #[tokio::test]
    async fn test_collaborator_failure() {
        let handle = CannedHandle::failing("deployment not found");
        let err = run(&handle, &InvocationRequest::new("hi")).await.unwrap_err();

        match err {
            InvocationError::CollaboratorFailure(message) => {
                assert!(message.contains("deployment not found"));
            }
        }
        assert_eq!(handle.seen.lock().unwrap().len(), 1);
    }
}
