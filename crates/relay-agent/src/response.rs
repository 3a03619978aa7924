use relay_core::{SessionId, TokenUsage};
use relay_tools::ToolOutput;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolCallRecord {
    pub id: String,
    pub name: String,
    pub input: serde_json::Value,
    pub output: String,
    pub is_error: bool,
    pub duration_ms: u64,
}

impl ToolCallRecord {
    pub fn success(
        id: impl Into<String>,
        name: impl Into<String>,
        input: serde_json::Value,
        output: &ToolOutput,
        duration_ms: u64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            input,
            output: output.content.clone(),
            is_error: output.is_error,
            duration_ms,
        }
    }

    pub fn error(
        id: impl Into<String>,
        name: impl Into<String>,
        input: serde_json::Value,
        error_msg: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            input,
            output: error_msg.into(),
            is_error: true,
            duration_ms,
        }
    }
}

/// Usage summed over every model call, plus the wall time of each cycle in
/// seconds. A cycle is one model call and the tools it asked for.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentMetrics {
    pub accumulated_usage: TokenUsage,
    pub cycle_durations: Vec<f64>,
}

impl AgentMetrics {
    pub fn total_duration(&self) -> f64 {
        self.cycle_durations.iter().sum()
    }

    pub fn cycle_count(&self) -> usize {
        self.cycle_durations.len()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AgentResponse {
    pub session_id: SessionId,
    pub message: String,
    pub metrics: AgentMetrics,
    pub tool_calls: Vec<ToolCallRecord>,
}

impl AgentResponse {
    pub fn new(session_id: SessionId, message: impl Into<String>) -> Self {
        Self {
            session_id,
            message: message.into(),
            metrics: AgentMetrics::default(),
            tool_calls: Vec::new(),
        }
    }

    pub fn with_metrics(mut self, metrics: AgentMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_tool_calls(mut self, tool_calls: Vec<ToolCallRecord>) -> Self {
        self.tool_calls = tool_calls;
        self
    }

    pub fn text(&self) -> &str {
        &self.message
    }

    pub fn iterations(&self) -> usize {
        self.metrics.cycle_count()
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }

    pub fn failed_tool_calls(&self) -> impl Iterator<Item = &ToolCallRecord> {
        self.tool_calls.iter().filter(|tc| tc.is_error)
    }
}
