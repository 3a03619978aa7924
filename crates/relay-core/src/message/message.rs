use super::content::{ContentBlock, ToolResult, ToolUse};
use crate::types::{MessageId, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: Vec<ContentBlock>,
    pub created_at: Timestamp,
}

impl Message {
    pub fn new(role: Role, content: Vec<ContentBlock>) -> Self {
        Self {
            id: MessageId::new(),
            role,
            content,
            created_at: Timestamp::now(),
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System, vec![ContentBlock::text(text)])
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, vec![ContentBlock::text(text)])
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, vec![ContentBlock::text(text)])
    }

    pub fn tool(results: Vec<ToolResult>) -> Self {
        Self::new(
            Role::Tool,
            results.into_iter().map(ContentBlock::tool_result).collect(),
        )
    }

    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|b| b.as_text())
            .collect::<Vec<_>>()
            .join("")
    }

    pub fn has_tool_use(&self) -> bool {
        self.content.iter().any(|b| b.as_tool_use().is_some())
    }

    pub fn tool_uses(&self) -> Vec<&ToolUse> {
        self.content.iter().filter_map(|b| b.as_tool_use()).collect()
    }

    pub fn tool_results(&self) -> Vec<&ToolResult> {
        self.content
            .iter()
            .filter_map(|b| b.as_tool_result())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_creation() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.text_content(), "Hello");
        assert!(!msg.has_tool_use());
    }

    #[test]
    fn test_mixed_assistant_content() {
        let msg = Message::new(
            Role::Assistant,
            vec![
                ContentBlock::text("Let me check. "),
                ContentBlock::tool_use(ToolUse::new("call_1", "current_time", json!({}))),
                ContentBlock::text("One moment."),
            ],
        );

        assert!(msg.has_tool_use());
        assert_eq!(msg.tool_uses()[0].name, "current_time");
        assert_eq!(msg.text_content(), "Let me check. One moment.");
    }

    #[test]
    fn test_tool_message() {
        let msg = Message::tool(vec![
            ToolResult::success("a", "1200"),
            ToolResult::error("b", "boom"),
        ]);
        assert_eq!(msg.role, Role::Tool);
        assert_eq!(msg.tool_results().len(), 2);
        assert!(msg.tool_results()[1].is_error);
    }
}
