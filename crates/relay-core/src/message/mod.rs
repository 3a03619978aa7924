mod content;
mod message;

pub use content::{ContentBlock, ToolResult, ToolUse};
pub use message::{Message, Role};
