use crate::error::Result;
use crate::traits::{parse_input, Tool, ToolOutput};
use async_trait::async_trait;
use relay_core::{Context, ToolDefinition, ToolParameter};
use serde::Deserialize;
use serde_json::Value;
use tokio::fs;

/// Replaces one exact occurrence of a text snippet in a file.
pub struct EditFileTool {
    def: ToolDefinition,
}

impl EditFileTool {
    pub fn new() -> Self {
        let def = ToolDefinition::new(
            "edit_file",
            "Replace an exact snippet of text in a file. The snippet must occur exactly once.",
        )
        .with_required_param(
            "path",
            ToolParameter::string().with_description("Path to the file to edit"),
        )
        .with_required_param(
            "old_text",
            ToolParameter::string().with_description("Text to find, matched exactly"),
        )
        .with_required_param(
            "new_text",
            ToolParameter::string().with_description("Replacement text"),
        )
        .with_category("filesystem")
        .dangerous();
        Self { def }
    }
}

impl Default for EditFileTool {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct EditFileInput {
    path: String,
    old_text: String,
    new_text: String,
}

#[async_trait]
impl Tool for EditFileTool {
    fn definition(&self) -> &ToolDefinition {
        &self.def
    }

    async fn execute(&self, ctx: &Context, input: Value) -> Result<ToolOutput> {
        let input: EditFileInput = parse_input(self.name(), input)?;

        if input.old_text.is_empty() {
            return Ok(ToolOutput::error("old_text must not be empty"));
        }

        let path = ctx.resolve_path(&input.path);
        let content = match fs::read_to_string(&path).await {
            Ok(c) => c,
            Err(e) => return Ok(ToolOutput::error(format!("Failed to read {}: {}", input.path, e))),
        };

        match occurrences(&content, &input.old_text) {
            0 => Ok(ToolOutput::error(format!("Text not found in {}", input.path))),
            1 => {
                let updated = content.replacen(&input.old_text, &input.new_text, 1);
                if let Err(e) = fs::write(&path, &updated).await {
                    return Ok(ToolOutput::error(format!("Failed to write {}: {}", input.path, e)));
                }
                Ok(ToolOutput::text(format!("Edited {}", path.display()))
                    .with_metadata("path", path.to_string_lossy())
                    .with_metadata("bytes_written", updated.len()))
            }
            n => Ok(ToolOutput::error(format!(
                "Text occurs {} times in {}; include more context so it matches once",
                n, input.path
            ))),
        }
    }
}

/// Counts matches of `needle`, overlapping ones included.
fn occurrences(haystack: &str, needle: &str) -> usize {
    let step = needle.chars().next().map_or(1, char::len_utf8);
    let mut count = 0;
    let mut from = 0;
    while let Some(i) = haystack[from..].find(needle) {
        count += 1;
        from += i + step;
    }
    count
}
