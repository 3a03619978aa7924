use crate::error::{Result, ToolError};
use crate::traits::{parse_input, Tool, ToolOutput};
use async_trait::async_trait;
use relay_core::{Context, ToolDefinition, ToolParameter};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tokio::fs;

pub struct ReadFileTool {
    def: ToolDefinition,
}

impl ReadFileTool {
    pub fn new() -> Self {
        let def = ToolDefinition::new("read_file", "Read the contents of a text file")
            .with_required_param(
                "path",
                ToolParameter::string().with_description("Path to the file to read"),
            )
            .with_param(
                "start_line",
                ToolParameter::integer().with_description("First line to return, 1-based"),
            )
            .with_param(
                "end_line",
                ToolParameter::integer().with_description("Last line to return, inclusive"),
            )
            .with_category("filesystem");
        Self { def }
    }
}

impl Default for ReadFileTool {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct ReadFileInput {
    path: String,
    start_line: Option<usize>,
    end_line: Option<usize>,
}

fn slice_lines(content: &str, start: Option<usize>, end: Option<usize>) -> String {
    if start.is_none() && end.is_none() {
        return content.to_string();
    }
    let first = start.unwrap_or(1).max(1);
    let last = end.unwrap_or(usize::MAX);
    content
        .lines()
        .enumerate()
        .filter(|(i, _)| (first..=last).contains(&(i + 1)))
        .map(|(_, line)| line)
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl Tool for ReadFileTool {
    fn definition(&self) -> &ToolDefinition {
        &self.def
    }

    async fn execute(&self, ctx: &Context, input: Value) -> Result<ToolOutput> {
        let input: ReadFileInput = parse_input(self.name(), input)?;

        let path = ctx.resolve_path(&input.path);
        if !path.exists() {
            return Ok(ToolOutput::error(format!("File not found: {}", input.path)));
        }

        match fs::read_to_string(&path).await {
            Ok(content) => {
                let size = content.len();
                Ok(ToolOutput::text(slice_lines(&content, input.start_line, input.end_line))
                    .with_metadata("path", path.to_string_lossy())
                    .with_metadata("size", size))
            }
            Err(e) => Ok(ToolOutput::error(format!("Failed to read file: {}", e))),
        }
    }
}

pub struct WriteFileTool {
    def: ToolDefinition,
}

impl WriteFileTool {
    pub fn new() -> Self {
        let def = ToolDefinition::new("write_file", "Write content to a file")
            .with_required_param(
                "path",
                ToolParameter::string().with_description("Path to the file to write"),
            )
            .with_required_param(
                "content",
                ToolParameter::string().with_description("Content to write"),
            )
            .with_param(
                "append",
                ToolParameter::boolean()
                    .with_description("Append to file instead of overwriting")
                    .with_default(Value::Bool(false)),
            )
            .with_category("filesystem")
            .dangerous();
        Self { def }
    }
}

impl Default for WriteFileTool {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct WriteFileInput {
    path: String,
    content: String,
    #[serde(default)]
    append: bool,
}

#[async_trait]
impl Tool for WriteFileTool {
    fn definition(&self) -> &ToolDefinition {
        &self.def
    }

    async fn execute(&self, ctx: &Context, input: Value) -> Result<ToolOutput> {
        let input: WriteFileInput = parse_input(self.name(), input)?;

        let path = ctx.resolve_path(&input.path);

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                if let Err(e) = fs::create_dir_all(parent).await {
                    return Ok(ToolOutput::error(format!("Failed to create directory: {}", e)));
                }
            }
        }

        let result = if input.append {
            let existing = fs::read_to_string(&path).await.unwrap_or_default();
            fs::write(&path, format!("{}{}", existing, input.content)).await
        } else {
            fs::write(&path, &input.content).await
        };

        match result {
            Ok(_) => Ok(ToolOutput::text(format!("Successfully wrote to {}", path.display()))
                .with_metadata("path", path.to_string_lossy())
                .with_metadata("bytes_written", input.content.len())),
            Err(e) => Ok(ToolOutput::error(format!("Failed to write file: {}", e))),
        }
    }
}

pub struct ListDirectoryTool {
    def: ToolDefinition,
}

impl ListDirectoryTool {
    pub fn new() -> Self {
        let def = ToolDefinition::new("list_directory", "List contents of a directory")
            .with_param(
                "path",
                ToolParameter::string()
                    .with_description("Path to the directory")
                    .with_default(Value::String(".".into())),
            )
            .with_param(
                "recursive",
                ToolParameter::boolean()
                    .with_description("List recursively")
                    .with_default(Value::Bool(false)),
            )
            .with_category("filesystem");
        Self { def }
    }
}

impl Default for ListDirectoryTool {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct ListDirectoryInput {
    #[serde(default = "default_path")]
    path: String,
    #[serde(default)]
    recursive: bool,
}

#[derive(Serialize, Deserialize)]
struct DirectoryEntry {
    name: String,
    path: String,
    is_dir: bool,
    size: Option<u64>,
}

impl DirectoryEntry {
    fn from_parts(name: String, path: &Path, metadata: &std::fs::Metadata) -> Self {
        Self {
            name,
            path: path.to_string_lossy().to_string(),
            is_dir: metadata.is_dir(),
            size: metadata.is_file().then(|| metadata.len()),
        }
    }
}

#[async_trait]
impl Tool for ListDirectoryTool {
    fn definition(&self) -> &ToolDefinition {
        &self.def
    }

    async fn execute(&self, ctx: &Context, input: Value) -> Result<ToolOutput> {
        let input: ListDirectoryInput = parse_input(self.name(), input)?;

        let path = ctx.resolve_path(&input.path);
        if !path.exists() {
            return Ok(ToolOutput::error(format!("Directory not found: {}", input.path)));
        }
        if !path.is_dir() {
            return Ok(ToolOutput::error(format!("Not a directory: {}", input.path)));
        }

        let mut entries = Vec::new();
        collect_entries(&path, input.recursive, &mut entries).await?;

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        ToolOutput::json(&entries)
    }
}

async fn collect_entries(
    path: &Path,
    recursive: bool,
    entries: &mut Vec<DirectoryEntry>,
) -> Result<()> {
    let mut read_dir = fs::read_dir(path).await?;
    while let Some(entry) = read_dir.next_entry().await? {
        let metadata = entry.metadata().await?;
        let entry_path = entry.path();
        entries.push(DirectoryEntry::from_parts(
            entry.file_name().to_string_lossy().to_string(),
            &entry_path,
            &metadata,
        ));

        if recursive && metadata.is_dir() {
            Box::pin(collect_entries(&entry_path, true, entries)).await?;
        }
    }
    Ok(())
}

pub struct SearchFilesTool {
    def: ToolDefinition,
}

impl SearchFilesTool {
    pub fn new() -> Self {
        let def = ToolDefinition::new("search_files", "Search for files matching a glob pattern")
            .with_required_param(
                "pattern",
                ToolParameter::string().with_description("Glob pattern, e.g. **/*.rs"),
            )
            .with_param(
                "path",
                ToolParameter::string()
                    .with_description("Base path to search from")
                    .with_default(Value::String(".".into())),
            )
            .with_category("filesystem");
        Self { def }
    }
}

impl Default for SearchFilesTool {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct SearchFilesInput {
    pattern: String,
    #[serde(default = "default_path")]
    path: String,
}

fn default_path() -> String {
    ".".to_string()
}

#[async_trait]
impl Tool for SearchFilesTool {
    fn definition(&self) -> &ToolDefinition {
        &self.def
    }

    async fn execute(&self, ctx: &Context, input: Value) -> Result<ToolOutput> {
        let input: SearchFilesInput = parse_input(self.name(), input)?;

        let base = ctx.resolve_path(&input.path);
        let full_pattern = base.join(&input.pattern);

        let mut matches: Vec<String> = glob::glob(&full_pattern.to_string_lossy())
            .map_err(|e| ToolError::bad_arguments(self.name(), format!("Invalid pattern: {}", e)))?
            .filter_map(|r| r.ok())
            .map(|p| p.to_string_lossy().to_string())
            .collect();
        matches.sort();

        ToolOutput::json(&matches)
    }
}
