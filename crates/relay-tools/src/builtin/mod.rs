//! Built-in tools and the tool sets each scenario hands to an agent.

mod calculator;
mod clock;
mod edit;
mod filesystem;
#[cfg(feature = "shell")]
mod shell;
mod system;
mod text;
mod weather;

pub use calculator::CalculatorTool;
pub use clock::CurrentTimeTool;
pub use edit::EditFileTool;
pub use filesystem::{ListDirectoryTool, ReadFileTool, SearchFilesTool, WriteFileTool};
#[cfg(feature = "shell")]
pub use shell::ExecuteShellTool;
pub use system::GetSystemInfoTool;
pub use text::{analyze, WordAnalyzerTool, WordStats};
pub use weather::{weather_for, WeatherInfoTool};

use crate::traits::Tool;
use relay_core::config::ToolsConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub type ToolSet = Vec<Arc<dyn Tool>>;

#[cfg(feature = "shell")]
fn shell(config: &ToolsConfig) -> Option<Arc<dyn Tool>> {
    Some(Arc::new(
        ExecuteShellTool::new().with_timeout(Duration::from_secs(config.shell_timeout_secs)),
    ))
}

#[cfg(not(feature = "shell"))]
fn shell(_config: &ToolsConfig) -> Option<Arc<dyn Tool>> {
    None
}

/// Drops every tool the config disables.
pub fn filter_disabled(tools: ToolSet, config: &ToolsConfig) -> ToolSet {
    tools
        .into_iter()
        .filter(|tool| {
            let keep = !config.is_disabled(tool.name());
            if !keep {
                debug!(tool = tool.name(), "Tool disabled by configuration");
            }
            keep
        })
        .collect()
}

pub fn quickstart_tools(config: &ToolsConfig) -> ToolSet {
    filter_disabled(
        vec![Arc::new(CalculatorTool::new()), Arc::new(CurrentTimeTool::new())],
        config,
    )
}

pub fn demo_tools(config: &ToolsConfig) -> ToolSet {
    filter_disabled(
        vec![
            Arc::new(CalculatorTool::new()),
            Arc::new(CurrentTimeTool::new()),
            Arc::new(WeatherInfoTool::new()),
            Arc::new(WordAnalyzerTool::new()),
        ],
        config,
    )
}

pub fn assistant_tools(config: &ToolsConfig) -> ToolSet {
    let mut tools: ToolSet = vec![Arc::new(CalculatorTool::new()), Arc::new(CurrentTimeTool::new())];
    tools.extend(shell(config));
    tools.push(Arc::new(ReadFileTool::new()));
    tools.push(Arc::new(GetSystemInfoTool::new()));
    filter_disabled(tools, config)
}

pub fn file_tools(config: &ToolsConfig) -> ToolSet {
    let mut tools: ToolSet = vec![
        Arc::new(ReadFileTool::new()),
        Arc::new(WriteFileTool::new()),
        Arc::new(EditFileTool::new()),
        Arc::new(ListDirectoryTool::new()),
        Arc::new(SearchFilesTool::new()),
    ];
    tools.extend(shell(config));
    filter_disabled(tools, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(tools: &ToolSet) -> Vec<&str> {
        tools.iter().map(|t| t.name()).collect()
    }

    #[test]
    fn test_quickstart_and_demo_sets() {
        let config = ToolsConfig::default();
        assert_eq!(names(&quickstart_tools(&config)), vec!["calculator", "current_time"]);
        assert_eq!(
            names(&demo_tools(&config)),
            vec!["calculator", "current_time", "weather_info", "word_analyzer"]
        );
    }

    #[cfg(feature = "shell")]
    #[test]
    fn test_shell_sets() {
        let config = ToolsConfig::default();
        assert_eq!(
            names(&assistant_tools(&config)),
            vec!["calculator", "current_time", "execute_shell", "read_file", "get_system_info"]
        );
        assert_eq!(
            names(&file_tools(&config)),
            vec![
                "read_file",
                "write_file",
                "edit_file",
                "list_directory",
                "search_files",
                "execute_shell"
            ]
        );
    }

    #[test]
    fn test_disabled_tools_are_filtered() {
        let config = ToolsConfig {
            disabled_tools: vec!["current_time".into(), "write_file".into()],
            ..Default::default()
        };
        assert_eq!(names(&quickstart_tools(&config)), vec!["calculator"]);
        assert!(!names(&file_tools(&config)).contains(&"write_file"));
    }
}
