pub mod error;
pub mod traits;
pub mod registry;
pub mod executor;
#[cfg(feature = "builtin")]
pub mod builtin;

pub use error::{Result, ToolError};
pub use traits::{parse_input, Tool, ToolOutput};
pub use registry::ToolRegistry;
pub use executor::ToolExecutor;

#[cfg(feature = "builtin")]
pub use builtin::{
    assistant_tools, demo_tools, file_tools, filter_disabled, quickstart_tools,
    CalculatorTool, CurrentTimeTool, EditFileTool, GetSystemInfoTool, ListDirectoryTool,
    ReadFileTool, SearchFilesTool, ToolSet, WeatherInfoTool, WordAnalyzerTool, WriteFileTool,
};

#[cfg(all(feature = "builtin", feature = "shell"))]
pub use builtin::ExecuteShellTool;

pub mod prelude {
    pub use crate::error::{Result, ToolError};
    pub use crate::traits::{parse_input, Tool, ToolOutput};
    pub use crate::registry::ToolRegistry;
    pub use crate::executor::ToolExecutor;

    #[cfg(feature = "builtin")]
    pub use crate::builtin::{
        assistant_tools, demo_tools, file_tools, quickstart_tools, ToolSet,
    };
}
