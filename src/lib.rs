//! Environment-driven agent toolkit.
//!
//! Resolve a provider from the environment, build an agent over a tool
//! registry, and invoke it:
//!
//! ```no_run
//! use relay::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn demo() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let provider = resolve(&ProcessEnv)?;
//! let tools = ToolRegistry::register(quickstart_tools(&Default::default()))?;
//! let agent = Agent::builder()
//!     .model(provider.model())
//!     .llm(from_config(&provider)?)
//!     .tool_registry(Arc::new(tools))
//!     .build()?;
//!
//! let result = run(&agent, &InvocationRequest::new("What is 25 * 48?")).await?;
//! println!("{} ({:.2}s)", result.message, result.elapsed_seconds);
//! # Ok(())
//! # }
//! ```

pub use relay_agent as agent;
pub use relay_core as core;
pub use relay_llm as llm;
pub use relay_tools as tools;

pub mod prelude {
    pub use relay_agent::prelude::*;
    pub use relay_core::prelude::*;
    pub use relay_llm::prelude::*;
    pub use relay_tools::prelude::*;
}
