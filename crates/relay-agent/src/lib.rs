pub mod error;
pub mod config;
pub mod session;
pub mod response;
pub mod executor;
pub mod agent;
pub mod driver;

pub use error::{AgentError, Result};
pub use config::AgentConfig;
pub use session::{Session, SessionStats};
pub use response::{AgentMetrics, AgentResponse, ToolCallRecord};
pub use agent::{Agent, AgentBuilder};
pub use driver::{run, AgentHandle, Exchange, InvocationError, InvocationRequest, InvocationResult};

pub mod prelude {
    pub use crate::error::{AgentError, Result};
    pub use crate::config::AgentConfig;
    pub use crate::response::{AgentMetrics, AgentResponse, ToolCallRecord};
    pub use crate::agent::{Agent, AgentBuilder};
    pub use crate::driver::{
        run, AgentHandle, Exchange, InvocationError, InvocationRequest, InvocationResult,
    };
}
