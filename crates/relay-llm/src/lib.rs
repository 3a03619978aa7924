pub mod error;
pub mod factory;
pub mod providers;
pub mod traits;
pub mod types;

pub use error::{LlmError, Result};
pub use factory::from_config;
pub use traits::LlmProvider;
pub use types::{CompletionRequest, CompletionResponse, StopReason};

#[cfg(feature = "bedrock")]
pub use providers::BedrockProvider;
#[cfg(feature = "openai")]
pub use providers::OpenAiProvider;

pub mod prelude {
    pub use crate::error::{LlmError, Result};
    pub use crate::factory::from_config;
    pub use crate::traits::LlmProvider;
    pub use crate::types::{CompletionRequest, CompletionResponse, StopReason};

    #[cfg(feature = "bedrock")]
    pub use crate::providers::BedrockProvider;
    #[cfg(feature = "openai")]
    pub use crate::providers::OpenAiProvider;
}
