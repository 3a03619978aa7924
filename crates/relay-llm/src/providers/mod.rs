#[cfg(feature = "bedrock")]
mod bedrock;
#[cfg(feature = "openai")]
mod openai;
#[cfg(feature = "bedrock")]
mod sigv4;

#[cfg(feature = "bedrock")]
pub use bedrock::BedrockProvider;
#[cfg(feature = "openai")]
pub use openai::OpenAiProvider;
