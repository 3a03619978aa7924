mod request;
mod response;

pub use request::CompletionRequest;
pub use response::{CompletionResponse, StopReason};
