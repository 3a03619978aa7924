mod id;
mod metadata;
mod timestamp;
mod usage;

pub use id::{Id, MessageId, RequestId, SessionId};
pub use metadata::Metadata;
pub use timestamp::Timestamp;
pub use usage::TokenUsage;
