use thiserror::Error;

pub mod codes {
    pub const CONFIG_INVALID: &str = "E1001";
    pub const CONFIG_MISSING: &str = "E1002";
    pub const VALIDATION_FAILED: &str = "E2001";
    pub const INVALID_INPUT: &str = "E2002";
    pub const NOT_FOUND: &str = "E3001";
    pub const TIMEOUT: &str = "E4002";
    pub const INTERNAL: &str = "E9001";
}

/// Failure to build a [`ProviderConfig`](crate::provider::ProviderConfig)
/// from the environment. Raised before any network traffic happens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    MissingCredentials(String),

    #[error("{0} environment variable not set")]
    MissingEndpoint(String),

    #[error("Invalid endpoint in {variable}: {reason}")]
    InvalidEndpoint { variable: String, reason: String },

    #[error("No region configured for {0}")]
    MissingRegion(String),
}

impl ConfigError {
    pub fn missing_credentials(variables: impl Into<String>) -> Self {
        Self::MissingCredentials(variables.into())
    }

    pub fn missing_endpoint(variable: impl Into<String>) -> Self {
        Self::MissingEndpoint(variable.into())
    }

    pub fn invalid_endpoint(variable: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEndpoint {
            variable: variable.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Provider(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {field} - {message}")]
    InvalidInput { field: String, message: String },

    #[error("Not found: {resource_type} with id {id}")]
    NotFound { resource_type: String, id: String },

    #[error("Operation timeout after {0}ms")]
    Timeout(u64),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn code(&self) -> &'static str {
        match self {
            Error::Config(_) => codes::CONFIG_INVALID,
            Error::Provider(_) => codes::CONFIG_MISSING,
            Error::Json(_) => codes::VALIDATION_FAILED,
            Error::Io(_) => codes::INTERNAL,
            Error::Validation(_) => codes::VALIDATION_FAILED,
            Error::InvalidInput { .. } => codes::INVALID_INPUT,
            Error::NotFound { .. } => codes::NOT_FOUND,
            Error::Timeout(_) => codes::TIMEOUT,
            Error::Internal(_) => codes::INTERNAL,
        }
    }

    pub fn not_found(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_names_variable() {
        let err = ConfigError::missing_credentials("AZURE_API_KEY");
        assert_eq!(err.to_string(), "AZURE_API_KEY environment variable not set");

        let err = ConfigError::missing_endpoint("AZURE_API_BASE");
        assert_eq!(err.to_string(), "AZURE_API_BASE environment variable not set");
    }

    #[test]
    fn test_error_codes() {
        let err: Error = ConfigError::missing_credentials("OPENAI_API_KEY").into();
        assert_eq!(err.code(), codes::CONFIG_MISSING);
        assert_eq!(Error::Config("bad".into()).code(), codes::CONFIG_INVALID);
    }
}
