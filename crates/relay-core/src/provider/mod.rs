//! Model-provider selection and connection parameters.
//!
//! A [`ProviderConfig`] is resolved once from the environment at process
//! start (see [`resolve`]) and then shared read-only with every component
//! that talks to the model backend. Credentials are wrapped in [`Secret`]
//! so they never show up in `Debug` output, logs, or [`ProviderConfig::display`].

mod env;
mod resolve;

pub use env::{EnvSource, ProcessEnv};
pub use resolve::{resolve, resolve_azure, resolve_bedrock, resolve_openai, vars};

use crate::error::ConfigError;
use serde::Serialize;
use std::fmt;
use url::Url;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
pub const DEFAULT_AZURE_API_VERSION: &str = "2024-02-15-preview";
pub const DEFAULT_AZURE_DEPLOYMENT: &str = "gpt-4";
pub const DEFAULT_BEDROCK_REGION: &str = "us-east-2";
pub const DEFAULT_BEDROCK_MODEL: &str = "us.anthropic.claude-sonnet-4-5-20250929-v1:0";

/// Placeholder printed in place of any credential, whatever its length.
pub const MASK: &str = "**********";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    OpenAi,
    AzureOpenAi,
    Bedrock,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::OpenAi => "openai",
            Backend::AzureOpenAi => "azure",
            Backend::Bedrock => "bedrock",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Backend::OpenAi => "OpenAI",
            Backend::AzureOpenAi => "Azure OpenAI",
            Backend::Bedrock => "AWS Bedrock",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A credential value. `Debug` and `Display` print [`MASK`].
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    OpenAi {
        api_key: Secret,
    },
    AzureOpenAi {
        api_key: Secret,
    },
    Bedrock {
        access_key_id: Secret,
        secret_access_key: Secret,
        session_token: Option<Secret>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderConfig {
    backend: Backend,
    credentials: Credentials,
    endpoint: Option<Url>,
    api_version: Option<String>,
    model: String,
    region: Option<String>,
}

impl ProviderConfig {
    pub fn openai(api_key: impl Into<String>, endpoint: Option<Url>, model: impl Into<String>) -> Self {
        Self {
            backend: Backend::OpenAi,
            credentials: Credentials::OpenAi {
                api_key: Secret::new(api_key),
            },
            endpoint,
            api_version: None,
            model: model.into(),
            region: None,
        }
    }

    pub fn azure(
        api_key: impl Into<String>,
        endpoint: Url,
        api_version: impl Into<String>,
        deployment: impl Into<String>,
    ) -> Self {
        Self {
            backend: Backend::AzureOpenAi,
            credentials: Credentials::AzureOpenAi {
                api_key: Secret::new(api_key),
            },
            endpoint: Some(endpoint),
            api_version: Some(api_version.into()),
            model: deployment.into(),
            region: None,
        }
    }

    pub fn bedrock(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: Option<String>,
        region: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            backend: Backend::Bedrock,
            credentials: Credentials::Bedrock {
                access_key_id: Secret::new(access_key_id),
                secret_access_key: Secret::new(secret_access_key),
                session_token: session_token.map(Secret::new),
            },
            endpoint: None,
            api_version: None,
            model: model.into(),
            region: Some(region.into()),
        }
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn endpoint(&self) -> Option<&Url> {
        self.endpoint.as_ref()
    }

    pub fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }

    /// Model id, or the deployment id for Azure.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Fails closed when a field the backend needs is blank or absent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match (&self.backend, &self.credentials) {
            (Backend::OpenAi, Credentials::OpenAi { api_key }) => {
                if api_key.is_empty() {
                    return Err(ConfigError::missing_credentials(vars::OPENAI_API_KEY));
                }
            }
            (Backend::AzureOpenAi, Credentials::AzureOpenAi { api_key }) => {
                if api_key.is_empty() {
                    return Err(ConfigError::missing_credentials(vars::AZURE_API_KEY));
                }
                if self.endpoint.is_none() {
                    return Err(ConfigError::missing_endpoint(vars::AZURE_API_BASE));
                }
            }
            (
                Backend::Bedrock,
                Credentials::Bedrock {
                    access_key_id,
                    secret_access_key,
                    ..
                },
            ) => {
                if access_key_id.is_empty() {
                    return Err(ConfigError::missing_credentials(vars::AWS_ACCESS_KEY_ID));
                }
                if secret_access_key.is_empty() {
                    return Err(ConfigError::missing_credentials(vars::AWS_SECRET_ACCESS_KEY));
                }
                if self.region.as_deref().map_or(true, |r| r.trim().is_empty()) {
                    return Err(ConfigError::MissingRegion(self.backend.display_name().into()));
                }
            }
            (backend, _) => {
                return Err(ConfigError::missing_credentials(format!(
                    "{} credentials",
                    backend.display_name()
                )));
            }
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::missing_credentials("model or deployment id"));
        }
        Ok(())
    }

    /// Human-readable summary with every credential replaced by [`MASK`].
    pub fn display(&self) -> MaskedConfig<'_> {
        MaskedConfig(self)
    }
}

pub struct MaskedConfig<'a>(&'a ProviderConfig);

fn mask(secret: Option<&Secret>) -> &'static str {
    match secret {
        Some(s) if !s.is_empty() => MASK,
        _ => "Not set",
    }
}

impl fmt::Display for MaskedConfig<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cfg = self.0;
        writeln!(f, "{} Configuration:", cfg.backend.display_name())?;
        match &cfg.credentials {
            Credentials::OpenAi { api_key } => {
                let base = cfg
                    .endpoint
                    .as_ref()
                    .map(|u| u.to_string())
                    .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string());
                writeln!(f, "  • Base URL: {}", base)?;
                writeln!(f, "  • Model: {}", cfg.model)?;
                write!(f, "  • API Key: {}", mask(Some(api_key)))
            }
            Credentials::AzureOpenAi { api_key } => {
                let base = cfg.endpoint.as_ref().map(|u| u.to_string()).unwrap_or_default();
                writeln!(f, "  • API Base: {}", base)?;
                writeln!(f, "  • API Version: {}", cfg.api_version.as_deref().unwrap_or(""))?;
                writeln!(f, "  • Deployment: {}", cfg.model)?;
                write!(f, "  • API Key: {}", mask(Some(api_key)))
            }
            Credentials::Bedrock {
                access_key_id,
                secret_access_key,
                session_token,
            } => {
                writeln!(f, "  • Region: {}", cfg.region.as_deref().unwrap_or(""))?;
                writeln!(f, "  • Model: {}", cfg.model)?;
                writeln!(f, "  • Access Key ID: {}", mask(Some(access_key_id)))?;
                writeln!(f, "  • Secret Access Key: {}", mask(Some(secret_access_key)))?;
                write!(f, "  • Session Token: {}", mask(session_token.as_ref()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn azure_with_key(key: &str) -> ProviderConfig {
        ProviderConfig::azure(
            key,
            Url::parse("https://contoso.openai.azure.com").unwrap(),
            DEFAULT_AZURE_API_VERSION,
            "gpt-4",
        )
    }

    #[test]
    fn test_masked_display_hides_secret() {
        let secret = "sk-azure-0123456789abcdef";
        let out = azure_with_key(secret).display().to_string();

        assert!(!out.contains(secret));
        assert!(out.starts_with("Azure OpenAI Configuration:"));
        assert!(out.contains("  • API Base: https://contoso.openai.azure.com/"));
        assert!(out.contains("  • API Version: 2024-02-15-preview"));
        assert!(out.contains("  • Deployment: gpt-4"));
        assert!(out.contains("  • API Key: **********"));
    }

    #[test]
    fn test_masked_length_is_constant() {
        let short = azure_with_key("k").display().to_string();
        let long = azure_with_key(&"x".repeat(200)).display().to_string();
        assert_eq!(short.len(), long.len());
        assert_eq!(short, long);
    }

    #[test]
    fn test_debug_never_leaks() {
        let cfg = ProviderConfig::bedrock("AKIDEXAMPLE", "topsecret", None, "us-east-2", "m");
        let debug = format!("{:?}", cfg);
        assert!(!debug.contains("AKIDEXAMPLE"));
        assert!(!debug.contains("topsecret"));

        let out = cfg.display().to_string();
        assert!(out.contains("  • Session Token: Not set"));
        assert!(out.contains("  • Region: us-east-2"));
    }

    #[test]
    fn test_validate_fails_closed() {
        assert_eq!(
            azure_with_key("  ").validate(),
            Err(ConfigError::missing_credentials("AZURE_API_KEY"))
        );
        assert!(azure_with_key("key").validate().is_ok());

        let no_secret = ProviderConfig::bedrock("AKID", "", None, "us-east-2", "m");
        assert_eq!(
            no_secret.validate(),
            Err(ConfigError::missing_credentials("AWS_SECRET_ACCESS_KEY"))
        );

        let no_region = ProviderConfig::bedrock("AKID", "secret", None, "", "m");
        assert!(matches!(no_region.validate(), Err(ConfigError::MissingRegion(_))));
    }

    #[test]
    fn test_openai_display_defaults_base_url() {
        let out = ProviderConfig::openai("sk-test", None, "gpt-4o").display().to_string();
        assert!(out.contains("  • Base URL: https://api.openai.com/v1"));
        assert!(!out.contains("sk-test"));
    }
}
