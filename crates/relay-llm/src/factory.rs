use crate::error::{LlmError, Result};
use crate::traits::LlmProvider;
use relay_core::provider::{Credentials, ProviderConfig, DEFAULT_AZURE_API_VERSION, DEFAULT_BEDROCK_REGION};
use std::sync::Arc;
use tracing::info;

/// Builds the client for a resolved [`ProviderConfig`].
///
/// The config is validated again here so a hand-built config with blank
/// credentials never reaches the network.
pub fn from_config(config: &ProviderConfig) -> Result<Arc<dyn LlmProvider>> {
    config.validate()?;

    let provider: Arc<dyn LlmProvider> = match config.credentials() {
        #[cfg(feature = "openai")]
        Credentials::OpenAi { api_key } => {
            let provider = match config.endpoint() {
                Some(base) => crate::OpenAiProvider::with_base_url(api_key.expose(), base.as_str())?,
                None => crate::OpenAiProvider::new(api_key.expose())?,
            };
            Arc::new(provider.with_model(config.model()))
        }
        #[cfg(feature = "openai")]
        Credentials::AzureOpenAi { api_key } => {
            let endpoint = config
                .endpoint()
                .ok_or_else(|| LlmError::invalid_request("Azure OpenAI requires an endpoint"))?;
            Arc::new(crate::OpenAiProvider::azure(
                api_key.expose(),
                endpoint,
                config.api_version().unwrap_or(DEFAULT_AZURE_API_VERSION),
                config.model(),
            )?)
        }
        #[cfg(feature = "bedrock")]
        Credentials::Bedrock {
            access_key_id,
            secret_access_key,
            session_token,
        } => {
            let mut provider = crate::BedrockProvider::new(
                access_key_id.expose(),
                secret_access_key.expose(),
                config.model(),
            )?
            .with_region(config.region().unwrap_or(DEFAULT_BEDROCK_REGION));
            if let Some(token) = session_token {
                provider = provider.with_session_token(token.expose());
            }
            Arc::new(provider)
        }
        #[allow(unreachable_patterns)]
        _ => {
            return Err(LlmError::invalid_request(format!(
                "{} support is not compiled in",
                config.backend().display_name()
            )))
        }
    };

    info!(provider = provider.name(), model = provider.default_model(), "Created LLM provider");
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[test]
    fn test_openai_from_config() {
        let cfg = ProviderConfig::openai("sk-test", None, "gpt-4o-mini");
        let provider = from_config(&cfg).unwrap();
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.default_model(), "gpt-4o-mini");
    }

    #[test]
    fn test_azure_from_config() {
        let endpoint = Url::parse("https://contoso.openai.azure.com").unwrap();
        let cfg = ProviderConfig::azure("az", endpoint, "2024-02-15-preview", "gpt-4");
        let provider = from_config(&cfg).unwrap();
        assert_eq!(provider.name(), "azure");
        assert_eq!(provider.default_model(), "gpt-4");
    }

    #[test]
    fn test_bedrock_from_config() {
        let cfg = ProviderConfig::bedrock("AKID", "secret", Some("tok".into()), "us-west-2", "m:0");
        let provider = from_config(&cfg).unwrap();
        assert_eq!(provider.name(), "bedrock");
        assert_eq!(provider.default_model(), "m:0");
    }

    #[test]
    fn test_blank_credentials_rejected() {
        let cfg = ProviderConfig::openai("  ", None, "gpt-4o");
        assert!(matches!(from_config(&cfg), Err(LlmError::Config(_))));
    }
}
