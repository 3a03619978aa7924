use super::env::EnvSource;
use super::{
    ProviderConfig, DEFAULT_AZURE_API_VERSION, DEFAULT_AZURE_DEPLOYMENT, DEFAULT_BEDROCK_MODEL,
    DEFAULT_BEDROCK_REGION, DEFAULT_OPENAI_MODEL,
};
use crate::error::ConfigError;
use tracing::debug;
use url::Url;

pub mod vars {
    pub const AZURE_API_KEY: &str = "AZURE_API_KEY";
    pub const AZURE_API_BASE: &str = "AZURE_API_BASE";
    pub const AZURE_API_VERSION: &str = "AZURE_API_VERSION";
    pub const AZURE_DEPLOYMENT_NAME: &str = "AZURE_DEPLOYMENT_NAME";

    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
    pub const OPENAI_MODEL: &str = "OPENAI_MODEL";

    pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
    pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
    pub const AWS_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";
    pub const AWS_REGION: &str = "AWS_REGION";
    pub const AWS_DEFAULT_REGION: &str = "AWS_DEFAULT_REGION";
    pub const BEDROCK_MODEL_ID: &str = "BEDROCK_MODEL_ID";
}

/// Picks a backend from the environment.
///
/// An Azure key wins over an OpenAI key; with neither set the result is
/// [`ConfigError::MissingCredentials`]. Bedrock is never chosen here, use
/// [`resolve_bedrock`] for it.
pub fn resolve(env: &impl EnvSource) -> Result<ProviderConfig, ConfigError> {
    if env.non_empty(vars::AZURE_API_KEY).is_some() {
        return resolve_azure(env);
    }
    if env.non_empty(vars::OPENAI_API_KEY).is_some() {
        return resolve_openai(env);
    }
    Err(ConfigError::missing_credentials(format!(
        "{} or {}",
        vars::AZURE_API_KEY,
        vars::OPENAI_API_KEY
    )))
}

pub fn resolve_azure(env: &impl EnvSource) -> Result<ProviderConfig, ConfigError> {
    let api_key = env
        .non_empty(vars::AZURE_API_KEY)
        .ok_or_else(|| ConfigError::missing_credentials(vars::AZURE_API_KEY))?;
    let base = env
        .non_empty(vars::AZURE_API_BASE)
        .ok_or_else(|| ConfigError::missing_endpoint(vars::AZURE_API_BASE))?;
    let endpoint = parse_endpoint(vars::AZURE_API_BASE, &base)?;

    let api_version = env
        .non_empty(vars::AZURE_API_VERSION)
        .unwrap_or_else(|| DEFAULT_AZURE_API_VERSION.to_string());
    let deployment = env
        .non_empty(vars::AZURE_DEPLOYMENT_NAME)
        .unwrap_or_else(|| DEFAULT_AZURE_DEPLOYMENT.to_string());

    let config = ProviderConfig::azure(api_key, endpoint, api_version, deployment);
    config.validate()?;
    debug!(backend = %config.backend(), deployment = config.model(), "Resolved provider");
    Ok(config)
}

pub fn resolve_openai(env: &impl EnvSource) -> Result<ProviderConfig, ConfigError> {
    let api_key = env
        .non_empty(vars::OPENAI_API_KEY)
        .ok_or_else(|| ConfigError::missing_credentials(vars::OPENAI_API_KEY))?;
    let endpoint = env
        .non_empty(vars::OPENAI_BASE_URL)
        .map(|base| parse_endpoint(vars::OPENAI_BASE_URL, &base))
        .transpose()?;
    let model = env
        .non_empty(vars::OPENAI_MODEL)
        .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string());

    let config = ProviderConfig::openai(api_key, endpoint, model);
    config.validate()?;
    debug!(backend = %config.backend(), model = config.model(), "Resolved provider");
    Ok(config)
}

pub fn resolve_bedrock(env: &impl EnvSource) -> Result<ProviderConfig, ConfigError> {
    let access_key_id = env
        .non_empty(vars::AWS_ACCESS_KEY_ID)
        .ok_or_else(|| ConfigError::missing_credentials(vars::AWS_ACCESS_KEY_ID))?;
    let secret_access_key = env
        .non_empty(vars::AWS_SECRET_ACCESS_KEY)
        .ok_or_else(|| ConfigError::missing_credentials(vars::AWS_SECRET_ACCESS_KEY))?;
    let session_token = env.non_empty(vars::AWS_SESSION_TOKEN);
    let region = env
        .non_empty(vars::AWS_REGION)
        .or_else(|| env.non_empty(vars::AWS_DEFAULT_REGION))
        .unwrap_or_else(|| DEFAULT_BEDROCK_REGION.to_string());
    let model = env
        .non_empty(vars::BEDROCK_MODEL_ID)
        .unwrap_or_else(|| DEFAULT_BEDROCK_MODEL.to_string());

    let config =
        ProviderConfig::bedrock(access_key_id, secret_access_key, session_token, region, model);
    config.validate()?;
    debug!(backend = %config.backend(), region = ?config.region(), model = config.model(), "Resolved provider");
    Ok(config)
}

fn parse_endpoint(variable: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::invalid_endpoint(variable, e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::invalid_endpoint(
            variable,
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}
