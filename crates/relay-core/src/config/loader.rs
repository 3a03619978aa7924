use super::types::{Config, LogLevel};
use crate::error::{Error, Result};
use crate::provider::{EnvSource, ProcessEnv};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const LOG_LEVEL_VAR: &str = "RELAY_LOG_LEVEL";

const SEARCH_PATHS: [&str; 4] = [
    "./relay.toml",
    "~/.relay/config.toml",
    "~/.config/relay/config.toml",
    "/etc/relay/config.toml",
];

impl Config {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let expanded = shellexpand::tilde(&path.as_ref().to_string_lossy()).into_owned();
        let content = std::fs::read_to_string(&expanded)?;
        debug!(path = %expanded, "Loaded config file");
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// First existing file among the standard locations, or defaults.
    pub fn load_default() -> Result<Self> {
        match Self::discover() {
            Some(path) => Self::load_from_file(path),
            None => Ok(Config::default()),
        }
    }

    pub fn discover() -> Option<PathBuf> {
        SEARCH_PATHS
            .iter()
            .map(|p| PathBuf::from(shellexpand::tilde(p).as_ref()))
            .find(|p| p.exists())
    }

    /// Explicit path if given, otherwise [`Config::load_default`].
    ///
    /// Environment overrides are applied separately with
    /// [`Config::merge_env`], usually before logging is up.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from_file(p),
            None => Self::load_default(),
        }
    }

    pub fn merge_env(&mut self) -> Option<String> {
        self.merge_env_from(&ProcessEnv)
    }

    /// Applies `RELAY_LOG_LEVEL`. An unrecognised value is left out and
    /// handed back so the caller can report it once a subscriber exists.
    pub fn merge_env_from(&mut self, env: &impl EnvSource) -> Option<String> {
        let raw = env.non_empty(LOG_LEVEL_VAR)?;
        match LogLevel::parse(&raw) {
            Some(level) => {
                self.general.log_level = level;
                None
            }
            None => Some(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.log_level, LogLevel::Warn);
        assert_eq!(config.agent.temperature, 0.7);
        assert_eq!(config.agent.max_tokens, 2000);
        assert_eq!(config.tools.tool_timeout_secs, 60);
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            [general]
            log_level = "debug"

            [agent]
            temperature = 0.2
            max_iterations = 4

            [tools]
            disabled_tools = ["execute_shell"]
        "#;

        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.general.log_level, LogLevel::Debug);
        assert_eq!(config.agent.temperature, 0.2);
        assert_eq!(config.agent.max_iterations, 4);
        assert_eq!(config.agent.max_tokens, 2000);
        assert!(config.tools.is_disabled("execute_shell"));
        assert!(!config.tools.is_disabled("read_file"));
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml("[agent]\ntemperature = \"hot\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_env_override() {
        let env: HashMap<&str, &str> = HashMap::from([(LOG_LEVEL_VAR, "TRACE")]);
        let mut config = Config::default();
        assert_eq!(config.merge_env_from(&env), None);
        assert_eq!(config.general.log_level, LogLevel::Trace);

        let mut config = Config::default();
        assert_eq!(config.merge_env_from(&HashMap::<&str, &str>::new()), None);
        assert_eq!(config.general.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_unrecognised_env_level_is_returned() {
        let bogus: HashMap<&str, &str> = HashMap::from([(LOG_LEVEL_VAR, "loud")]);
        let mut config = Config::default();

        assert_eq!(config.merge_env_from(&bogus).as_deref(), Some("loud"));
        assert_eq!(config.general.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("relay.toml");
        std::fs::write(
            &path,
            "[agent]\nmax_tokens = 1000\n\n[tools]\ndisabled_tools = [\"write_file\"]\n",
        )
        .unwrap();

        let loaded = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(loaded.agent.max_tokens, 1000);
        assert!(loaded.tools.is_disabled("write_file"));
        assert_eq!(loaded.general, Config::default().general);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Config::load_from_file("/nonexistent/relay.toml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
