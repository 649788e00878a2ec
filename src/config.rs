use std::env;
use std::path::PathBuf;

use crate::api_key::resolve_api_key;
use crate::cli::Cli;
use crate::error::ConfigError;

const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    Interactive,
    OneShot(String),
}

/// Validated runtime settings. Built once at startup and never mutated.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub api_base_url: String,
    pub model: String,
    pub system_message: String,
    pub max_history: usize,
    pub mode: RunMode,
    pub log_path: Option<PathBuf>,
    pub request_timeout_secs: Option<u64>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("model", &self.model)
            .field("system_message", &self.system_message)
            .field("max_history", &self.max_history)
            .field("mode", &self.mode)
            .field("log_path", &self.log_path)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        Self::from_cli_with(cli, |key| env::var(key).ok())
    }

    fn from_cli_with(
        cli: Cli,
        mut get_var: impl FnMut(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_key = resolve_api_key(cli.key.as_deref(), get_var("OPENAI_API_KEY").as_deref())
            .ok_or(ConfigError::MissingApiKey)?;
        let api_base_url = parse_base_url(get_var("OPENAI_BASE_URL").as_deref());
        let request_timeout_secs = parse_timeout_secs(get_var("OPENAI_TIMEOUT_SECS").as_deref());
        let mode = match cli.prompt {
            Some(prompt) => RunMode::OneShot(prompt),
            None => RunMode::Interactive,
        };

        Ok(Self {
            api_key,
            api_base_url,
            model: cli.model,
            system_message: cli.system_message.unwrap_or_default(),
            max_history: cli.max_history,
            mode,
            log_path: cli.log,
            request_timeout_secs,
        })
    }
}

fn parse_base_url(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_API_BASE_URL)
        .to_string()
}

fn parse_timeout_secs(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value > 0)
}
