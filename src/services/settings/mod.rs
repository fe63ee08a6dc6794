//! Layered configuration loading.
//!
//! Precedence, lowest first: built-in defaults, `config.toml` in the platform
//! config directory, `SCHEDULE_BUILDER_*` environment variables, then a launch
//! URL or query string passed as the first command-line argument.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;

use crate::models::settings::{
    AppConfig, PartialConfig, DEFAULT_ADMIN_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS,
};

pub const ENV_API_URL: &str = "SCHEDULE_BUILDER_API_URL";
pub const ENV_CONFERENCE: &str = "SCHEDULE_BUILDER_CONFERENCE";
pub const ENV_ADMIN_URL: &str = "SCHEDULE_BUILDER_ADMIN_URL";
pub const ENV_TIMEOUT: &str = "SCHEDULE_BUILDER_TIMEOUT_SECS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("missing required setting `{0}`")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Location of `config.toml` for this platform, if a home directory exists.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "Conference", "ScheduleBuilder")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
    env: Vec<(String, String)>,
    launch_arg: Option<String>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader wired to the real process environment and arguments.
    pub fn from_environment() -> Self {
        Self {
            file: default_config_path(),
            env: std::env::vars()
                .filter(|(key, _)| key.starts_with("SCHEDULE_BUILDER_"))
                .collect(),
            launch_arg: std::env::args().nth(1),
        }
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    pub fn with_env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    pub fn with_launch_arg(mut self, arg: impl Into<String>) -> Self {
        self.launch_arg = Some(arg.into());
        self
    }

    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let defaults = PartialConfig {
            admin_base_url: Some(DEFAULT_ADMIN_BASE_URL.to_string()),
            request_timeout_secs: Some(DEFAULT_REQUEST_TIMEOUT_SECS),
            ..PartialConfig::default()
        };

        let file_layer = match &self.file {
            Some(path) => layer_from_file(path)?,
            None => PartialConfig::default(),
        };
        let env_layer = layer_from_env(self.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;
        let query_layer = self
            .launch_arg
            .as_deref()
            .map(layer_from_query)
            .transpose()?
            .unwrap_or_default();

        let merged = defaults
            .merge(file_layer.without_placeholders())
            .merge(env_layer.without_placeholders())
            .merge(query_layer.without_placeholders());

        resolve(merged)
    }
}

/// Turn a merged layer into a complete config.
pub fn resolve(layer: PartialConfig) -> Result<AppConfig, ConfigError> {
    let config = AppConfig {
        api_url: layer.api_url.ok_or(ConfigError::Missing("api_url"))?,
        conference_code: layer
            .conference_code
            .ok_or(ConfigError::Missing("conference_code"))?,
        admin_base_url: layer
            .admin_base_url
            .unwrap_or_else(|| DEFAULT_ADMIN_BASE_URL.to_string()),
        request_timeout_secs: layer
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
    };

    config.validate().map_err(ConfigError::Invalid)?;
    Ok(config)
}

/// A missing file is not an error; the app runs from env/args alone.
pub fn layer_from_file(path: &Path) -> Result<PartialConfig, ConfigError> {
    if !path.exists() {
        log::debug!("No config file at {}", path.display());
        return Ok(PartialConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let layer = toml::from_str::<PartialConfig>(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("Loaded config file {}", path.display());
    Ok(layer)
}

pub fn layer_from_env<'a, I>(vars: I) -> Result<PartialConfig, ConfigError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut layer = PartialConfig::default();
    for (key, value) in vars {
        match key {
            ENV_API_URL => layer.api_url = Some(value.to_string()),
            ENV_CONFERENCE => layer.conference_code = Some(value.to_string()),
            ENV_ADMIN_URL => layer.admin_base_url = Some(value.to_string()),
            ENV_TIMEOUT => layer.request_timeout_secs = Some(parse_timeout(value)?),
            _ => {}
        }
    }
    Ok(layer)
}

/// Accepts either a full URL (`app://open?conference=x`) or a bare query
/// string (`conference=x&api=...`).
pub fn layer_from_query(input: &str) -> Result<PartialConfig, ConfigError> {
    let query = match input.split_once('?') {
        Some((_, query)) => query,
        None if input.contains('=') => input,
        None => return Ok(PartialConfig::default()),
    };
    let query = query.split('#').next().unwrap_or_default();

    let mut layer = PartialConfig::default();
    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = urlencoding::decode(&raw_value.replace('+', " "))
            .map_err(|err| ConfigError::Invalid(format!("bad query value for `{}`: {}", key, err)))?
            .into_owned();

        match key {
            "conference" | "conferenceCode" | "conference_code" => {
                layer.conference_code = Some(value)
            }
            "api" | "apiUrl" | "api_url" => layer.api_url = Some(value),
            "admin" | "adminUrl" | "admin_url" => layer.admin_base_url = Some(value),
            "timeout" => layer.request_timeout_secs = Some(parse_timeout(&value)?),
            other => log::debug!("Ignoring unknown launch parameter `{}`", other),
        }
    }
    Ok(layer)
}

fn parse_timeout(value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(format!("timeout must be whole seconds, got `{}`", value)))
}
