// Settings module
// Runtime configuration injected into the app at startup

use serde::Deserialize;

pub const DEFAULT_ADMIN_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// GraphQL endpoint of the conference backend
    pub api_url: String,
    /// Conference code every query and mutation is scoped to
    pub conference_code: String,
    /// Base URL of the admin site hosting the item editor
    pub admin_base_url: String,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    pub fn new(api_url: impl Into<String>, conference_code: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            conference_code: conference_code.into(),
            admin_base_url: DEFAULT_ADMIN_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.conference_code.trim().is_empty() {
            return Err("Conference code cannot be empty".to_string());
        }

        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(format!("API URL must be http(s): {}", self.api_url));
        }

        if self.request_timeout_secs == 0 {
            return Err("Request timeout must be at least one second".to_string());
        }

        Ok(())
    }
}

/// One configuration layer; unset fields defer to lower layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialConfig {
    pub api_url: Option<String>,
    pub conference_code: Option<String>,
    pub admin_base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl PartialConfig {
    /// Overlay `higher` on top of `self`.
    pub fn merge(self, higher: PartialConfig) -> PartialConfig {
        PartialConfig {
            api_url: higher.api_url.or(self.api_url),
            conference_code: higher.conference_code.or(self.conference_code),
            admin_base_url: higher.admin_base_url.or(self.admin_base_url),
            request_timeout_secs: higher.request_timeout_secs.or(self.request_timeout_secs),
        }
    }

    /// Drop values that are still unsubstituted `{{ NAME }}` deploy placeholders
    /// or blank, so the next layer down is consulted instead.
    pub fn without_placeholders(self) -> PartialConfig {
        let keep = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty() && !is_placeholder(v))
        };

        PartialConfig {
            api_url: keep(self.api_url),
            conference_code: keep(self.conference_code),
            admin_base_url: keep(self.admin_base_url),
            request_timeout_secs: self.request_timeout_secs,
        }
    }
}

/// `{{ CONFERENCE_CODE }}`-style template left behind when the deploy step
/// did not substitute a value.
pub fn is_placeholder(value: &str) -> bool {
    let value = value.trim();
    value.starts_with("{{") && value.ends_with("}}")
}
