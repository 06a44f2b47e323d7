//! Client configuration.

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_API_URL: &str = "STOCKROOM_API_URL";
pub const ENV_AUTH_TOKEN: &str = "STOCKROOM_AUTH_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "STOCKROOM_HTTP_TIMEOUT_SECS";

/// Connection settings for the inventory API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Bearer token from a previous login, if any.
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Apply explicit settings (command-line flags) on top of this config.
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        token: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Self {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        if let Some(token) = token {
            self.token = Some(token);
        }
        if let Some(secs) = timeout_secs {
            self.timeout_secs = secs;
        }
        self
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup (testable without
    /// touching the process environment).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(ENV_API_URL)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let token = lookup(ENV_AUTH_TOKEN).filter(|v| !v.trim().is_empty());

        let timeout_secs = match lookup(ENV_TIMEOUT_SECS) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "invalid {ENV_TIMEOUT_SECS}; using default");
                DEFAULT_TIMEOUT_SECS
            }),
            None => DEFAULT_TIMEOUT_SECS,
        };

        Self {
            base_url,
            token,
            timeout_secs,
        }
    }
}
