//! Configuration for the Archives App client.

mod env;

pub use env::{
    EnvSource, ProcessEnv, ENV_ACCEPT_INVALID_CERTS, ENV_APP_URL, ENV_PASSWORD, ENV_USERNAME,
};

use crate::errors::{ArchivesResult, ConfigurationError};
use secrecy::SecretString;
use std::time::Duration;
use url::Url;

/// Host used when no base URL is configured.
pub const DEFAULT_APP_URL: &str = "ppdo-prod-app-1.vm.aws.ucsc.edu";

/// Configuration for the Archives App client.
#[derive(Clone)]
pub struct ArchivesConfig {
    /// Scheme-qualified origin all endpoints are rooted at.
    pub base_url: Url,

    /// Value of the `user` header.
    pub username: String,

    /// Value of the `password` header.
    pub password: SecretString,

    /// Skip TLS certificate validation.
    pub accept_invalid_certs: bool,

    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,

    /// User agent string.
    pub user_agent: String,
}

impl std::fmt::Debug for ArchivesConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchivesConfig")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ArchivesConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ArchivesConfigBuilder {
        ArchivesConfigBuilder::new()
    }

    /// Loads configuration from the process environment.
    ///
    /// Reads `APP_URL`, `APP_USERNAME`, `APP_PASSWORD` and
    /// `APP_ACCEPT_INVALID_CERTS`, falling back to [`DEFAULT_APP_URL`] and
    /// empty credentials.
    pub fn from_env() -> ArchivesResult<Self> {
        Self::from_source(&ProcessEnv)
    }

    /// Loads configuration from an arbitrary variable source.
    pub fn from_source(source: &dyn EnvSource) -> ArchivesResult<Self> {
        let mut builder = Self::builder()
            .username(source.var(ENV_USERNAME).unwrap_or_default())
            .password(source.var(ENV_PASSWORD).unwrap_or_default());

        if let Some(url) = source.var(ENV_APP_URL).filter(|url| !url.trim().is_empty()) {
            builder = builder.base_url(url);
        }

        if let Some(flag) = source.var(ENV_ACCEPT_INVALID_CERTS) {
            builder = builder.accept_invalid_certs(env::parse_flag(&flag));
        }

        builder.build()
    }

    /// Origin without a trailing slash, used as the root of every endpoint.
    pub fn origin(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }
}

/// Prefixes `https://` unless the value already names the http or https scheme.
pub fn resolve_origin(app_url: &str) -> String {
    let app_url = app_url.trim();
    if app_url.starts_with("http://") || app_url.starts_with("https://") {
        app_url.to_string()
    } else {
        format!("https://{}", app_url)
    }
}

/// Builder for ArchivesConfig.
pub struct ArchivesConfigBuilder {
    base_url: Option<String>,
    username: String,
    password: SecretString,
    accept_invalid_certs: bool,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ArchivesConfigBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            username: String::new(),
            password: SecretString::new(String::new()),
            accept_invalid_certs: false,
            timeout: None,
            user_agent: None,
        }
    }

    /// Sets the server URL. A bare host gets `https://` prefixed.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the username sent in the `user` header.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Sets the password sent in the `password` header.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = SecretString::new(password.into());
        self
    }

    /// Disables TLS certificate validation.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent string.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> ArchivesResult<ArchivesConfig> {
        let resolved = resolve_origin(self.base_url.as_deref().unwrap_or(DEFAULT_APP_URL));

        let base_url = Url::parse(&resolved).map_err(|e| ConfigurationError::InvalidBaseUrl {
            url: resolved.clone(),
            reason: e.to_string(),
        })?;

        if base_url.cannot_be_a_base() || base_url.host_str().is_none() {
            return Err(ConfigurationError::InvalidBaseUrl {
                url: resolved,
                reason: "missing host".to_string(),
            }
            .into());
        }

        if base_url.query().is_some() || base_url.fragment().is_some() {
            return Err(ConfigurationError::InvalidBaseUrl {
                url: resolved,
                reason: "query and fragment are not allowed".to_string(),
            }
            .into());
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("integrations-archives-app/{}", env!("CARGO_PKG_VERSION")));

        Ok(ArchivesConfig {
            base_url,
            username: self.username,
            password: self.password,
            accept_invalid_certs: self.accept_invalid_certs,
            timeout: self.timeout,
            user_agent,
        })
    }
}

impl Default for ArchivesConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
