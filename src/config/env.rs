//! Environment variable source for client configuration.

use std::collections::HashMap;
use std::env;

/// Server URL, with or without scheme.
pub const ENV_APP_URL: &str = "APP_URL";
/// Username sent in the `user` header.
pub const ENV_USERNAME: &str = "APP_USERNAME";
/// Password sent in the `password` header.
pub const ENV_PASSWORD: &str = "APP_PASSWORD";
/// Set to `true`, `1`, `yes` or `on` to skip certificate validation.
pub const ENV_ACCEPT_INVALID_CERTS: &str = "APP_ACCEPT_INVALID_CERTS";

/// Source of configuration variables.
///
/// [`ProcessEnv`] reads the process environment. A `HashMap<String, String>`
/// can stand in for it in tests.
pub trait EnvSource {
    /// Returns the value of `key`, if set.
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads variables from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

pub(crate) fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
