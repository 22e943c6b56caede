//! Configuration for the ticket backend connection.

use serde::{Deserialize, Serialize};
use std::env;

/// Default backend address, matching the backend's development port
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Account name treated as an engineer when the backend does not confirm a role
pub const DEFAULT_ENGINEER_USERNAME: &str = "default_engineer";

/// Configuration for the backend HTTP client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL the endpoint paths are resolved against
    pub base_url: String,

    /// Connection timeout (in seconds)
    pub connect_timeout_seconds: u64,

    /// Overall request timeout (in seconds). Unset means requests may wait forever.
    pub request_timeout_seconds: Option<u64>,

    /// Username used for the role fallback after login
    pub engineer_username: String,

    /// Log every request with status and duration
    pub enable_detailed_logging: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_seconds: 10,
            request_timeout_seconds: None,
            engineer_username: DEFAULT_ENGINEER_USERNAME.to_string(),
            enable_detailed_logging: true,
        }
    }
}

impl BackendConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let base_url = env::var("TICKET_DESK_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let connect_timeout_seconds = env::var("TICKET_DESK_CONNECT_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let request_timeout_seconds = env::var("TICKET_DESK_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|seconds: &u64| *seconds > 0);

        let engineer_username = env::var("TICKET_DESK_ENGINEER_USERNAME")
            .unwrap_or_else(|_| DEFAULT_ENGINEER_USERNAME.to_string());

        let enable_detailed_logging = env::var("TICKET_DESK_DETAILED_LOGGING")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(true);

        Self {
            base_url,
            connect_timeout_seconds,
            request_timeout_seconds,
            engineer_username,
            enable_detailed_logging,
        }
    }

    /// Replace the base URL, keeping every other setting
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ENV_MUTEX;

    const VARS: [&str; 5] = [
        "TICKET_DESK_BASE_URL",
        "TICKET_DESK_CONNECT_TIMEOUT",
        "TICKET_DESK_REQUEST_TIMEOUT",
        "TICKET_DESK_ENGINEER_USERNAME",
        "TICKET_DESK_DETAILED_LOGGING",
    ];

    fn clear_env() {
        for var in VARS {
            unsafe {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_backend_config_defaults() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_env();

        let config = BackendConfig::from_env();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.connect_timeout_seconds, 10);
        assert_eq!(config.request_timeout_seconds, None);
        assert_eq!(config.engineer_username, "default_engineer");
        assert!(config.enable_detailed_logging);
    }

    #[test]
    fn test_backend_config_from_env() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_env();

        unsafe {
            env::set_var("TICKET_DESK_BASE_URL", "https://tickets.example.com/app");
            env::set_var("TICKET_DESK_CONNECT_TIMEOUT", "3");
            env::set_var("TICKET_DESK_REQUEST_TIMEOUT", "30");
            env::set_var("TICKET_DESK_ENGINEER_USERNAME", "ops");
            env::set_var("TICKET_DESK_DETAILED_LOGGING", "false");
        }

        let config = BackendConfig::from_env();
        assert_eq!(config.base_url, "https://tickets.example.com/app");
        assert_eq!(config.connect_timeout_seconds, 3);
        assert_eq!(config.request_timeout_seconds, Some(30));
        assert_eq!(config.engineer_username, "ops");
        assert!(!config.enable_detailed_logging);

        clear_env();
    }

    #[test]
    fn test_zero_or_invalid_request_timeout_is_unset() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_env();

        unsafe {
            env::set_var("TICKET_DESK_REQUEST_TIMEOUT", "0");
        }
        assert_eq!(BackendConfig::from_env().request_timeout_seconds, None);

        unsafe {
            env::set_var("TICKET_DESK_REQUEST_TIMEOUT", "soon");
        }
        assert_eq!(BackendConfig::from_env().request_timeout_seconds, None);

        clear_env();
    }
}
