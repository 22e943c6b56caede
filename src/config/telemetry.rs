//! Logging configuration.

use std::env;

/// Configuration for the tracing subscriber
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
    /// Filter directive used when `RUST_LOG` is not set
    pub filter: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            json: false,
            filter: "info".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let json = env::var("TICKET_DESK_LOG_JSON")
            .unwrap_or_else(|_| "false".to_string())
            .parse()
            .unwrap_or(false);

        let filter = env::var("TICKET_DESK_LOG_FILTER").unwrap_or_else(|_| "info".to_string());

        Self { json, filter }
    }
}
