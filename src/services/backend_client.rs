//! HTTP client for the ticket backend.
//!
//! Every request goes through one client whose cookie jar holds the backend
//! session, so a successful `POST /login` authenticates the later calls the
//! same way a browser sending `credentials: include` would. All responses are
//! funnelled through a single result helper that separates transport failures
//! from replies before any body is parsed.

use crate::config::BackendConfig;
use crate::models::{ApiReply, CustomerRegistration, LoginRequest, TicketCreation};
use crate::services::metrics::BridgeMetrics;
use reqwest::{Client, RequestBuilder, StatusCode};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};
use url::Url;

/// Backend endpoints used by the form bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Login,
    Logout,
    Customers,
    Tickets,
}

impl Endpoint {
    /// Path relative to the configured base URL
    pub const fn path(self) -> &'static str {
        match self {
            Endpoint::Login => "login",
            Endpoint::Logout => "logout",
            Endpoint::Customers => "customers",
            Endpoint::Tickets => "tickets",
        }
    }

    /// Label used in logs and metrics
    pub const fn label(self) -> &'static str {
        match self {
            Endpoint::Login => "/login",
            Endpoint::Logout => "/logout",
            Endpoint::Customers => "/customers",
            Endpoint::Tickets => "/tickets",
        }
    }
}

/// A reply the backend actually sent, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendReply {
    pub status: StatusCode,
    pub reply: ApiReply,
}

impl BackendReply {
    /// Whether the status is in the 2xx range
    pub fn ok(&self) -> bool {
        self.status.is_success()
    }

    /// Text to show the user for this reply
    pub fn display_text(&self) -> String {
        self.reply.display_text(self.status)
    }
}

/// Ticket backend client sharing one session cookie jar
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: Url,
    config: BackendConfig,
    metrics: Option<BridgeMetrics>,
}

impl BackendClient {
    /// Create a new backend client
    pub fn new(
        config: BackendConfig,
        metrics: Option<BridgeMetrics>,
    ) -> Result<Self, BridgeError> {
        let base_url = parse_base_url(&config.base_url)?;

        let mut builder = Client::builder()
            .cookie_store(true)
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds));
        if let Some(seconds) = config.request_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build().map_err(BridgeError::Client)?;

        Ok(Self {
            client,
            base_url,
            config,
            metrics,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// `POST /login` with a URL-encoded body
    pub async fn login(&self, request: &LoginRequest) -> Result<BackendReply, BridgeError> {
        let url = self.endpoint_url(Endpoint::Login)?;
        let builder = self.client.post(url).form(request);
        self.send(Endpoint::Login, builder).await
    }

    /// `POST /logout` without a body
    pub async fn logout(&self) -> Result<BackendReply, BridgeError> {
        let url = self.endpoint_url(Endpoint::Logout)?;
        self.send(Endpoint::Logout, self.client.post(url)).await
    }

    /// `POST /customers` with a JSON body
    pub async fn register_customer(
        &self,
        registration: &CustomerRegistration,
    ) -> Result<BackendReply, BridgeError> {
        let url = self.endpoint_url(Endpoint::Customers)?;
        let builder = self.client.post(url).json(registration);
        self.send(Endpoint::Customers, builder).await
    }

    /// `POST /tickets` with a JSON body
    pub async fn create_ticket(
        &self,
        ticket: &TicketCreation,
    ) -> Result<BackendReply, BridgeError> {
        let url = self.endpoint_url(Endpoint::Tickets)?;
        let builder = self.client.post(url).json(ticket);
        self.send(Endpoint::Tickets, builder).await
    }

    /// Resolve an endpoint against the base URL
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, BridgeError> {
        self.base_url
            .join(endpoint.path())
            .map_err(|e| BridgeError::InvalidUrl(format!("{}: {e}", endpoint.label())))
    }

    async fn send(
        &self,
        endpoint: Endpoint,
        request: RequestBuilder,
    ) -> Result<BackendReply, BridgeError> {
        let start = Instant::now();
        let result = Self::finish(request.send().await).await;
        let duration = start.elapsed();

        match &result {
            Ok(reply) => {
                if self.config.enable_detailed_logging {
                    info!(
                        endpoint = endpoint.label(),
                        status = reply.status.as_u16(),
                        duration_ms = duration.as_millis(),
                        "Backend replied"
                    );
                }
                let outcome = if reply.ok() { "ok" } else { "rejected" };
                self.record(endpoint, outcome, duration);
            }
            Err(err) => {
                if self.config.enable_detailed_logging {
                    error!(
                        endpoint = endpoint.label(),
                        error = %err,
                        duration_ms = duration.as_millis(),
                        "Backend request failed"
                    );
                }
                self.record(endpoint, err.outcome(), duration);
            }
        }

        result
    }

    /// Turn a transport result into a reply.
    ///
    /// Transport failures are reported before the body is touched. An empty
    /// body is an empty reply; any other body must be JSON.
    async fn finish(
        sent: Result<reqwest::Response, reqwest::Error>,
    ) -> Result<BackendReply, BridgeError> {
        let response = sent.map_err(BridgeError::from_transport)?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(BridgeError::from_transport)?;

        let reply = parse_reply(status, &body)?;
        Ok(BackendReply { status, reply })
    }

    fn record(&self, endpoint: Endpoint, outcome: &str, duration: Duration) {
        if let Some(metrics) = &self.metrics {
            metrics.record(endpoint, outcome, duration);
        }
    }
}

fn parse_base_url(raw: &str) -> Result<Url, BridgeError> {
    let mut url =
        Url::parse(raw.trim()).map_err(|e| BridgeError::InvalidUrl(format!("{raw}: {e}")))?;

    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(BridgeError::InvalidUrl(format!(
            "{raw}: expected an http or https base URL"
        )));
    }

    // Relative joins keep any path prefix only when the base ends with a slash
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}

/// Only bodies that are not JSON at all are malformed. JSON that is not an
/// object carries no reply fields.
fn parse_reply(status: StatusCode, body: &[u8]) -> Result<ApiReply, BridgeError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ApiReply::default());
    }

    let malformed = |source: serde_json::Error| {
        warn!(
            status = status.as_u16(),
            body_len = body.len(),
            "Backend reply is not JSON"
        );
        BridgeError::MalformedResponse {
            status: status.as_u16(),
            source,
        }
    };

    match serde_json::from_slice::<serde_json::Value>(body).map_err(malformed)? {
        value @ serde_json::Value::Object(_) => serde_json::from_value(value).map_err(malformed),
        _ => Ok(ApiReply::default()),
    }
}

/// Errors raised before a backend reply could be read
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("Network error: {0}")]
    Transport(reqwest::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("Malformed response with status {status}: {source}")]
    MalformedResponse {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(reqwest::Error),
}

impl BridgeError {
    fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BridgeError::Timeout
        } else {
            BridgeError::Transport(err)
        }
    }

    /// Outcome label used in metrics
    pub fn outcome(&self) -> &'static str {
        match self {
            BridgeError::Transport(_) => "transport_error",
            BridgeError::Timeout => "timeout",
            BridgeError::MalformedResponse { .. } => "malformed",
            BridgeError::InvalidUrl(_) | BridgeError::Client(_) => "error",
        }
    }

    /// Get a user-friendly error message for display on the page
    pub fn user_message(&self) -> String {
        match self {
            BridgeError::Transport(_) => {
                "Could not reach the ticket service, please check your connection".to_string()
            }
            BridgeError::Timeout => "The ticket service did not answer in time".to_string(),
            BridgeError::MalformedResponse { status, .. } => {
                format!("The ticket service sent an unreadable reply (status {status})")
            }
            BridgeError::InvalidUrl(_) => "The ticket service address is not valid".to_string(),
            BridgeError::Client(_) => "The HTTP client could not be started".to_string(),
        }
    }
}
