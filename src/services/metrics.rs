//! Prometheus metrics for backend calls made by the form bridge.

use crate::services::backend_client::Endpoint;
use prometheus::{CounterVec, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};
use std::time::Duration;

/// Request metrics registered on a caller-supplied registry
#[derive(Clone)]
pub struct BridgeMetrics {
    /// Backend requests by endpoint and outcome
    pub requests_total: CounterVec,

    /// Backend request duration by endpoint
    pub request_duration_seconds: HistogramVec,
}

impl BridgeMetrics {
    /// Create and register the metrics collectors
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let requests_total = CounterVec::new(
            Opts::new(
                "ticket_desk_requests_total",
                "Total backend requests by endpoint and outcome",
            ),
            &["endpoint", "outcome"],
        )?;

        let request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "ticket_desk_request_duration_seconds",
                "Duration of backend requests in seconds",
            )
            .buckets(vec![
                0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ]),
            &["endpoint"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(request_duration_seconds.clone()))?;

        Ok(Self {
            requests_total,
            request_duration_seconds,
        })
    }

    /// Record one finished request
    pub fn record(&self, endpoint: Endpoint, outcome: &str, duration: Duration) {
        self.requests_total
            .with_label_values(&[endpoint.label(), outcome])
            .inc();
        self.request_duration_seconds
            .with_label_values(&[endpoint.label()])
            .observe(duration.as_secs_f64());
    }
}

/// Render every metric in `registry` in the Prometheus text format
pub fn render(registry: &Registry) -> Result<String, prometheus::Error> {
    TextEncoder::new().encode_to_string(&registry.gather())
}
