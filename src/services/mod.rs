//! Service layer modules.
//!
//! This module contains the backend HTTP client used by the form bridge and
//! the metrics it records.

pub mod backend_client;
pub mod metrics;

pub use backend_client::*;
pub use metrics::BridgeMetrics;
