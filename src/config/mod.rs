//! Configuration structures and loading utilities.
//!
//! This module contains all configuration structures used by the ticket desk,
//! including environment variable loading and default values.

pub mod backend;
pub mod telemetry;

pub use backend::*;
pub use telemetry::*;

// Mutex to synchronize tests that modify environment variables
#[cfg(test)]
pub(crate) static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
