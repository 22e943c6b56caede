//! Ticket Desk - a front-end for the basic ticket-management backend
//!
//! The crate binds four page interactions to the backend's REST endpoints
//! and mirrors every reply back into the page:
//! - login form → `POST /login` (URL-encoded), reveals the logged-in sections
//! - logout button → `POST /logout`, then reloads the page
//! - customer registration form → `POST /customers` (JSON)
//! - ticket creation form → `POST /tickets` (JSON)
//!
//! ## Architecture
//!
//! The codebase is organized into focused modules:
//! - `models/` - Request payloads, the shared reply model and page element ids
//! - `services/` - Backend HTTP client with its session cookie jar, and metrics
//! - `bridge/` - The `Page` abstraction, bound events and the `FormBridge` handlers
//! - `config/` - Configuration structures and environment loading
//! - `telemetry` - Tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```no_run
//! use ticket_desk::{BackendConfig, Event, FormBridge, Field, MemoryPage};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bridge = FormBridge::from_config(BackendConfig::from_env(), None)?;
//!     let mut page = MemoryPage::new()
//!         .with_field(Field::Username, "default_engineer")
//!         .with_field(Field::Password, "secret");
//!
//!     let outcome = bridge.dispatch(Event::LoginSubmit, &mut page).await;
//!     println!("{} -> {:?}", outcome.displayed, page.view());
//!     Ok(())
//! }
//! ```

pub mod bridge;
pub mod config;
pub mod models;
pub mod services;
pub mod telemetry;

// Re-export commonly used types and functions for convenience
pub use bridge::{Event, FormBridge, HandlerOutcome, MemoryPage, Page, ViewState};
pub use config::{BackendConfig, TelemetryConfig};
pub use models::{
    ApiReply, CustomerRegistration, Field, LOGIN_MESSAGE_ID, LoginRequest, Role, Section,
    TicketCreation,
};
pub use services::{BackendClient, BackendReply, BridgeError, BridgeMetrics, Endpoint};
pub use telemetry::init_tracing;
