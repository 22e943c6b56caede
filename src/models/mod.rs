//! Data models for the ticket desk.
//!
//! This module contains the request payloads sent to the ticket backend, the
//! shared response model and the identifiers of the page elements the form
//! bridge works with.

pub mod api;
pub mod auth;
pub mod page;
pub mod ticket;

pub use api::*;
pub use auth::*;
pub use page::*;
pub use ticket::*;
