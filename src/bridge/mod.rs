//! The form bridge: page abstraction, bound events and their handlers.

pub mod event;
pub mod form_bridge;
pub mod page;

pub use event::Event;
pub use form_bridge::{FormBridge, HandlerOutcome};
pub use page::{MemoryPage, Page, ViewState};
