//! Ticket-related data models.

use serde::{Deserialize, Serialize};

/// Ticket creation form submission, sent as JSON to `POST /tickets`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketCreation {
    pub title: String,
    pub description: String,
}
