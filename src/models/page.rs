//! Identifiers of the page elements the form bridge reads and toggles.

use std::fmt;

/// Element that receives the login handler's message text
pub const LOGIN_MESSAGE_ID: &str = "login-message";

/// Input fields read by the handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Username,
    Password,
    CustomerUsername,
    CustomerPassword,
    TicketTitle,
    TicketDescription,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Username,
        Field::Password,
        Field::CustomerUsername,
        Field::CustomerPassword,
        Field::TicketTitle,
        Field::TicketDescription,
    ];

    /// Element id of the input
    pub const fn id(self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Password => "password",
            Field::CustomerUsername => "customer-username",
            Field::CustomerPassword => "customer-password",
            Field::TicketTitle => "ticket-title",
            Field::TicketDescription => "ticket-description",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Field::ALL.into_iter().find(|field| field.id() == id)
    }

    /// Whether the input holds a secret that must not be echoed or logged
    pub const fn is_secret(self) -> bool {
        matches!(self, Field::Password | Field::CustomerPassword)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Page regions whose visibility reflects login and role state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Login,
    Logout,
    Engineer,
    Customer,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Login,
        Section::Logout,
        Section::Engineer,
        Section::Customer,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            Section::Login => "login-section",
            Section::Logout => "logout-section",
            Section::Engineer => "engineer-section",
            Section::Customer => "customer-section",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Section::ALL.into_iter().find(|section| section.id() == id)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
