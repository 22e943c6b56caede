//! User interactions the form bridge is bound to.

use std::fmt;

/// One of the four bound interactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    LoginSubmit,
    LogoutClick,
    RegisterCustomerSubmit,
    CreateTicketSubmit,
}

impl Event {
    pub const ALL: [Event; 4] = [
        Event::LoginSubmit,
        Event::LogoutClick,
        Event::RegisterCustomerSubmit,
        Event::CreateTicketSubmit,
    ];

    /// Id of the form or button the handler is attached to
    pub const fn target(self) -> &'static str {
        match self {
            Event::LoginSubmit => "login-form",
            Event::LogoutClick => "logout-btn",
            Event::RegisterCustomerSubmit => "register-customer-form",
            Event::CreateTicketSubmit => "create-ticket-form",
        }
    }

    /// Form submissions suppress the default navigation; the button click has none
    pub const fn prevents_default(self) -> bool {
        !matches!(self, Event::LogoutClick)
    }

    pub fn from_target(id: &str) -> Option<Self> {
        Event::ALL.into_iter().find(|event| event.target() == id)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Event::LoginSubmit => "login",
            Event::LogoutClick => "logout",
            Event::RegisterCustomerSubmit => "register_customer",
            Event::CreateTicketSubmit => "create_ticket",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
