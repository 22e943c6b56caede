//! Authentication-related data models.

use crate::models::Section;
use serde::{Deserialize, Serialize};

/// Login form submission, sent URL-encoded to `POST /login`
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Customer registration form submission, sent as JSON to `POST /customers`
#[derive(Clone, Serialize, Deserialize)]
pub struct CustomerRegistration {
    pub username: String,
    pub password: String,
}

// Passwords stay out of Debug output so request models can be logged safely.
impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl std::fmt::Debug for CustomerRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomerRegistration")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Role of a logged-in account, deciding which section the page reveals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Engineer,
    Customer,
}

impl Role {
    /// Parse a backend role name such as `ENGINEER`, `customer` or `ROLE_ENGINEER`
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let name = trimmed
            .get(..5)
            .filter(|prefix| prefix.eq_ignore_ascii_case("ROLE_"))
            .map(|_| &trimmed[5..])
            .unwrap_or(trimmed);

        if name.eq_ignore_ascii_case("engineer") {
            Some(Role::Engineer)
        } else if name.eq_ignore_ascii_case("customer") {
            Some(Role::Customer)
        } else {
            None
        }
    }

    /// Decide the role after a successful login.
    ///
    /// A role confirmed by the backend always wins. Without one, the submitted
    /// username is compared against the configured engineer account name.
    pub fn resolve(confirmed: Option<&str>, username: &str, engineer_username: &str) -> Self {
        if let Some(role) = confirmed.and_then(Role::parse) {
            return role;
        }

        if username == engineer_username {
            Role::Engineer
        } else {
            Role::Customer
        }
    }

    /// The page section revealed for this role
    pub fn section(self) -> Section {
        match self {
            Role::Engineer => Section::Engineer,
            Role::Customer => Section::Customer,
        }
    }
}
