//! The page surface the form bridge reads from and writes to.

use crate::models::{Field, Section};
use std::collections::HashMap;

/// A live page: input values, a login message area, toggleable sections,
/// blocking alerts and a full reload.
pub trait Page {
    /// Current value of an input. Missing inputs read as empty.
    fn field_value(&self, field: Field) -> String;

    /// Replace the text of the login message area
    fn set_login_message(&mut self, text: &str);

    fn set_section_visible(&mut self, section: Section, visible: bool);

    /// Show a message the user has to acknowledge
    fn alert(&mut self, text: &str);

    /// Discard all page state and return to the initial markup
    fn reload(&mut self);
}

/// Visibility of the four sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    pub login: bool,
    pub logout: bool,
    pub engineer: bool,
    pub customer: bool,
}

impl ViewState {
    /// Freshly loaded page: only the login section is shown
    pub const fn initial() -> Self {
        Self {
            login: true,
            logout: false,
            engineer: false,
            customer: false,
        }
    }

    pub fn is_visible(&self, section: Section) -> bool {
        match section {
            Section::Login => self.login,
            Section::Logout => self.logout,
            Section::Engineer => self.engineer,
            Section::Customer => self.customer,
        }
    }

    pub fn set(&mut self, section: Section, visible: bool) {
        match section {
            Section::Login => self.login = visible,
            Section::Logout => self.logout = visible,
            Section::Engineer => self.engineer = visible,
            Section::Customer => self.customer = visible,
        }
    }

    /// Visible sections in page order
    pub fn visible_sections(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|section| self.is_visible(*section))
            .collect()
    }

    /// True once a login succeeded and before the page is reloaded
    pub fn is_logged_in(&self) -> bool {
        self.logout && !self.login
    }
}

/// Headless page kept entirely in memory
#[derive(Debug, Clone)]
pub struct MemoryPage {
    fields: HashMap<Field, String>,
    login_message: String,
    view: ViewState,
    alerts: Vec<String>,
    reloads: usize,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
            login_message: String::new(),
            view: ViewState::initial(),
            alerts: Vec::new(),
            reloads: 0,
        }
    }

    /// Type a value into an input
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    pub fn with_field(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set_field(field, value);
        self
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn login_message(&self) -> &str {
        &self.login_message
    }

    /// Every alert shown so far, oldest first. Alerts survive reloads.
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn last_alert(&self) -> Option<&str> {
        self.alerts.last().map(String::as_str)
    }

    pub fn reload_count(&self) -> usize {
        self.reloads
    }
}

impl Page for MemoryPage {
    fn field_value(&self, field: Field) -> String {
        self.fields.get(&field).cloned().unwrap_or_default()
    }

    fn set_login_message(&mut self, text: &str) {
        self.login_message = text.to_string();
    }

    fn set_section_visible(&mut self, section: Section, visible: bool) {
        self.view.set(section, visible);
    }

    fn alert(&mut self, text: &str) {
        self.alerts.push(text.to_string());
    }

    fn reload(&mut self) {
        self.fields.clear();
        self.login_message.clear();
        self.view = ViewState::initial();
        self.reloads += 1;
    }
}
