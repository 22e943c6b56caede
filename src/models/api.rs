//! Backend response models shared by every endpoint.

use crate::models::Role;
use reqwest::StatusCode;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// JSON body returned by the ticket backend.
///
/// Every endpoint answers with either `message` or `error`; a successful login
/// may also carry the account `role`. All fields are optional because the
/// backend is free to omit any of them, and a field of an unexpected type
/// never rejects the whole reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiReply {
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_role",
        skip_serializing_if = "Option::is_none"
    )]
    pub role: Option<String>,
}

/// Strings as they are, other scalars stringified, anything else absent
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    })
}

/// A role name, or an authority list such as `["ROLE_CUSTOMER"]` or
/// `[{"authority":"ROLE_CUSTOMER"}]`. From a list the first recognised role
/// is taken, else its first entry.
fn lenient_role<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let names: Vec<String> = match Value::deserialize(deserializer)? {
        Value::String(name) => return Ok(Some(name)),
        Value::Array(items) => items.into_iter().filter_map(authority_name).collect(),
        other => return Ok(authority_name(other)),
    };

    let recognised = names.iter().position(|name| Role::parse(name).is_some());
    Ok(names.into_iter().nth(recognised.unwrap_or(0)))
}

fn authority_name(value: Value) -> Option<String> {
    match value {
        Value::String(name) => Some(name),
        Value::Object(mut fields) => match fields.remove("authority") {
            Some(Value::String(name)) => Some(name),
            _ => None,
        },
        _ => None,
    }
}

impl ApiReply {
    /// The text the backend wants shown: `message` first, then `error`.
    /// Empty strings count as absent.
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .or_else(|| self.error.as_deref().filter(|e| !e.is_empty()))
    }

    /// Text to display for a reply received with `status`
    pub fn display_text(&self, status: StatusCode) -> String {
        match self.text() {
            Some(text) => text.to_string(),
            None => status.to_string(),
        }
    }
}
