//! The user resource and its wire format.
//!
//! # Design
//! `User` mirrors the mock-server's schema but is defined independently; the
//! integration tests catch any drift between the two crates. `description`
//! is omitted from the wire entirely when absent, never sent as `null`.
//!
//! Responses are read leniently through `User::from_json`: a field that is
//! missing or has the wrong type takes its default instead of failing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body parameters sent with a request.
pub type Parameters = Map<String, Value>;

/// A single user as exchanged with the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    #[serde(rename = "userId")]
    user_id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl User {
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            email: email.into(),
            description,
        }
    }

    /// Stable identifier; fixed once the user exists.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Read a user from a JSON tree. Never fails.
    ///
    /// Missing or non-string `userId`, `name` and `email` become `""`; a
    /// missing or non-string `description` becomes `None`.
    pub fn from_json(json: &Value) -> Self {
        let text = |field: &str| json[field].as_str().unwrap_or_default().to_string();
        Self {
            user_id: text("userId"),
            name: text("name"),
            email: text("email"),
            description: json["description"].as_str().map(str::to_string),
        }
    }

    /// The field mapping sent as the body of an update.
    pub fn to_parameters(&self) -> Parameters {
        let mut parameters = Parameters::new();
        parameters.insert("userId".to_string(), Value::from(self.user_id.as_str()));
        parameters.insert("name".to_string(), Value::from(self.name.as_str()));
        parameters.insert("email".to_string(), Value::from(self.email.as_str()));
        if let Some(description) = &self.description {
            parameters.insert("description".to_string(), Value::from(description.as_str()));
        }
        parameters
    }
}
