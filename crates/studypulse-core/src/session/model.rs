//! Session and UserProfile domain models.

use serde::{Deserialize, Serialize};

use crate::serde_util::{optional_string, string_list, string_or_number, truthy};

/// The authenticated user's public attributes.
///
/// The server sends `id` either as a string or as a number; both are kept as a string.
/// `is_admin` is read by truthiness, so `1` and `0` work as well as booleans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    pub username: String,
    #[serde(
        default,
        deserialize_with = "optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub display_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,
    #[serde(
        default,
        deserialize_with = "optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar_url: Option<String>,
    #[serde(default, deserialize_with = "truthy")]
    pub is_admin: bool,
    #[serde(
        default,
        deserialize_with = "optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub bio: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub interests: Vec<String>,
}

impl UserProfile {
    /// Creates a profile with only the required fields set.
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            display_name: None,
            email: None,
            avatar_url: None,
            is_admin: false,
            bio: None,
            interests: Vec::new(),
        }
    }

    /// Name shown in the UI: `display_name` when set and non-blank, else `username`.
    pub fn shown_name(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.username,
        }
    }

    /// Upper-cased first character of the shown name, used as avatar fallback.
    pub fn initial(&self) -> String {
        self.shown_name()
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "U".to_string())
    }
}

/// The currently authenticated identity.
///
/// A session always carries both a token and a user; there is no way to
/// build one without the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    user: UserProfile,
}

impl Session {
    pub fn new(token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    pub fn user_mut(&mut self) -> &mut UserProfile {
        &mut self.user
    }

    pub fn is_admin(&self) -> bool {
        self.user.is_admin
    }
}
