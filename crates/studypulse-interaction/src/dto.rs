//! Request and response schemas for each API endpoint.
//!
//! Responses are decoded at the client boundary; a body that does not match
//! its schema becomes `ApiError::MalformedResponse`.

use serde::{Deserialize, Serialize};
use studypulse_core::UserProfile;
use studypulse_core::serde_util::string_or_number;

/// Fields every response may carry: `{success, detail}`.
///
/// Endpoints documented as plain "200 OK" may omit `success`; it then counts as true.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Envelope {
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default)]
    pub detail: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of `POST /login`.
///
/// `token` and `user` are only required when `success` is true; see
/// [`LoginResponse::into_outcome`].
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub detail: Option<String>,
}

/// What a login response means once validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Accepted { token: String, user: UserProfile },
    Rejected { detail: Option<String> },
}

impl LoginResponse {
    /// Validates the response. `Err` carries a description of the missing field.
    pub fn into_outcome(self) -> Result<LoginOutcome, String> {
        if !self.success {
            return Ok(LoginOutcome::Rejected {
                detail: self.detail,
            });
        }

        let token = self
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| "login succeeded without a token".to_string())?;
        let user = self
            .user
            .filter(|u| !u.username.trim().is_empty())
            .ok_or_else(|| "login succeeded without a user".to_string())?;

        Ok(LoginOutcome::Accepted { token, user })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct FriendSummary {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FriendsResponse {
    pub friends: Vec<FriendSummary>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct FriendRequest {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub from_user_id: String,
    pub from_username: String,
    #[serde(default)]
    pub from_display_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FriendRequestsResponse {
    pub requests: Vec<FriendRequest>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProfileUpdateRequest {
    pub display_name: String,
    pub bio: String,
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
pub struct AdminStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub new_users_today: u64,
    #[serde(default)]
    pub total_friendships: u64,
    #[serde(default)]
    pub total_messages: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminDashboardResponse {
    pub stats: AdminStats,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct AdminUser {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_login: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminUsersResponse {
    pub users: Vec<AdminUser>,
}
