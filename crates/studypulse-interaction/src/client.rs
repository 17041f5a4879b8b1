//! API client: default headers, JSON decoding and typed endpoints.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use studypulse_core::{ApiError, SessionCell};

use crate::dto::{
    AdminDashboardResponse, AdminStats, AdminUser, AdminUsersResponse, Envelope, FriendRequest,
    FriendRequestsResponse, FriendSummary, FriendsResponse, LoginRequest, LoginResponse,
    ProfileUpdateRequest, RegisterRequest,
};
use crate::transport::{ApiRequest, ApiTransport, HttpMethod};

/// Caller-supplied request options. Headers here override the defaults.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Sends no bearer token even while a session is active.
    pub anonymous: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: HttpMethod::Get,
            headers: Vec::new(),
            body: None,
            anonymous: false,
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: Option<Value>) -> Self {
        Self {
            method: HttpMethod::Post,
            body,
            ..Self::default()
        }
    }

    pub fn put(body: Value) -> Self {
        Self {
            method: HttpMethod::Put,
            body: Some(body),
            ..Self::default()
        }
    }

    /// For endpoints that take no credentials (`/login`, `/register`).
    pub fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Thin JSON client over an [`ApiTransport`].
///
/// The bearer token is read from the shared [`SessionCell`] on every call, so
/// logging in or out takes effect on the next request.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn ApiTransport>,
    session: SessionCell,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn ApiTransport>, session: SessionCell) -> Self {
        Self { transport, session }
    }

    /// `Content-Type: application/json`, plus `Authorization: Bearer <token>`
    /// while a session is active.
    pub fn default_headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(token) = self.session.token() {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
        headers
    }

    /// Sends a request and decodes the JSON body.
    ///
    /// HTTP error statuses are not errors here: their JSON body is returned
    /// like any other. The exception is a 401 on a request that carried a
    /// bearer token, which becomes `ApiError::Unauthorized`. An empty body decodes to `null`.
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Value, ApiError> {
        self.send(path, options).await.map(|(_, body)| body)
    }

    async fn send(&self, path: &str, options: RequestOptions) -> Result<(u16, Value), ApiError> {
        let mut defaults = self.default_headers();
        if options.anonymous {
            defaults.retain(|(name, _)| !name.eq_ignore_ascii_case("Authorization"));
        }
        let authenticated = defaults
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case("Authorization"));
        let headers = merge_headers(defaults, options.headers);

        let request = ApiRequest {
            method: options.method,
            path: path.to_string(),
            headers,
            body: options.body,
        };

        tracing::debug!("[ApiClient] {} {}", request.method.as_str(), path);

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!("[ApiClient] {} failed: {}", path, e);
            e
        })?;

        if response.status == 401 && authenticated {
            tracing::warn!("[ApiClient] {} rejected the bearer token", path);
            return Err(ApiError::Unauthorized);
        }

        let body = if response.body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&response.body).map_err(|e| {
                ApiError::MalformedResponse(format!("{} (status {}): {}", path, response.status, e))
            })?
        };

        Ok((response.status, body))
    }

    /// Sends a request to a data endpoint and decodes it into `T`.
    ///
    /// `{success: false}` bodies and non-2xx statuses become `ApiError::Rejected`.
    async fn call<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let (status, body) = self.send(path, options).await?;
        check_rejection(path, status, &body)?;
        serde_json::from_value(body)
            .map_err(|e| ApiError::MalformedResponse(format!("{}: {}", path, e)))
    }

    /// Like [`call`](Self::call) for endpoints that only acknowledge.
    async fn acknowledge(&self, path: &str, options: RequestOptions) -> Result<(), ApiError> {
        let (status, body) = self.send(path, options).await?;
        check_rejection(path, status, &body)
    }

    // ============================================================================
    // Endpoints
    // ============================================================================

    /// `POST /login`. The raw response is returned so the caller can tell a
    /// rejection from an acceptance.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let body = self
            .request(
                "/login",
                RequestOptions::post(Some(to_json(credentials)?)).anonymous(),
            )
            .await?;
        decode("/login", body)
    }

    /// `POST /register`.
    pub async fn register(&self, form: &RegisterRequest) -> Result<Envelope, ApiError> {
        let body = self
            .request(
                "/register",
                RequestOptions::post(Some(to_json(form)?)).anonymous(),
            )
            .await?;
        decode("/register", body)
    }

    /// `GET /friends`.
    pub async fn friends(&self) -> Result<Vec<FriendSummary>, ApiError> {
        let response: FriendsResponse = self.call("/friends", RequestOptions::get()).await?;
        Ok(response.friends)
    }

    /// `GET /friends/requests`.
    pub async fn friend_requests(&self) -> Result<Vec<FriendRequest>, ApiError> {
        let response: FriendRequestsResponse =
            self.call("/friends/requests", RequestOptions::get()).await?;
        Ok(response.requests)
    }

    /// `POST /friends/accept/{id}`.
    pub async fn accept_friend_request(&self, request_id: &str) -> Result<(), ApiError> {
        let path = format!("/friends/accept/{}", request_id);
        self.acknowledge(&path, RequestOptions::post(None)).await
    }

    /// `PUT /user/profile`.
    pub async fn update_profile(&self, update: &ProfileUpdateRequest) -> Result<(), ApiError> {
        self.acknowledge("/user/profile", RequestOptions::put(to_json(update)?))
            .await
    }

    /// `GET /admin/dashboard`.
    pub async fn admin_dashboard(&self) -> Result<AdminStats, ApiError> {
        let response: AdminDashboardResponse =
            self.call("/admin/dashboard", RequestOptions::get()).await?;
        Ok(response.stats)
    }

    /// `GET /admin/users`.
    pub async fn admin_users(&self) -> Result<Vec<AdminUser>, ApiError> {
        let response: AdminUsersResponse = self.call("/admin/users", RequestOptions::get()).await?;
        Ok(response.users)
    }
}

/// Defaults first, then caller headers; a caller header replaces a default
/// with the same name (case-insensitive).
fn merge_headers(
    defaults: Vec<(String, String)>,
    overrides: Vec<(String, String)>,
) -> Vec<(String, String)> {
    let mut merged: Vec<(String, String)> = defaults
        .into_iter()
        .filter(|(name, _)| !overrides.iter().any(|(o, _)| o.eq_ignore_ascii_case(name)))
        .collect();
    merged.extend(overrides);
    merged
}

fn check_rejection(path: &str, status: u16, body: &Value) -> Result<(), ApiError> {
    let envelope: Option<Envelope> = match body {
        Value::Object(_) => serde_json::from_value(body.clone()).ok(),
        _ => None,
    };
    let detail = envelope.as_ref().and_then(|e| e.detail.clone());

    if envelope.as_ref().is_some_and(|e| !e.success) {
        return Err(ApiError::Rejected(
            detail.unwrap_or_else(|| format!("{} was rejected", path)),
        ));
    }
    if !(200..300).contains(&status) {
        return Err(ApiError::Rejected(
            detail.unwrap_or_else(|| format!("{} returned HTTP {}", path, status)),
        ));
    }
    Ok(())
}

fn decode<T: DeserializeOwned>(path: &str, body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|e| ApiError::MalformedResponse(format!("{}: {}", path, e)))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_header_overrides_default() {
        let merged = merge_headers(
            vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Authorization".to_string(), "Bearer a".to_string()),
            ],
            vec![("authorization".to_string(), "Bearer b".to_string())],
        );

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].0, "Content-Type");
        assert_eq!(merged[1], ("authorization".to_string(), "Bearer b".to_string()));
    }

    #[test]
    fn test_check_rejection_uses_detail() {
        let body = serde_json::json!({"success": false, "detail": "權限不足"});
        assert_eq!(
            check_rejection("/admin/users", 200, &body),
            Err(ApiError::Rejected("權限不足".to_string()))
        );
    }

    #[test]
    fn test_check_rejection_on_http_error_without_body() {
        assert!(matches!(
            check_rejection("/friends", 500, &Value::Null),
            Err(ApiError::Rejected(_))
        ));
        assert!(check_rejection("/friends", 200, &Value::Null).is_ok());
    }
}
