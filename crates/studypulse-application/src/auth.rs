//! Auth controller: login, registration and logout flows.

use std::sync::Arc;
use studypulse_core::error::MIN_PASSWORD_LEN;
use studypulse_core::{ApiError, AuthError, Session, SessionCell, Severity, UserProfile};
use studypulse_infrastructure::SessionStore;
use studypulse_interaction::ApiClient;
use studypulse_interaction::dto::{LoginOutcome, LoginRequest, RegisterRequest};

use crate::messages;
use crate::notifications::NotificationCenter;

/// Offline account that skips the network when the dev bypass is enabled.
pub const TEST_ACCOUNT: &str = "Nick20130104";
const TEST_ACCOUNT_TOKEN: &str = "test-account-token";

/// Fields collected by the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Local checks run before any network call. Mismatch is reported first.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.password != self.confirm_password {
            return Err(AuthError::Mismatch);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::TooShort);
        }
        Ok(())
    }

    fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            username: self.username.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            password: self.password.clone(),
        }
    }
}

pub struct AuthController {
    api: ApiClient,
    session: SessionCell,
    store: SessionStore,
    notifications: Arc<NotificationCenter>,
    test_account_bypass: bool,
}

impl AuthController {
    pub fn new(
        api: ApiClient,
        session: SessionCell,
        store: SessionStore,
        notifications: Arc<NotificationCenter>,
    ) -> Self {
        Self {
            api,
            session,
            store,
            notifications,
            test_account_bypass: false,
        }
    }

    pub fn with_test_account_bypass(mut self, enabled: bool) -> Self {
        self.test_account_bypass = enabled;
        self
    }

    /// Authenticates and installs the session in memory and in storage.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        if self.test_account_bypass && username == TEST_ACCOUNT && password == TEST_ACCOUNT {
            tracing::warn!("[Auth] Test account bypass used, no server call made");
            let session = Session::new(TEST_ACCOUNT_TOKEN, test_account_profile());
            self.install(&session);
            return Ok(session);
        }

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response = self.api.login(&request).await.map_err(unreachable)?;
        match response.into_outcome() {
            Ok(LoginOutcome::Accepted { token, user }) => {
                let session = Session::new(token, user);
                self.install(&session);
                tracing::info!("[Auth] Logged in as {}", session.user().username);
                Ok(session)
            }
            Ok(LoginOutcome::Rejected { detail }) => {
                tracing::info!("[Auth] Login rejected for {}", username);
                Err(AuthError::Rejected(
                    detail.unwrap_or_else(|| messages::LOGIN_FAILED.to_string()),
                ))
            }
            Err(reason) => {
                tracing::warn!("[Auth] Unusable login response: {}", reason);
                Err(AuthError::Unreachable)
            }
        }
    }

    /// Creates an account. Does not sign in.
    pub async fn register(&self, form: &RegistrationForm) -> Result<(), AuthError> {
        form.validate()?;

        let envelope = self
            .api
            .register(&form.to_request())
            .await
            .map_err(unreachable)?;

        if envelope.success {
            tracing::info!("[Auth] Registered {}", form.username);
            Ok(())
        } else {
            Err(AuthError::Rejected(
                envelope
                    .detail
                    .unwrap_or_else(|| messages::REGISTER_FAILED.to_string()),
            ))
        }
    }

    /// Drops the session. Never fails; storage errors are only logged.
    pub fn logout(&self) {
        self.session.clear();
        if let Err(e) = self.store.clear() {
            tracing::warn!("[Auth] Failed to clear stored session: {}", e);
        }
        tracing::info!("[Auth] Logged out");
    }

    fn install(&self, session: &Session) {
        self.session.replace(session.clone());
        if let Err(e) = self.store.persist(session) {
            tracing::warn!("[Auth] Session kept in memory only: {}", e);
            self.notifications
                .notify(messages::STORAGE_WRITE_FAILED, Severity::Warning);
        }
    }
}

fn unreachable(err: ApiError) -> AuthError {
    tracing::warn!("[Auth] Server call failed: {}", err);
    AuthError::Unreachable
}

fn test_account_profile() -> UserProfile {
    let mut user = UserProfile::new("test-account", TEST_ACCOUNT);
    user.display_name = Some("Nick".to_string());
    user.is_admin = true;
    user
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use studypulse_core::KeyValueStore;
    use studypulse_core::storage::keys;
    use studypulse_infrastructure::MemoryKeyValueStore;
    use studypulse_interaction::HttpMethod;
    use studypulse_interaction::testing::ScriptedTransport;

    struct Fixture {
        transport: Arc<ScriptedTransport>,
        store: Arc<MemoryKeyValueStore>,
        session: SessionCell,
        auth: AuthController,
    }

    fn fixture() -> Fixture {
        let transport = Arc::new(ScriptedTransport::new());
        let store = Arc::new(MemoryKeyValueStore::new());
        let session = SessionCell::new();
        let api = ApiClient::new(transport.clone(), session.clone());
        let auth = AuthController::new(
            api,
            session.clone(),
            SessionStore::new(store.clone()),
            Arc::new(NotificationCenter::default()),
        );
        Fixture {
            transport,
            store,
            session,
            auth,
        }
    }

    #[test]
    fn test_validate_reports_mismatch_before_length() {
        let form = RegistrationForm {
            password: "abc".to_string(),
            confirm_password: "xyz".to_string(),
            ..Default::default()
        };
        assert_eq!(form.validate(), Err(AuthError::Mismatch));

        let form = RegistrationForm {
            password: "abc12".to_string(),
            confirm_password: "abc12".to_string(),
            ..Default::default()
        };
        assert_eq!(form.validate(), Err(AuthError::TooShort));

        let form = RegistrationForm {
            password: "密碼密碼密碼".to_string(),
            confirm_password: "密碼密碼密碼".to_string(),
            ..Default::default()
        };
        assert_eq!(form.validate(), Ok(()));
    }

    #[tokio::test]
    async fn test_login_success_installs_and_persists_session() {
        let f = fixture();
        f.transport.respond(
            HttpMethod::Post,
            "/login",
            200,
            json!({
                "success": true,
                "token": "jwt-1",
                "user": {"id": 1, "username": "amy", "display_name": "Amy"}
            }),
        );

        let session = f.auth.login("amy", "secret1").await.unwrap();
        assert_eq!(session.token(), "jwt-1");
        assert_eq!(f.session.token().as_deref(), Some("jwt-1"));
        assert_eq!(f.store.get(keys::AUTH_TOKEN).unwrap().as_deref(), Some("jwt-1"));
        assert!(f.store.get(keys::CURRENT_USER).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_login_rejection_leaves_no_session() {
        let f = fixture();
        f.transport.respond(
            HttpMethod::Post,
            "/login",
            401,
            json!({"success": false, "detail": "帳號或密碼錯誤"}),
        );

        let err = f.auth.login("amy", "wrong").await.unwrap_err();
        assert_eq!(err, AuthError::Rejected("帳號或密碼錯誤".to_string()));
        assert!(!f.session.is_active());
        assert!(f.store.is_empty());
    }

    #[tokio::test]
    async fn test_login_accepts_numeric_admin_flag() {
        let f = fixture();
        f.transport.respond(
            HttpMethod::Post,
            "/login",
            200,
            json!({
                "success": true,
                "token": "jwt-2",
                "user": {"id": 2, "username": "ben", "is_admin": 0, "interests": null}
            }),
        );

        let session = f.auth.login("ben", "secret1").await.unwrap();
        assert!(!session.is_admin());
        assert!(session.user().interests.is_empty());
        assert!(f.session.is_active());
        assert_eq!(f.store.get(keys::AUTH_TOKEN).unwrap().as_deref(), Some("jwt-2"));
    }

    #[tokio::test]
    async fn test_rejected_login_while_signed_in_reports_detail() {
        let f = fixture();
        f.session.replace(Session::new("old-jwt", UserProfile::new("1", "amy")));
        f.transport.respond(
            HttpMethod::Post,
            "/login",
            401,
            json!({"success": false, "detail": "帳號或密碼錯誤"}),
        );

        let err = f.auth.login("amy", "wrong").await.unwrap_err();
        assert_eq!(err, AuthError::Rejected("帳號或密碼錯誤".to_string()));
        assert_eq!(f.transport.requests()[0].header("Authorization"), None);
        assert_eq!(f.session.token().as_deref(), Some("old-jwt"));
    }

    #[tokio::test]
    async fn test_login_rejection_without_detail_uses_default() {
        let f = fixture();
        f.transport
            .respond(HttpMethod::Post, "/login", 200, json!({"success": false}));

        let err = f.auth.login("amy", "wrong").await.unwrap_err();
        assert_eq!(err, AuthError::Rejected(messages::LOGIN_FAILED.to_string()));
    }

    #[tokio::test]
    async fn test_login_network_failure_is_unreachable() {
        let f = fixture();
        f.transport.fail(HttpMethod::Post, "/login");

        let err = f.auth.login("amy", "secret1").await.unwrap_err();
        assert_eq!(err, AuthError::Unreachable);
        assert!(!f.session.is_active());
    }

    #[tokio::test]
    async fn test_test_account_requires_bypass_flag() {
        let f = fixture();
        f.transport.fail(HttpMethod::Post, "/login");
        assert_eq!(
            f.auth.login(TEST_ACCOUNT, TEST_ACCOUNT).await.unwrap_err(),
            AuthError::Unreachable
        );

        let f = fixture();
        let auth = f.auth.with_test_account_bypass(true);
        let session = auth.login(TEST_ACCOUNT, TEST_ACCOUNT).await.unwrap();
        assert!(session.is_admin());
        assert!(f.transport.calls().is_empty());
        assert!(f.session.is_active());
    }

    #[tokio::test]
    async fn test_register_validation_skips_network() {
        let f = fixture();
        let form = RegistrationForm {
            username: "bob".to_string(),
            email: "bob@example.com".to_string(),
            display_name: "Bob".to_string(),
            password: "abcdef".to_string(),
            confirm_password: "xyz123".to_string(),
        };

        assert_eq!(f.auth.register(&form).await, Err(AuthError::Mismatch));
        assert!(f.transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_register_does_not_sign_in() {
        let f = fixture();
        f.transport
            .respond(HttpMethod::Post, "/register", 200, json!({"success": true}));
        let form = RegistrationForm {
            username: "bob".to_string(),
            email: "bob@example.com".to_string(),
            display_name: "Bob".to_string(),
            password: "abcdef".to_string(),
            confirm_password: "abcdef".to_string(),
        };

        f.auth.register(&form).await.unwrap();
        assert!(!f.session.is_active());

        let f = fixture();
        f.transport.respond(
            HttpMethod::Post,
            "/register",
            400,
            json!({"success": false, "detail": "使用者名稱已存在"}),
        );
        assert_eq!(
            f.auth.register(&form).await,
            Err(AuthError::Rejected("使用者名稱已存在".to_string()))
        );
    }

    #[test]
    fn test_logout_is_idempotent() {
        let f = fixture();
        f.session
            .replace(Session::new("t", UserProfile::new("1", "amy")));
        f.auth.logout();
        f.auth.logout();
        assert!(!f.session.is_active());
    }
}
