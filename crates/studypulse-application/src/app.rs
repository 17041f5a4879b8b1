//! Application root: wires the session, API client, auth controller, router
//! and notification center, and turns user actions into notifications.

use std::sync::Arc;
use std::time::Duration;
use studypulse_core::config::ClientConfig;
use studypulse_core::{
    ApiError, AuthError, KeyValueStore, Locale, PageId, SessionCell, Severity, StudyPulseError,
};
use studypulse_infrastructure::{PreferenceStore, SessionStore};
use studypulse_interaction::dto::ProfileUpdateRequest;
use studypulse_interaction::{ApiClient, ApiTransport};

use crate::auth::{AuthController, RegistrationForm};
use crate::messages;
use crate::notifications::NotificationCenter;
use crate::render::PageRenderer;
use crate::router::{AppState, ViewRouter, ViewState};

/// Editable profile fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileEdit {
    pub display_name: String,
    pub bio: String,
    pub interests: Vec<String>,
}

pub struct App {
    session: SessionCell,
    api: ApiClient,
    auth: AuthController,
    router: ViewRouter,
    notifications: Arc<NotificationCenter>,
    session_store: SessionStore,
    preferences: PreferenceStore,
}

impl App {
    pub fn new(
        config: &ClientConfig,
        store: Arc<dyn KeyValueStore>,
        transport: Arc<dyn ApiTransport>,
    ) -> Result<Self, StudyPulseError> {
        let session = SessionCell::new();
        let api = ApiClient::new(transport, session.clone());
        let session_store = SessionStore::new(store.clone());
        let notifications = Arc::new(NotificationCenter::new(Duration::from_secs(
            config.notifications.display_secs,
        )));

        if config.dev.test_account_bypass {
            tracing::warn!("[App] Test account bypass is enabled");
        }
        let auth = AuthController::new(
            api.clone(),
            session.clone(),
            session_store.clone(),
            notifications.clone(),
        )
        .with_test_account_bypass(config.dev.test_account_bypass);

        let router = ViewRouter::new(session.clone(), api.clone(), PageRenderer::new()?);

        Ok(Self {
            session,
            api,
            auth,
            router,
            notifications,
            session_store,
            preferences: PreferenceStore::new(store),
        })
    }

    /// Loads preferences and restores a saved session. Returns the view shown.
    pub async fn initialize(&self) -> ViewState {
        self.router.set_locale(self.preferences.language());

        match self.session_store.restore() {
            Some(session) => {
                tracing::info!("[App] Restored session for {}", session.user().username);
                self.session.replace(session);
                self.enter_shell().await;
                ViewState::Shell
            }
            None => {
                self.router.show_landing();
                ViewState::Landing
            }
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<(), AuthError> {
        match self.auth.login(username, password).await {
            Ok(_) => {
                self.notifications
                    .notify(messages::LOGIN_SUCCESS, Severity::Success);
                self.enter_shell().await;
                Ok(())
            }
            Err(e) => {
                self.notifications
                    .notify(messages::auth_error(&e), Severity::Error);
                Err(e)
            }
        }
    }

    /// Registers an account. The user stays logged out.
    pub async fn register(&self, form: &RegistrationForm) -> Result<(), AuthError> {
        match self.auth.register(form).await {
            Ok(()) => {
                self.notifications
                    .notify(messages::REGISTER_SUCCESS, Severity::Success);
                Ok(())
            }
            Err(e) => {
                self.notifications
                    .notify(messages::auth_error(&e), Severity::Error);
                Err(e)
            }
        }
    }

    pub fn logout(&self) {
        self.auth.logout();
        self.router.show_landing();
        self.notifications
            .notify(messages::LOGOUT_SUCCESS, Severity::Success);
    }

    /// Programmatic navigation; the sidebar selection is left alone.
    pub async fn navigate(&self, page_id: &str) {
        self.router.navigate(PageId::parse(page_id)).await;
    }

    pub async fn select_menu(&self, page_id: &str) {
        self.router.select_menu(PageId::parse(page_id)).await;
    }

    pub async fn accept_friend_request(&self, request_id: &str) -> Result<(), ApiError> {
        self.require_session()?;
        match self.api.accept_friend_request(request_id).await {
            Ok(()) => {
                self.notifications
                    .notify(messages::FRIEND_REQUEST_ACCEPTED, Severity::Success);
                if self.router.current_page() == PageId::Friends {
                    self.router.reload().await;
                }
                Ok(())
            }
            Err(e) => Err(self.report_api_error(e)),
        }
    }

    pub async fn update_profile(&self, edit: ProfileEdit) -> Result<(), ApiError> {
        self.require_session()?;
        let request = ProfileUpdateRequest {
            display_name: edit.display_name,
            bio: edit.bio,
            interests: edit.interests,
        };
        if let Err(e) = self.api.update_profile(&request).await {
            return Err(self.report_api_error(e));
        }

        let updated = self.session.update_user(|user| {
            user.display_name = Some(request.display_name.clone()).filter(|n| !n.is_empty());
            user.bio = Some(request.bio.clone()).filter(|b| !b.is_empty());
            user.interests = request.interests.clone();
        });
        if let Some(session) = updated {
            if let Err(e) = self.session_store.persist(&session) {
                tracing::warn!("[App] Updated profile not persisted: {}", e);
                self.notifications
                    .notify(messages::STORAGE_WRITE_FAILED, Severity::Warning);
            }
        }

        self.router.refresh_badge();
        self.notifications
            .notify(messages::PROFILE_UPDATED, Severity::Success);
        if self.router.current_page() == PageId::Profile {
            self.router.reload().await;
        }
        Ok(())
    }

    /// Stores the language preference. Unknown codes fall back to the default.
    pub fn set_language(&self, code: &str) -> Locale {
        let locale = Locale::from_code(code);
        if let Err(e) = self.preferences.set_language(locale) {
            tracing::warn!("[App] Language preference not saved: {}", e);
        }
        self.router.set_locale(locale);
        self.notifications.notify(
            messages::language_changed(locale.display_name()),
            Severity::Success,
        );
        locale
    }

    pub fn state(&self) -> AppState {
        self.router.snapshot()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_active()
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    async fn enter_shell(&self) {
        if self.router.show_shell() {
            self.router.reload().await;
        }
    }

    fn require_session(&self) -> Result<(), ApiError> {
        if self.session.is_active() {
            Ok(())
        } else {
            self.notifications
                .notify(messages::NOT_SIGNED_IN, Severity::Warning);
            Err(ApiError::Unauthorized)
        }
    }

    fn report_api_error(&self, err: ApiError) -> ApiError {
        self.notifications
            .notify(messages::api_error(&err), Severity::Error);
        err
    }
}
