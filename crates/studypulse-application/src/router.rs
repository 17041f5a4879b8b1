//! View router: top-level view state, navigation and the content region.

use std::sync::{Mutex, MutexGuard};
use studypulse_core::{Locale, NavigationState, PageId, Session, SessionCell};
use studypulse_interaction::ApiClient;

use crate::render::{LOADING_HTML, PageRenderer, RenderContext};

/// Which top-level view is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    /// Logged out: the landing page with login and register entry points.
    #[default]
    Landing,
    /// Logged in: sidebar, header badge and a content region.
    Shell,
}

/// The user chip in the shell header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserBadge {
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub initial: String,
    pub show_admin_menu: bool,
}

impl UserBadge {
    pub fn from_session(session: &Session) -> Self {
        let user = session.user();
        Self {
            display_name: user.shown_name().to_string(),
            avatar_url: user.avatar_url.clone().filter(|url| !url.is_empty()),
            initial: user.initial(),
            show_admin_menu: user.is_admin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContentRegion {
    pub title: String,
    pub html: String,
}

/// Everything the front-end draws.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub view: ViewState,
    pub navigation: NavigationState,
    pub locale: Locale,
    pub content: ContentRegion,
    pub badge: Option<UserBadge>,
    generation: u64,
}

impl AppState {
    /// Number of navigations started so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Handle for a render in flight. Only the newest ticket may commit.
#[derive(Debug, Clone)]
pub struct NavigationTicket {
    generation: u64,
    page: PageId,
    session: Session,
}

impl NavigationTicket {
    pub fn page(&self) -> &PageId {
        &self.page
    }
}

pub struct ViewRouter {
    state: Mutex<AppState>,
    session: SessionCell,
    api: ApiClient,
    renderer: PageRenderer,
}

impl ViewRouter {
    pub fn new(session: SessionCell, api: ApiClient, renderer: PageRenderer) -> Self {
        Self {
            state: Mutex::new(AppState::default()),
            session,
            api,
            renderer,
        }
    }

    fn lock(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self) -> AppState {
        self.lock().clone()
    }

    pub fn current_page(&self) -> PageId {
        self.lock().navigation.current_page.clone()
    }

    pub fn set_locale(&self, locale: Locale) {
        self.lock().locale = locale;
    }

    /// Switches to the shell. Returns false when no session is active.
    pub fn show_shell(&self) -> bool {
        let Some(session) = self.session.current() else {
            tracing::warn!("[Router] Shell requested without a session");
            return false;
        };
        let mut state = self.lock();
        state.view = ViewState::Shell;
        state.badge = Some(UserBadge::from_session(&session));
        tracing::debug!("[Router] Showing shell for {}", session.user().username);
        true
    }

    /// Switches to the landing view and invalidates any render in flight.
    pub fn show_landing(&self) {
        let mut state = self.lock();
        state.view = ViewState::Landing;
        state.badge = None;
        state.content = ContentRegion::default();
        state.generation += 1;
        tracing::debug!("[Router] Showing landing view");
    }

    /// Recomputes the header badge from the current session.
    pub fn refresh_badge(&self) {
        let badge = self.session.current().map(|s| UserBadge::from_session(&s));
        let mut state = self.lock();
        if state.view == ViewState::Shell {
            state.badge = badge;
        }
    }

    /// Starts a navigation: records the page, sets its title and a loading
    /// placeholder, and bumps the generation.
    ///
    /// Returns `None` when nothing should render (landing view or no session);
    /// the page is still recorded so the shell opens on it after login.
    pub fn begin(&self, page: PageId) -> Option<NavigationTicket> {
        let session = self.session.current();
        let mut state = self.lock();
        state.generation += 1;
        state.navigation.current_page = page.clone();

        let session = match (state.view, session) {
            (ViewState::Shell, Some(session)) => session,
            _ => {
                tracing::debug!("[Router] Recorded {} without rendering", page);
                return None;
            }
        };

        state.content = ContentRegion {
            title: page.title().to_string(),
            html: LOADING_HTML.to_string(),
        };
        Some(NavigationTicket {
            generation: state.generation,
            page,
            session,
        })
    }

    /// Installs a finished render. Discarded if a newer navigation started.
    pub fn commit(&self, ticket: NavigationTicket, html: String) -> bool {
        let mut state = self.lock();
        if state.generation != ticket.generation {
            tracing::debug!(
                "[Router] Discarding stale render of {} (generation {} < {})",
                ticket.page,
                ticket.generation,
                state.generation
            );
            return false;
        }
        state.content.html = html;
        true
    }

    /// Renders `page` into the content region. Never fails.
    pub async fn navigate(&self, page: PageId) {
        if !page.is_known() {
            tracing::debug!("[Router] Unknown page {}, using fallback", page);
        }
        let Some(ticket) = self.begin(page) else {
            return;
        };
        let html = {
            let ctx = RenderContext {
                session: &ticket.session,
                api: &self.api,
            };
            self.renderer.render(&ticket.page, &ctx).await
        };
        self.commit(ticket, html);
    }

    /// Sidebar selection: highlights the entry, then navigates.
    pub async fn select_menu(&self, page: PageId) {
        self.lock().navigation.current_menu_selection = page.clone();
        self.navigate(page).await;
    }

    /// Re-renders the current page.
    pub async fn reload(&self) {
        let page = self.current_page();
        self.navigate(page).await;
    }
}
