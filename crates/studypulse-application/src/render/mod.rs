//! Page renderers: one HTML fragment per page for the shell's content region.
//!
//! Each renderer is a function of the session plus whatever it fetches. A
//! failed fetch renders an empty or error block; nothing from a previous
//! render is reused.

mod admin;
mod dashboard;
mod friends;
mod panels;
mod profile;
pub mod templates;

use studypulse_core::{PageId, Session, StudyPulseError};
use studypulse_interaction::ApiClient;

use templates::Templates;

/// Placeholder shown while a page's data is loading.
pub const LOADING_HTML: &str = r#"<div class="loading"><i class="fas fa-spinner"></i><p>載入中…</p></div>"#;

/// Inputs available to a renderer.
pub struct RenderContext<'a> {
    pub session: &'a Session,
    pub api: &'a ApiClient,
}

pub struct PageRenderer {
    templates: Templates,
}

impl PageRenderer {
    pub fn new() -> Result<Self, StudyPulseError> {
        Ok(Self {
            templates: Templates::load()?,
        })
    }

    pub async fn render(&self, page: &PageId, ctx: &RenderContext<'_>) -> String {
        let t = &self.templates;
        match page {
            PageId::Dashboard => dashboard::render(t, ctx).await,
            PageId::Friends => friends::render(t, ctx).await,
            PageId::Chat => panels::chat(t),
            PageId::Study => panels::study(t),
            PageId::Resources => panels::resources(t),
            PageId::Profile => profile::render(t, ctx),
            PageId::Admin => admin::render(t, ctx).await,
            PageId::StudyRoom | PageId::Settings | PageId::Unknown(_) => panels::coming_soon(t),
        }
    }
}
