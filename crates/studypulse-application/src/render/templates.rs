//! Compiled page templates.

use minijinja::Environment;
use serde::Serialize;
use studypulse_core::StudyPulseError;

pub const DASHBOARD: &str = "dashboard.html";
pub const FRIENDS: &str = "friends.html";
pub const PANEL: &str = "panel.html";
pub const COMING_SOON: &str = "coming_soon.html";
pub const PROFILE: &str = "profile.html";
pub const ACCESS_DENIED: &str = "access_denied.html";
pub const ADMIN: &str = "admin.html";

const SOURCES: &[(&str, &str)] = &[
    (DASHBOARD, include_str!("../../templates/dashboard.html")),
    (FRIENDS, include_str!("../../templates/friends.html")),
    (PANEL, include_str!("../../templates/panel.html")),
    (COMING_SOON, include_str!("../../templates/coming_soon.html")),
    (PROFILE, include_str!("../../templates/profile.html")),
    (ACCESS_DENIED, include_str!("../../templates/access_denied.html")),
    (ADMIN, include_str!("../../templates/admin.html")),
];

const RENDER_FAILED: &str = r#"<div class="error-state"><p>頁面載入失敗</p></div>"#;

/// Template names end in `.html`, so minijinja escapes every interpolated value.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn load() -> Result<Self, StudyPulseError> {
        let mut env = Environment::new();
        for &(name, source) in SOURCES {
            env.add_template(name, source)
                .map_err(|e| StudyPulseError::render(format!("{}: {}", name, e)))?;
        }
        Ok(Self { env })
    }

    /// Renders `name`. A template error yields a static error block.
    pub fn render<S: Serialize>(&self, name: &str, context: S) -> String {
        match self.env.get_template(name).and_then(|t| t.render(context)) {
            Ok(html) => html,
            Err(e) => {
                tracing::error!("[Render] Template {} failed: {}", name, e);
                RENDER_FAILED.to_string()
            }
        }
    }
}
