//! Static panels for pages without data yet.

use minijinja::context;

use super::templates::{self, Templates};

fn panel(t: &Templates, page: &str, icon: &str, heading: &str, description: &str) -> String {
    t.render(
        templates::PANEL,
        context! {
            page => page,
            icon => icon,
            heading => heading,
            description => description,
        },
    )
}

pub(super) fn chat(t: &Templates) -> String {
    panel(t, "chat", "fa-comments", "聊天功能開發中", "即時聊天系統即將推出")
}

pub(super) fn study(t: &Templates) -> String {
    panel(t, "study", "fa-book", "學科討論功能開發中", "各科目討論區即將推出")
}

pub(super) fn resources(t: &Templates) -> String {
    panel(
        t,
        "resources",
        "fa-folder-open",
        "資源共享功能開發中",
        "學習資源分享平台即將推出",
    )
}

pub(super) fn coming_soon(t: &Templates) -> String {
    t.render(templates::COMING_SOON, ())
}
