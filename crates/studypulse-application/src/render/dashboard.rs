use minijinja::context;
use serde::Serialize;

use super::RenderContext;
use super::templates::{self, Templates};

#[derive(Serialize)]
struct QuickAction {
    page: &'static str,
    icon: &'static str,
    label: &'static str,
}

const QUICK_ACTIONS: [QuickAction; 3] = [
    QuickAction {
        page: "friends",
        icon: "fa-user-plus",
        label: "添加好友",
    },
    QuickAction {
        page: "chat",
        icon: "fa-comments",
        label: "開始聊天",
    },
    QuickAction {
        page: "study",
        icon: "fa-book",
        label: "學科討論",
    },
];

pub(super) async fn render(t: &Templates, ctx: &RenderContext<'_>) -> String {
    let friends_count = match ctx.api.friends().await {
        Ok(friends) => friends.len(),
        Err(e) => {
            tracing::debug!("[Render] Dashboard friends count unavailable: {}", e);
            0
        }
    };

    t.render(
        templates::DASHBOARD,
        context! {
            friends_count => friends_count,
            unread_messages => 0,
            study_hours => "0h",
            quick_actions => QUICK_ACTIONS,
        },
    )
}
