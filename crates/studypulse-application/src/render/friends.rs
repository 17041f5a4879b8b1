use minijinja::context;

use super::RenderContext;
use super::templates::{self, Templates};

/// Friends list and pending requests. `None` marks a failed fetch.
pub(super) async fn render(t: &Templates, ctx: &RenderContext<'_>) -> String {
    let friends = ctx
        .api
        .friends()
        .await
        .map_err(|e| tracing::warn!("[Render] Friends list failed: {}", e))
        .ok();
    let requests = ctx
        .api
        .friend_requests()
        .await
        .map_err(|e| tracing::warn!("[Render] Friend requests failed: {}", e))
        .ok();

    t.render(
        templates::FRIENDS,
        context! {
            friends => friends,
            requests => requests,
        },
    )
}
