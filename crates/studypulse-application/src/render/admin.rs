use minijinja::context;

use super::RenderContext;
use super::templates::{self, Templates};

/// Admin panel. Non-admins get the access-denied block and no request is sent.
pub(super) async fn render(t: &Templates, ctx: &RenderContext<'_>) -> String {
    if !ctx.session.is_admin() {
        tracing::info!(
            "[Render] Admin page refused for {}",
            ctx.session.user().username
        );
        return t.render(templates::ACCESS_DENIED, ());
    }

    let stats = ctx
        .api
        .admin_dashboard()
        .await
        .map_err(|e| tracing::warn!("[Render] Admin stats failed: {}", e))
        .ok();
    let users = ctx
        .api
        .admin_users()
        .await
        .map_err(|e| tracing::warn!("[Render] Admin users failed: {}", e))
        .ok();

    t.render(
        templates::ADMIN,
        context! {
            stats => stats,
            users => users,
        },
    )
}
