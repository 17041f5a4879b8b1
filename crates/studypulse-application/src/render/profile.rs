use minijinja::context;

use super::RenderContext;
use super::templates::{self, Templates};

pub(super) fn render(t: &Templates, ctx: &RenderContext<'_>) -> String {
    let user = ctx.session.user();
    t.render(
        templates::PROFILE,
        context! {
            user => user,
            shown_name => user.shown_name(),
            initial => user.initial(),
            display_name => user.display_name.as_deref().unwrap_or_default(),
            bio => user.bio.as_deref().unwrap_or_default(),
            interests => user.interests.join(", "),
        },
    )
}
