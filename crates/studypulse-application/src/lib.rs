pub mod app;
pub mod auth;
pub mod messages;
pub mod notifications;
pub mod render;
pub mod router;

pub use app::{App, ProfileEdit};
pub use auth::{AuthController, RegistrationForm};
pub use notifications::NotificationCenter;
pub use render::PageRenderer;
pub use router::{AppState, ContentRegion, UserBadge, ViewRouter, ViewState};
