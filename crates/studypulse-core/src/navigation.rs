//! Page identifiers and navigation state.

use std::fmt;

/// Identifier of a navigable content panel.
///
/// The known pages form a closed set. Anything else is kept verbatim in
/// `Unknown` so the router can record it and show the fallback view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum PageId {
    #[default]
    Dashboard,
    Friends,
    Chat,
    Study,
    Resources,
    StudyRoom,
    Profile,
    Settings,
    Admin,
    Unknown(String),
}

impl PageId {
    /// Known pages in sidebar order.
    pub const MENU: [PageId; 9] = [
        PageId::Dashboard,
        PageId::Friends,
        PageId::Chat,
        PageId::Study,
        PageId::Resources,
        PageId::StudyRoom,
        PageId::Profile,
        PageId::Settings,
        PageId::Admin,
    ];

    /// Parses a page identifier. Never fails.
    pub fn parse(id: &str) -> Self {
        match id.trim() {
            "dashboard" => Self::Dashboard,
            "friends" => Self::Friends,
            "chat" => Self::Chat,
            "study" => Self::Study,
            "resources" => Self::Resources,
            "study-room" => Self::StudyRoom,
            "profile" => Self::Profile,
            "settings" => Self::Settings,
            "admin" => Self::Admin,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Friends => "friends",
            Self::Chat => "chat",
            Self::Study => "study",
            Self::Resources => "resources",
            Self::StudyRoom => "study-room",
            Self::Profile => "profile",
            Self::Settings => "settings",
            Self::Admin => "admin",
            Self::Unknown(id) => id,
        }
    }

    /// Title shown in the header for this page.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "儀表板",
            Self::Friends => "好友管理",
            Self::Chat => "聊天系統",
            Self::Study => "學科討論",
            Self::Resources => "資源共享",
            Self::StudyRoom => "虛擬自習室",
            Self::Profile => "我的檔案",
            Self::Settings => "系統設定",
            Self::Admin => "管理員面板",
            Self::Unknown(_) => "頁面",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<&str> for PageId {
    fn from(id: &str) -> Self {
        Self::parse(id)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which page is shown and which sidebar entry is highlighted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavigationState {
    pub current_page: PageId,
    pub current_menu_selection: PageId,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }
}
