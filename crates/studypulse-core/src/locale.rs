//! Interface language preference.

use strum::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter)]
pub enum Locale {
    #[default]
    #[strum(serialize = "zh-TW")]
    ZhTw,
    #[strum(serialize = "zh-CN")]
    ZhCn,
    #[strum(serialize = "en")]
    En,
    #[strum(serialize = "ja")]
    Ja,
}

impl Locale {
    /// Parses a locale identifier, falling back to the default for unknown values.
    pub fn from_code(code: &str) -> Self {
        code.trim().parse().unwrap_or_default()
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::ZhTw => "zh-TW",
            Self::ZhCn => "zh-CN",
            Self::En => "en",
            Self::Ja => "ja",
        }
    }

    /// Name of the language as shown in the language selector.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ZhTw => "繁體中文",
            Self::ZhCn => "简体中文",
            Self::En => "English",
            Self::Ja => "日本語",
        }
    }
}
