//! User-facing notification texts.

use studypulse_core::{ApiError, AuthError};

pub const LOGIN_SUCCESS: &str = "登入成功！";
pub const LOGIN_FAILED: &str = "登入失敗";
pub const REGISTER_SUCCESS: &str = "註冊成功！請登入";
pub const REGISTER_FAILED: &str = "註冊失敗";
pub const NETWORK_ERROR: &str = "網路錯誤，請稍後再試";
pub const PASSWORD_MISMATCH: &str = "密碼確認不一致";
pub const PASSWORD_TOO_SHORT: &str = "密碼長度至少6位";
pub const LOGOUT_SUCCESS: &str = "已成功登出";
pub const SESSION_EXPIRED: &str = "登入已過期，請重新登入";
pub const NOT_SIGNED_IN: &str = "請先登入";
pub const FRIEND_REQUEST_ACCEPTED: &str = "已接受好友請求";
pub const PROFILE_UPDATED: &str = "個人資料已更新";
pub const STORAGE_WRITE_FAILED: &str = "無法儲存登入狀態，下次啟動需重新登入";
pub const RESPONSE_ERROR: &str = "伺服器回應格式錯誤";

pub fn language_changed(language: &str) -> String {
    format!("語言已切換為 {}", language)
}

pub fn auth_error(err: &AuthError) -> String {
    match err {
        AuthError::Rejected(detail) => detail.clone(),
        AuthError::Unreachable => NETWORK_ERROR.to_string(),
        AuthError::Mismatch => PASSWORD_MISMATCH.to_string(),
        AuthError::TooShort => PASSWORD_TOO_SHORT.to_string(),
    }
}

pub fn api_error(err: &ApiError) -> String {
    match err {
        ApiError::Transport(_) => NETWORK_ERROR.to_string(),
        ApiError::MalformedResponse(_) => RESPONSE_ERROR.to_string(),
        ApiError::Unauthorized => SESSION_EXPIRED.to_string(),
        ApiError::Rejected(detail) => detail.clone(),
    }
}
