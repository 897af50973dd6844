use serde::Deserialize;

use crate::models::nav::Route;

pub const AVATAR_SIZE_PX: u32 = 32;
pub const PLACEHOLDER_BACKGROUND: &str = "#d9d9d9";
pub const PLACEHOLDER_COLOR: &str = "#666666";

/// The signed-in user as reported by the chat service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Header avatar: the user's picture, or a generic icon when there is none.
/// Clicking it goes to the settings page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarView {
    pub src: Option<String>,
    pub alt: String,
    pub size: u32,
    pub href: String,
}

impl AvatarView {
    pub fn from_profile(profile: Option<&UserProfile>) -> Self {
        let src = profile
            .and_then(|p| p.avatar.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let alt = profile
            .and_then(|p| p.nickname.clone().or_else(|| p.email.clone()))
            .unwrap_or_default();
        Self {
            src,
            alt,
            size: AVATAR_SIZE_PX,
            href: Route::Settings.to_path(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.src.is_none()
    }

    pub fn image(&self) -> Option<&str> {
        self.src.as_deref()
    }

    pub fn background(&self) -> &'static str {
        PLACEHOLDER_BACKGROUND
    }

    pub fn color(&self) -> &'static str {
        PLACEHOLDER_COLOR
    }
}
