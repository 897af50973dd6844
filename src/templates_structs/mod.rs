// Template context structures for Askama templates, organized by page.

use std::sync::Arc;

use actix_session::Session;

use crate::auth::csrf;
use crate::auth::session::{language, take_flash};
use crate::i18n::{Localizer, Translator};
use crate::models::user::AvatarView;
use crate::services::ChatService;

/// Common context shared by every console page.
/// Templates access these as `ctx.app_name`, `ctx.t("...")`, etc.
pub struct PageContext {
    pub lz: Localizer,
    pub app_name: String,
    pub avatar: AvatarView,
    pub csrf_token: String,
    pub flash: Option<String>,
    pub current_path: String,
}

impl PageContext {
    /// The avatar comes from the chat service; if that call fails the page
    /// still renders, with the placeholder icon.
    pub async fn build(
        session: &Session,
        translator: Arc<Translator>,
        chat: &dyn ChatService,
        app_name: &str,
        current_path: &str,
    ) -> Self {
        let lang = language(session, &translator);
        let profile = match chat.user_info().await {
            Ok(profile) => Some(profile),
            Err(e) => {
                log::warn!("Could not load user info for avatar: {e}");
                None
            }
        };
        Self {
            lz: Localizer::new(translator, lang),
            app_name: app_name.to_string(),
            avatar: AvatarView::from_profile(profile.as_ref()),
            csrf_token: csrf::get_or_create_token(session),
            flash: take_flash(session),
            current_path: current_path.to_string(),
        }
    }

    pub fn t(&self, key: &str) -> String {
        self.lz.t(key)
    }

    pub fn flash_message(&self) -> Option<&str> {
        self.flash.as_deref()
    }

    pub fn lang_code(&self) -> &'static str {
        self.lz.lang().code()
    }
}

mod common;
mod feedback;
mod locale;

pub use common::*;
pub use feedback::*;
pub use locale::*;
