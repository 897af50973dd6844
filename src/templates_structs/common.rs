use askama::Template;

use crate::i18n::Localizer;

/// Stand-alone login page; only the right-hand welcome panel is ours.
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub lz: Localizer,
    pub app_name: String,
}
