use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::session::language;
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::i18n::{Localizer, Translator};
use crate::templates_structs::LoginTemplate;

/// Login screen. Only the welcome panel is rendered; credentials are the
/// chat front-end's business.
pub async fn login_page(
    session: Session,
    translator: web::Data<Translator>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let lang = language(&session, &translator);
    let tmpl = LoginTemplate {
        lz: Localizer::new(translator.into_inner(), lang),
        app_name: config.app_name.clone(),
    };
    render(tmpl)
}
