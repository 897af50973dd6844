use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::csrf;
use crate::auth::session::set_language;
use crate::config::AppConfig;
use crate::errors::{AppError, render, see_other};
use crate::i18n::{Language, Translator};
use crate::models::nav::{Route, safe_redirect};
use crate::services::ChatService;
use crate::templates_structs::{PageContext, TranslationTableTemplate};

#[derive(Deserialize)]
pub struct LocaleForm {
    pub csrf_token: String,
    pub lng: String,
    #[serde(default)]
    pub redirect_to: Option<String>,
}

/// Switch the session language. Unsupported codes leave it unchanged.
pub async fn switch(
    session: Session,
    translator: web::Data<Translator>,
    form: web::Form<LocaleForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    match Language::from_code(&form.lng).filter(|lang| translator.is_supported(*lang)) {
        Some(lang) => {
            set_language(&session, lang)?;
            log::debug!("Session language set to {lang}");
        }
        None => log::warn!("Ignoring switch to unsupported language '{}'", form.lng),
    }

    Ok(see_other(&safe_redirect(form.redirect_to.as_deref(), Route::Feedback)))
}

pub async fn table(
    session: Session,
    translator: web::Data<Translator>,
    chat: web::Data<dyn ChatService>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let table = translator.translation_table()?;
    let coverage = table.coverage();
    let ctx = PageContext::build(
        &session,
        translator.into_inner(),
        chat.get_ref(),
        &config.app_name,
        "/locales/table",
    )
    .await;
    render(TranslationTableTemplate { ctx, table, coverage })
}

pub async fn table_csv(translator: web::Data<Translator>) -> Result<HttpResponse, AppError> {
    let table = translator.translation_table()?;
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(("Content-Disposition", "attachment; filename=\"translations.csv\""))
        .body(table.to_csv()))
}
