use actix_session::Session;

use crate::auth::csrf::generate_token;
use crate::errors::AppError;
use crate::i18n::{Language, Translator};

const BROWSER_ID: &str = "browser_id";
const LANGUAGE: &str = "lng";
const FLASH: &str = "flash";

/// Id that ties this cookie session to its feedback browser.
pub fn browser_id(session: &Session) -> Result<String, AppError> {
    if let Some(id) = session.get::<String>(BROWSER_ID)? {
        return Ok(id);
    }
    let id = generate_token();
    session.insert(BROWSER_ID, &id)?;
    Ok(id)
}

/// The session's chosen language, or the translator's active one.
pub fn language(session: &Session, translator: &Translator) -> Language {
    session
        .get::<String>(LANGUAGE)
        .unwrap_or(None)
        .and_then(|code| Language::from_code(&code))
        .filter(|lang| translator.is_supported(*lang))
        .unwrap_or_else(|| translator.active())
}

pub fn set_language(session: &Session, lang: Language) -> Result<(), AppError> {
    session.insert(LANGUAGE, lang.code())?;
    Ok(())
}

pub fn set_flash(session: &Session, message: &str) {
    if let Err(e) = session.insert(FLASH, message) {
        log::warn!("Could not store flash message: {e}");
    }
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>(FLASH).unwrap_or(None);
    if flash.is_some() {
        session.remove(FLASH);
    }
    flash
}
