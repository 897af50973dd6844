use std::str::FromStr;
use std::time::Duration;

use actix_web::cookie::Key;
use url::Url;

use crate::errors::AppError;
use crate::i18n::Language;
use crate::models::feedback::BrowserSettings;
use crate::models::feedback::cache::DEFAULT_CACHE_PAGES;
use crate::models::feedback::query::{DEFAULT_PAGE_SIZE, validate_page_size};
use crate::models::feedback::registry::DEFAULT_IDLE_SECS;
use crate::services::ChatServiceConfig;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_CHAT_SERVICE_URL: &str = "http://127.0.0.1:9380/";
const DEFAULT_APP_NAME: &str = "Quick Responder";

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub app_name: String,
    pub chat_service: ChatServiceConfig,
    pub session_key: Option<String>,
    pub language: Language,
    pub fallback_language: Language,
    pub page_size: u32,
    pub cache_pages: usize,
    pub session_idle: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; `from_env` passes the process environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |name: &str| get(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let chat_url = var("CHAT_SERVICE_URL").unwrap_or_else(|| DEFAULT_CHAT_SERVICE_URL.to_string());
        let base_url = Url::parse(&chat_url)
            .map_err(|e| AppError::Config(format!("CHAT_SERVICE_URL '{chat_url}': {e}")))?;

        let language = parse_language(var("APP_LANGUAGE"), "APP_LANGUAGE")?;
        let fallback_language = parse_language(var("APP_FALLBACK_LANGUAGE"), "APP_FALLBACK_LANGUAGE")?;

        let page_size = parse_num(var("FEEDBACK_PAGE_SIZE"), "FEEDBACK_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        validate_page_size(page_size).map_err(|e| AppError::Config(format!("FEEDBACK_PAGE_SIZE: {e}")))?;

        let cache_pages = parse_num(var("FEEDBACK_CACHE_PAGES"), "FEEDBACK_CACHE_PAGES", DEFAULT_CACHE_PAGES)?;
        if cache_pages == 0 {
            return Err(AppError::Config("FEEDBACK_CACHE_PAGES must be at least 1".to_string()));
        }
        let idle_secs = parse_num(var("FEEDBACK_SESSION_IDLE_SECS"), "FEEDBACK_SESSION_IDLE_SECS", DEFAULT_IDLE_SECS)?;

        Ok(Self {
            bind_addr: var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            app_name: var("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            chat_service: ChatServiceConfig { base_url, token: var("CHAT_SERVICE_TOKEN") },
            session_key: get("SESSION_KEY"),
            language,
            fallback_language,
            page_size,
            cache_pages,
            session_idle: Duration::from_secs(idle_secs),
        })
    }

    pub fn browser_settings(&self) -> BrowserSettings {
        BrowserSettings {
            page_size: self.page_size,
            cache_pages: self.cache_pages,
            ..BrowserSettings::default()
        }
    }

    /// Cookie signing key. A missing or short `SESSION_KEY` falls back to a
    /// random key, which loses sessions on restart.
    pub fn cookie_key(&self) -> Key {
        match self.session_key.as_deref() {
            Some(val) if val.len() >= 64 => {
                log::info!("Using SESSION_KEY from environment");
                Key::from(val.as_bytes())
            }
            Some(val) => {
                log::warn!("SESSION_KEY too short ({} bytes, need 64+), generating random key", val.len());
                Key::generate()
            }
            None => {
                log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
                Key::generate()
            }
        }
    }
}

fn parse_language(value: Option<String>, name: &str) -> Result<Language, AppError> {
    match value {
        None => Ok(Language::De),
        Some(code) => Language::from_code(&code)
            .ok_or_else(|| AppError::Config(format!("{name}: unknown language '{code}'"))),
    }
}

fn parse_num<T: FromStr>(value: Option<String>, name: &str, default: T) -> Result<T, AppError>
where
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|e| AppError::Config(format!("{name} '{raw}': {e}"))),
    }
}
