pub mod auth;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod i18n;
pub mod models;
pub mod scheduler;
pub mod services;
pub mod templates_structs;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

/// Cookie session layer used by the server and the integration tests.
pub fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_secure(false)
        .cookie_http_only(true)
        .build()
}
