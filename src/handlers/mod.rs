pub mod feedback_handlers;
pub mod locale_handlers;
pub mod login_handlers;

use actix_web::{HttpResponse, web};

use crate::errors::see_other;
use crate::models::nav::Route;

/// Register every console route. Shared by `main` and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(|| async { see_other(&Route::Feedback.to_path()) }))
        .route("/login", web::get().to(login_handlers::login_page))
        .route("/feedback", web::get().to(feedback_handlers::list))
        .route("/feedback/search", web::post().to(feedback_handlers::search))
        .route("/feedback/filter", web::post().to(feedback_handlers::filter))
        .route("/feedback/page", web::post().to(feedback_handlers::paginate))
        .route("/feedback/refresh", web::post().to(feedback_handlers::refresh))
        .route("/locale", web::post().to(locale_handlers::switch))
        .route("/locales/table.csv", web::get().to(locale_handlers::table_csv))
        .route("/locales/table", web::get().to(locale_handlers::table));
}

/// Default 404 handler (must be registered last).
pub async fn not_found() -> HttpResponse {
    let html = include_str!("../../templates/errors/404.html");
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
