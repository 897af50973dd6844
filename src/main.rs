use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};

use responder_admin::config::AppConfig;
use responder_admin::handlers;
use responder_admin::i18n::{LocaleConfig, Translator};
use responder_admin::models::feedback::FeedbackBrowsers;
use responder_admin::scheduler;
use responder_admin::services::{ChatService, ChatServiceClient};
use responder_admin::session_middleware;

fn startup_error(e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env().map_err(startup_error)?;

    let locales = LocaleConfig::embedded()
        .map_err(startup_error)?
        .with_languages(config.language, config.fallback_language);
    let translator = web::Data::new(Translator::init(locales).map_err(startup_error)?);
    log::info!(
        "Locales ready: active {}, fallback {}",
        translator.active(),
        translator.fallback()
    );

    let client = ChatServiceClient::new(config.chat_service.clone()).map_err(startup_error)?;
    log::info!("Chat service at {}", config.chat_service.base_url);
    let chat: web::Data<dyn ChatService> = web::Data::from(Arc::new(client) as Arc<dyn ChatService>);

    let browsers = FeedbackBrowsers::new(config.browser_settings(), config.session_idle);
    scheduler::spawn_scheduler(browsers.clone());
    let browsers = web::Data::new(browsers);

    let secret_key = config.cookie_key();
    let bind_addr = config.bind_addr.clone();
    let config = web::Data::new(config);

    log::info!("Starting server at http://{bind_addr}");

    HttpServer::new(move || {
        App::new()
            .wrap(session_middleware(secret_key.clone()))
            .wrap(middleware::Logger::default())
            .app_data(translator.clone())
            .app_data(chat.clone())
            .app_data(browsers.clone())
            .app_data(config.clone())
            .service(actix_files::Files::new("/static", "./static"))
            .configure(handlers::configure)
            .default_service(web::to(handlers::not_found))
    })
    .bind(bind_addr)?
    .run()
    .await
}
