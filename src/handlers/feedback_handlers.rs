use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::csrf;
use crate::auth::session::{browser_id, set_flash};
use crate::config::AppConfig;
use crate::errors::{AppError, render, see_other};
use crate::i18n::Translator;
use crate::models::feedback::{FeedbackBrowsers, FetchTicket, QueryError, RatingFilter};
use crate::models::nav::Route;
use crate::services::ChatService;
use crate::templates_structs::{FeedbackListTemplate, PageContext};

#[derive(Deserialize)]
pub struct SearchForm {
    pub csrf_token: String,
    #[serde(default)]
    pub keywords: String,
}

#[derive(Deserialize)]
pub struct FilterForm {
    pub csrf_token: String,
    #[serde(default)]
    pub thumbup: String,
}

/// Page links, the size selector and the quick-jump box all post here.
#[derive(Deserialize)]
pub struct PageForm {
    pub csrf_token: String,
    #[serde(default)]
    pub page: String,
    #[serde(default)]
    pub page_size: Option<String>,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

pub async fn list(
    session: Session,
    browsers: web::Data<FeedbackBrowsers>,
    chat: web::Data<dyn ChatService>,
    translator: web::Data<Translator>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let id = browser_id(&session)?;

    let ticket = browsers.with(&id, |b| b.load());
    if let Some(ticket) = ticket {
        run_fetch(&browsers, &id, chat.get_ref(), ticket).await;
    }

    let snapshot = browsers.with(&id, |b| b.snapshot());
    let ctx = PageContext::build(
        &session,
        translator.into_inner(),
        chat.get_ref(),
        &config.app_name,
        "/feedback",
    )
    .await;
    render(FeedbackListTemplate::from_snapshot(ctx, snapshot))
}

pub async fn search(
    session: Session,
    browsers: web::Data<FeedbackBrowsers>,
    chat: web::Data<dyn ChatService>,
    form: web::Form<SearchForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = browser_id(&session)?;

    let ticket = browsers.with(&id, |b| b.search(&form.keywords));
    if let Some(ticket) = ticket {
        run_fetch(&browsers, &id, chat.get_ref(), ticket).await;
    }
    Ok(back_to_list())
}

pub async fn filter(
    session: Session,
    browsers: web::Data<FeedbackBrowsers>,
    chat: web::Data<dyn ChatService>,
    form: web::Form<FilterForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = browser_id(&session)?;

    let rating = match RatingFilter::parse(&form.thumbup) {
        Ok(rating) => rating,
        Err(e) => return Ok(rejected(&session, &e)),
    };
    let ticket = browsers.with(&id, |b| b.set_rating_filter(rating));
    if let Some(ticket) = ticket {
        run_fetch(&browsers, &id, chat.get_ref(), ticket).await;
    }
    Ok(back_to_list())
}

pub async fn paginate(
    session: Session,
    browsers: web::Data<FeedbackBrowsers>,
    chat: web::Data<dyn ChatService>,
    form: web::Form<PageForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = browser_id(&session)?;

    let page = match parse_number(&form.page) {
        Some(page) => page,
        None => {
            set_flash(&session, &format!("Invalid page number '{}'", form.page.trim()));
            return Ok(back_to_list());
        }
    };
    let size = match form.page_size.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        None => None,
        Some(raw) => match parse_number(raw) {
            Some(size) => Some(size),
            None => {
                set_flash(&session, &format!("Invalid page size '{raw}'"));
                return Ok(back_to_list());
            }
        },
    };

    match browsers.with(&id, |b| b.set_pagination(page, size)) {
        Ok(Some(ticket)) => run_fetch(&browsers, &id, chat.get_ref(), ticket).await,
        Ok(None) => {}
        Err(e) => return Ok(rejected(&session, &e)),
    }
    Ok(back_to_list())
}

pub async fn refresh(
    session: Session,
    browsers: web::Data<FeedbackBrowsers>,
    chat: web::Data<dyn ChatService>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = browser_id(&session)?;

    let ticket = browsers.with(&id, |b| b.refresh());
    run_fetch(&browsers, &id, chat.get_ref(), ticket).await;
    Ok(back_to_list())
}

/// Perform one fetch outside the registry lock and hand the outcome back.
/// Whether it is shown is up to the browser's ticket check.
async fn run_fetch(browsers: &FeedbackBrowsers, id: &str, chat: &dyn ChatService, ticket: FetchTicket) {
    let params = ticket.params();
    log::debug!("Fetching feedback page {} (size {})", params.page, params.page_size);
    let outcome = chat.list_feedback(&params).await;
    let resolution = browsers.with(id, |b| b.resolve(ticket, outcome));
    log::debug!("Feedback fetch resolved as {resolution:?}");
}

fn parse_number(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

fn rejected(session: &Session, e: &QueryError) -> HttpResponse {
    log::debug!("Rejected feedback query change: {e}");
    set_flash(session, &e.to_string());
    back_to_list()
}

fn back_to_list() -> HttpResponse {
    see_other(&Route::Feedback.to_path())
}
