//! Shared test infrastructure for the HTTP-level tests.
//!
//! - `StubChatService` - scripted stand-in for the upstream chat service
//! - `TestState` - app data wired the way `main` wires it
//! - cookie and CSRF helpers for multi-request flows

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::web;
use async_trait::async_trait;
use regex::Regex;

use responder_admin::config::AppConfig;
use responder_admin::handlers;
use responder_admin::i18n::{LocaleConfig, Translator};
use responder_admin::models::feedback::{
    BrowserSettings, ConversationKind, FeedbackBrowsers, FeedbackItem, FeedbackPage,
    ListFeedbackParams, Rating,
};
use responder_admin::models::user::UserProfile;
use responder_admin::services::{ChatService, FetchError};

// ============================================================================
// FIXTURES
// ============================================================================

pub fn item(id: &str, rating: Rating, kind: ConversationKind) -> FeedbackItem {
    FeedbackItem {
        conversation_id: "c1".into(),
        conversation_name: "Support".into(),
        message_id: id.into(),
        user_question: format!("question {id}"),
        assistant_content: format!("answer {id}"),
        rating,
        feedback_text: String::new(),
        timestamp_seconds: 1_718_000_000,
        kind,
        dialog_id: Some("d1".into()),
        user_id: Some("u1".into()),
    }
}

pub fn page(total: u64, items: Vec<FeedbackItem>) -> FeedbackPage {
    FeedbackPage { total, page: 1, page_size: 20, items }
}

/// Three rows: thumbs-up chat, thumbs-down API, unrated chat.
pub fn mixed_page() -> FeedbackPage {
    page(
        57,
        vec![
            item("m1", Rating::Positive, ConversationKind::Regular),
            item("m2", Rating::Negative, ConversationKind::Api),
            item("m3", Rating::Unset, ConversationKind::Regular),
        ],
    )
}

// ============================================================================
// STUB CHAT SERVICE
// ============================================================================

/// Answers `list_feedback` from a queue; an empty queue yields an empty page.
#[derive(Default)]
pub struct StubChatService {
    responses: Mutex<VecDeque<Result<Option<FeedbackPage>, FetchError>>>,
    requests: Mutex<Vec<ListFeedbackParams>>,
    calls: AtomicUsize,
    profile: Option<UserProfile>,
}

impl StubChatService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn respond(&self, outcome: Result<Option<FeedbackPage>, FetchError>) -> &Self {
        self.responses.lock().unwrap().push_back(outcome);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ListFeedbackParams> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ChatService for StubChatService {
    async fn list_feedback(&self, params: &ListFeedbackParams) -> Result<Option<FeedbackPage>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(params.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Some(page(0, vec![]))))
    }

    async fn user_info(&self) -> Result<UserProfile, FetchError> {
        self.profile
            .clone()
            .ok_or_else(|| FetchError::Status(401))
    }
}

// ============================================================================
// APP SETUP
// ============================================================================

/// Everything `main` registers as app data, built against a stub service.
pub struct TestState {
    pub chat: Arc<StubChatService>,
    pub translator: web::Data<Translator>,
    pub browsers: web::Data<FeedbackBrowsers>,
    pub config: web::Data<AppConfig>,
}

impl TestState {
    pub fn new(chat: StubChatService) -> Self {
        let config = AppConfig::from_lookup(|_| None).expect("default config");
        let translator = Translator::init(LocaleConfig::embedded().expect("bundles parse"))
            .expect("translator init");
        let browsers = FeedbackBrowsers::new(BrowserSettings::default(), Duration::from_secs(60));
        Self {
            chat: Arc::new(chat),
            translator: web::Data::new(translator),
            browsers: web::Data::new(browsers),
            config: web::Data::new(config),
        }
    }

    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        let chat: Arc<dyn ChatService> = self.chat.clone();
        cfg.app_data(web::Data::from(chat))
            .app_data(self.translator.clone())
            .app_data(self.browsers.clone())
            .app_data(self.config.clone());
        handlers::configure(cfg);
    }
}

// ============================================================================
// REQUEST HELPERS
// ============================================================================

/// The session cookie set by a response, if it changed the session.
pub fn session_cookie(resp: &ServiceResponse) -> Option<Cookie<'static>> {
    resp.response().cookies().next().map(|c| c.into_owned())
}

pub async fn body_text(resp: ServiceResponse) -> String {
    let bytes = actix_web::test::read_body(resp).await;
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

pub fn csrf_token(html: &str) -> String {
    let re = Regex::new(r#"name="csrf_token" value="([0-9a-f]{64})""#).unwrap();
    re.captures(html).expect("csrf field in page")[1].to_string()
}

/// The `<tr>` for one feedback row.
pub fn row_html<'a>(html: &'a str, message_id: &str) -> &'a str {
    let re = Regex::new(&format!(r#"(?s)<tr class="feedback-row" data-row-key="{message_id}">.*?</tr>"#)).unwrap();
    re.find(html).map(|m| m.as_str()).unwrap_or("")
}

pub fn badge(html: &str, id: &str) -> Option<String> {
    let re = Regex::new(&format!(r#"id="{id}">(\d+)<"#)).unwrap();
    re.captures(html).map(|c| c[1].to_string())
}
