//! Concurrency tests for the per-session feedback browsers.
//!
//! Fetches run outside the registry lock, so responses can come back in any
//! order. Only the response for the current query may reach the screen.

mod common;

use std::time::Duration;

use tokio::sync::oneshot;

use common::*;
use responder_admin::models::feedback::{
    BrowserSettings, ConversationKind, FeedbackBrowsers, FeedbackPage, FetchStatus, Rating,
    RatingFilter, Resolution,
};
use responder_admin::services::FetchError;

fn browsers() -> FeedbackBrowsers {
    FeedbackBrowsers::new(BrowserSettings::default(), Duration::from_secs(60))
}

/// Wait for the gate, then feed `outcome` back the way the handlers do.
fn spawn_fetch(
    browsers: &FeedbackBrowsers,
    session: &'static str,
    ticket: responder_admin::models::feedback::FetchTicket,
    gate: oneshot::Receiver<Result<Option<FeedbackPage>, FetchError>>,
) -> tokio::task::JoinHandle<Resolution> {
    let browsers = browsers.clone();
    tokio::spawn(async move {
        let outcome = gate.await.expect("gate sender dropped");
        browsers.with(session, |b| b.resolve(ticket, outcome))
    })
}

#[tokio::test]
async fn test_late_response_for_old_query_is_discarded() {
    let browsers = browsers();

    let a = browsers.with("s1", |b| b.load()).expect("first load fetches");
    let b = browsers
        .with("s1", |b| b.set_rating_filter(Some(RatingFilter::Positive)))
        .expect("new tuple fetches");

    let (send_a, gate_a) = oneshot::channel();
    let (send_b, gate_b) = oneshot::channel();
    let task_a = spawn_fetch(&browsers, "s1", a, gate_a);
    let task_b = spawn_fetch(&browsers, "s1", b, gate_b);

    // B answers first, then A
    send_b
        .send(Ok(Some(page(4, vec![item("b1", Rating::Positive, ConversationKind::Regular)]))))
        .unwrap();
    assert_eq!(task_b.await.unwrap(), Resolution::Applied);
    send_a
        .send(Ok(Some(page(90, vec![item("a1", Rating::Negative, ConversationKind::Api)]))))
        .unwrap();
    assert_eq!(task_a.await.unwrap(), Resolution::Stale);

    let snapshot = browsers.with("s1", |b| b.snapshot());
    let shown = snapshot.page.expect("page displayed");
    assert_eq!(shown.total, 4);
    assert_eq!(shown.items[0].message_id, "b1");
    assert_eq!(snapshot.status, FetchStatus::Success);
}

#[tokio::test]
async fn test_late_failure_for_old_query_leaves_no_banner() {
    let browsers = browsers();

    let a = browsers.with("s1", |b| b.load()).unwrap();
    let b = browsers.with("s1", |b| b.search("refund")).unwrap();

    let (send_a, gate_a) = oneshot::channel();
    let (send_b, gate_b) = oneshot::channel();
    let task_a = spawn_fetch(&browsers, "s1", a, gate_a);
    let task_b = spawn_fetch(&browsers, "s1", b, gate_b);

    send_b.send(Ok(Some(page(0, vec![])))).unwrap();
    task_b.await.unwrap();
    send_a.send(Err(FetchError::Status(502))).unwrap();
    assert_eq!(task_a.await.unwrap(), Resolution::Stale);

    assert_eq!(browsers.with("s1", |b| b.status().clone()), FetchStatus::Success);
}

#[tokio::test]
async fn test_input_is_accepted_while_fetch_is_outstanding() {
    let browsers = browsers();

    let a = browsers.with("s1", |b| b.load()).unwrap();
    let (send_a, gate_a) = oneshot::channel();
    let task_a = spawn_fetch(&browsers, "s1", a, gate_a);

    // The registry is not locked while A is pending
    let b = browsers.with("s1", |b| b.set_page(2)).unwrap();
    assert!(b.is_some());
    assert_eq!(browsers.with("s1", |b| b.query().page()), 2);

    send_a.send(Ok(Some(mixed_page()))).unwrap();
    assert_eq!(task_a.await.unwrap(), Resolution::Stale);
}

#[tokio::test]
async fn test_sessions_do_not_share_results() {
    let browsers = browsers();

    let t1 = browsers.with("s1", |b| b.load()).unwrap();
    let t2 = browsers.with("s2", |b| b.load()).unwrap();

    let (send_1, gate_1) = oneshot::channel();
    let (send_2, gate_2) = oneshot::channel();
    let task_1 = spawn_fetch(&browsers, "s1", t1, gate_1);
    let task_2 = spawn_fetch(&browsers, "s2", t2, gate_2);

    send_2.send(Err(FetchError::Transport("reset".into()))).unwrap();
    send_1.send(Ok(Some(mixed_page()))).unwrap();
    assert_eq!(task_1.await.unwrap(), Resolution::Applied);
    assert_eq!(task_2.await.unwrap(), Resolution::Applied);

    assert_eq!(browsers.with("s1", |b| b.status().clone()), FetchStatus::Success);
    assert_eq!(
        browsers.with("s2", |b| b.status().clone()),
        FetchStatus::Error("reset".into())
    );
    assert!(browsers.with("s2", |b| b.page().is_none()));
}
