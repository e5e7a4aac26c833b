//! Loader tests
//!
//! Fetch tasks run against a mocked CMS. The tests use a current-thread
//! runtime, so spawned tasks do not start until the test awaits, which makes
//! "superseded before it ran" deterministic.

use std::time::Duration;

use mockito::{Matcher, Mock, Server, ServerGuard};
use reviewtui::api::CmsClient;
use reviewtui::loader::{FetchEvent, FetchKind, FetchOutcome, Loader, Request, Slot, Ticket};
use tokio::sync::mpsc::Receiver;
use tokio::time::timeout;

const QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Mocked CMS; mocks are removed when dropped, so they are returned too
async fn cms() -> (ServerGuard, Vec<Mock>) {
    let mut server = Server::new_async().await;
    let mut mocks = Vec::new();
    let list = server
        .mock("GET", "/api/movies")
        .match_query(Matcher::Exact("populate=*".into()))
        .with_status(200)
        .with_body(r#"{"data": [{"id": 3, "title": "Dune", "rating": 8, "reviews": []}]}"#)
        .create_async()
        .await;
    mocks.push(list);
    for (id, title) in [(3, "Dune"), (5, "Cats")] {
        let single = server
            .mock("GET", "/api/movies")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("filters[id][$eq]".into(), id.to_string()),
                Matcher::UrlEncoded("populate".into(), "*".into()),
            ]))
            .with_status(200)
            .with_body(format!(
                r#"{{"data": [{{"id": {}, "title": "{}", "reviews": []}}]}}"#,
                id, title
            ))
            .create_async()
            .await;
        mocks.push(single);
    }
    (server, mocks)
}

fn ticket(slot: Slot, generation: u64) -> Ticket {
    Ticket { slot, generation }
}

async fn next_event(rx: &mut Receiver<FetchEvent>) -> FetchEvent {
    timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("fetch did not finish")
        .expect("channel closed")
}

async fn assert_quiet(rx: &mut Receiver<FetchEvent>) {
    assert!(
        timeout(QUIET_PERIOD, rx.recv()).await.is_err(),
        "unexpected fetch event"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn test_catalog_fetch_reports_back() {
    let (server, _mocks) = cms().await;
    let (mut loader, mut rx) = Loader::new(CmsClient::new(server.url()));

    loader.handle(Request::Fetch {
        ticket: ticket(Slot::Catalog, 1),
        kind: FetchKind::Catalog,
    });

    let event = next_event(&mut rx).await;
    assert_eq!(event.ticket, ticket(Slot::Catalog, 1));
    match event.outcome {
        FetchOutcome::Catalog(Ok(movies)) => assert_eq!(movies[0].title, "Dune"),
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test(flavor = "current_thread")]
async fn test_new_fetch_aborts_previous_in_same_slot() {
    let (server, _mocks) = cms().await;
    let (mut loader, mut rx) = Loader::new(CmsClient::new(server.url()));

    loader.fetch(ticket(Slot::Detail, 1), FetchKind::Movie { id: 3 });
    loader.fetch(ticket(Slot::Detail, 2), FetchKind::Movie { id: 5 });

    let event = next_event(&mut rx).await;
    assert_eq!(event.ticket.generation, 2);
    match event.outcome {
        FetchOutcome::Movie(Ok(movie)) => assert_eq!(movie.id, 5),
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_quiet(&mut rx).await;
}

#[tokio::test(flavor = "current_thread")]
async fn test_cancel_drops_the_fetch() {
    let (server, _mocks) = cms().await;
    let (mut loader, mut rx) = Loader::new(CmsClient::new(server.url()));

    loader.fetch(ticket(Slot::Detail, 1), FetchKind::Movie { id: 3 });
    assert!(loader.in_flight(Slot::Detail));
    loader.handle(Request::Cancel(Slot::Detail));
    assert!(!loader.in_flight(Slot::Detail));

    assert_quiet(&mut rx).await;
}

#[tokio::test(flavor = "current_thread")]
async fn test_slots_are_independent() {
    let (server, _mocks) = cms().await;
    let (mut loader, mut rx) = Loader::new(CmsClient::new(server.url()));

    loader.fetch(ticket(Slot::Catalog, 1), FetchKind::Catalog);
    loader.fetch(ticket(Slot::Detail, 1), FetchKind::Movie { id: 5 });

    let mut slots = vec![
        next_event(&mut rx).await.ticket.slot,
        next_event(&mut rx).await.ticket.slot,
    ];
    slots.sort_by_key(|s| matches!(s, Slot::Detail));
    assert_eq!(slots, vec![Slot::Catalog, Slot::Detail]);
}

#[tokio::test(flavor = "current_thread")]
async fn test_not_found_is_reported_not_dropped() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/movies")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"data": []}"#)
        .create_async()
        .await;
    let (mut loader, mut rx) = Loader::new(CmsClient::new(server.url()));

    loader.fetch(ticket(Slot::Detail, 7), FetchKind::Movie { id: 42 });

    match next_event(&mut rx).await.outcome {
        FetchOutcome::Movie(Err(e)) => assert!(e.is_not_found()),
        other => panic!("unexpected outcome: {:?}", other),
    }
}
