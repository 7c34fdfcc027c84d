//! Grid lifecycle against a queued transport: initial load, paging, failure and teardown.

use animeverse::logic::{InitialOutcome, LoadOutcome};
use animeverse::sources::FetchError;
use animeverse::state::{GRID_FAILED_TEXT, Notice, lock_surface};

use crate::common::{QueuedTransport, anime, grid_session, page};

fn titles(session: &animeverse::app::Session) -> Vec<String> {
    lock_surface(&session.surface)
        .grid_cards()
        .iter()
        .map(|c| c.title.clone())
        .collect()
}

#[tokio::test]
/// What: Pages are requested in order and their cards appended in listing order
async fn pages_append_in_request_order() {
    let transport = QueuedTransport::new();
    transport
        .ok(page(vec![anime("A", &["Action"]), anime("B", &["Drama"])]))
        .ok(page(vec![anime("C", &["Comedy"])]));
    let session = grid_session(transport.clone());

    let (first, more) = session.load_pages(1).await;
    assert_eq!(first, InitialOutcome::Loaded(2));
    assert_eq!(more, vec![LoadOutcome::Appended(1)]);
    assert_eq!(titles(&session), ["A", "B", "C"]);
    assert_eq!(
        transport.paths(),
        [
            "/top/anime?page=1&filter=bypopularity",
            "/top/anime?page=2&filter=bypopularity"
        ]
    );
    assert_eq!(session.grid.cursor(), 2);
}

#[tokio::test]
/// What: A failed load more keeps the control and the next attempt repeats the page
async fn failed_load_more_retries_same_page() {
    let transport = QueuedTransport::new();
    transport
        .ok(page(vec![anime("A", &["Action"])]))
        .fail(FetchError::Status(503))
        .ok(page(vec![anime("B", &["Action"])]));
    let session = grid_session(transport.clone());

    assert_eq!(session.grid.initial_load().await, InitialOutcome::Loaded(1));
    assert_eq!(
        session.grid.load_more().await,
        LoadOutcome::Failed(FetchError::Status(503))
    );
    assert_eq!(session.grid.cursor(), 1);
    {
        let surface = lock_surface(&session.surface);
        let ctrl = surface.load_more().expect("control mounted");
        assert!(!ctrl.is_hidden());
        assert!(!ctrl.is_busy());
    }
    assert_eq!(session.grid.load_more().await, LoadOutcome::Appended(1));
    let paths = transport.paths();
    assert_eq!(paths[1], paths[2]);
    assert_eq!(titles(&session), ["A", "B"]);
}

#[tokio::test]
/// What: An empty page hides the load-more control and leaves the cards alone
async fn empty_page_hides_load_more() {
    let transport = QueuedTransport::new();
    transport.ok(page(vec![anime("Only", &["Action"])]));
    let session = grid_session(transport);

    let (_, more) = session.load_pages(3).await;
    assert_eq!(more, vec![LoadOutcome::Exhausted]);
    let surface = lock_surface(&session.surface);
    assert!(surface.load_more().is_some_and(|c| c.is_hidden()));
    assert_eq!(surface.grid_cards().len(), 1);
}

#[tokio::test]
/// What: A failed first page shows the failure notice instead of cards
async fn failed_first_page_shows_notice() {
    let transport = QueuedTransport::new();
    transport.fail(FetchError::Network("offline".into()));
    let session = grid_session(transport);

    let (first, more) = session.load_pages(2).await;
    assert!(matches!(first, InitialOutcome::Failed(FetchError::Network(_))));
    assert!(more.is_empty());
    let surface = lock_surface(&session.surface);
    let notice = surface.grid().and_then(|g| g.notice.clone());
    assert_eq!(notice, Some(Notice::Failed(GRID_FAILED_TEXT.to_string())));
}

#[tokio::test]
/// What: After shutdown no request is issued and nothing reaches the surface
async fn shutdown_discards_further_loads() {
    let transport = QueuedTransport::new();
    transport.ok(page(vec![anime("A", &["Action"])]));
    let session = grid_session(transport.clone());
    assert_eq!(session.grid.initial_load().await, InitialOutcome::Loaded(1));

    session.shutdown();
    assert!(session.grid.is_torn_down());
    assert_eq!(session.grid.load_more().await, LoadOutcome::Discarded);
    assert_eq!(transport.paths().len(), 1);
    assert!(lock_surface(&session.surface).grid().is_none());
}

#[tokio::test]
/// What: An unmounted grid makes the initial load a no-op without a request
async fn unmounted_grid_skips_initial_load() {
    let transport = QueuedTransport::new();
    let session = grid_session(transport.clone());
    lock_surface(&session.surface).unmount_grid();

    assert_eq!(session.grid.initial_load().await, InitialOutcome::Discarded);
    assert!(transport.paths().is_empty());
}
