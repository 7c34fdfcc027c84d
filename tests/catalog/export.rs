//! Exported documents and CLI matching over hostile catalog text.

use animeverse::app::Session;
use animeverse::args::{collect_matches, handle_export};
use animeverse::config::Settings;

use crate::common::{QueuedTransport, RoutedTransport, anime, character, page};

#[tokio::test]
/// What: Markup characters in remote titles never reach the document unescaped
async fn export_escapes_remote_text() {
    let transport = RoutedTransport::new();
    transport
        .route(
            "/top/anime?page=1&filter=bypopularity",
            page(vec![anime("<script>alert(1)</script>", &["Action"])]),
        )
        .route(
            "/top/characters?page=1",
            page(vec![character(r#"Rin "Tohsaka" & Co"#)]),
        );
    let session = Session::with_transport(transport, &Settings::default(), true);
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("nested").join("page.html");

    let written = handle_export(&session, &Settings::default().filters, None, 1, &out)
        .await
        .expect("export succeeds");
    session.shutdown();

    let html = std::fs::read_to_string(&written).expect("read export");
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(html.contains("Rin &quot;Tohsaka&quot; &amp; Co"));
    assert!(html.contains(r#"data-filter="romance""#));
}

#[tokio::test]
/// What: A tag passed to export hides non-matching cards instead of dropping them
async fn export_keeps_filtered_cards_hidden() {
    let transport = QueuedTransport::new();
    transport.ok(page(vec![
        anime("Sword Story", &["Action"]),
        anime("Tea Time", &["Slice of Life"]),
    ]));
    let session = Session::with_transport(transport, &Settings::default(), false);
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("filtered.html");

    handle_export(&session, &Settings::default().filters, Some("action"), 1, &out)
        .await
        .expect("export succeeds");
    let html = std::fs::read_to_string(&out).expect("read export");
    assert!(html.contains("Sword Story"));
    assert!(html.contains("<div hidden>"));
    assert!(html.contains("Tea Time"));
}

#[tokio::test]
/// What: CLI matching spans every loaded page and intersects tag with query
async fn cli_matches_cover_all_pages() {
    let transport = QueuedTransport::new();
    transport
        .ok(page(vec![
            anime("Moon Knight", &["Action"]),
            anime("Moon Garden", &["Romance"]),
        ]))
        .ok(page(vec![anime("Moonlight Duel", &["Action"])]));
    let session = Session::with_transport(transport, &Settings::default(), false);

    let titles = collect_matches(&session, Some("moon"), Some("action"), 2).await;
    assert_eq!(titles, ["Moon Knight", "Moonlight Duel"]);
}
