//! Gallery population after the grid loads, and per-lane paging.

use animeverse::app::Session;
use animeverse::config::Settings;
use animeverse::logic::{DEFAULT_ITEMS_PER_TAB, InitialOutcome, LoadOutcome};
use animeverse::state::{GalleryTab, lock_surface};

use crate::common::{RoutedTransport, anime, character, page};

const ANIME_P1: &str = "/top/anime?page=1&filter=bypopularity";
const ANIME_P2: &str = "/top/anime?page=2&filter=bypopularity";
const CHARS_P1: &str = "/top/characters?page=1";
const CHARS_P2: &str = "/top/characters?page=2";

fn anime_listing(prefix: &str, n: usize) -> serde_json::Value {
    page(
        (0..n)
            .map(|i| anime(&format!("{prefix} {i}"), &["Action"]))
            .collect(),
    )
}

fn character_listing(prefix: &str, n: usize) -> serde_json::Value {
    page((0..n).map(|i| character(&format!("{prefix} {i}"))).collect())
}

#[tokio::test]
/// What: The initial grid load fills all four tabs from their own listing pages
async fn initial_load_populates_every_tab() {
    let transport = RoutedTransport::new();
    transport
        .route(ANIME_P1, anime_listing("Top", 14))
        .route(ANIME_P2, anime_listing("Next", 3))
        .route(CHARS_P1, character_listing("Hero", 12))
        .route(CHARS_P2, character_listing("Rival", 2));
    let session = Session::with_transport(transport.clone(), &Settings::default(), true);

    assert_eq!(session.grid.initial_load().await, InitialOutcome::Loaded(14));
    session.wait_for_gallery().await;

    let surface = lock_surface(&session.surface);
    let count = |tab| surface.gallery_items(tab).map_or(0, <[_]>::len);
    assert_eq!(count(GalleryTab::Wallpapers), DEFAULT_ITEMS_PER_TAB);
    assert_eq!(count(GalleryTab::Artwork), DEFAULT_ITEMS_PER_TAB);
    assert_eq!(count(GalleryTab::Screenshots), 3);
    assert_eq!(count(GalleryTab::FanArt), 2);

    let fan_art = surface.gallery_items(GalleryTab::FanArt).unwrap_or_default();
    assert_eq!(fan_art[0].title, "Rival 0");
    assert_eq!(fan_art[0].subtitle, "Fan Creation");
    assert_eq!(fan_art[0].category, "fanart");
    drop(surface);

    assert_eq!(
        transport.hits(),
        [ANIME_P1, ANIME_P1, ANIME_P2, CHARS_P1, CHARS_P2]
    );
}

#[tokio::test]
/// What: The gallery still populates when the grid's first page fails to load
async fn gallery_runs_after_failed_grid() {
    let transport = RoutedTransport::new();
    transport.route(CHARS_P1, character_listing("Hero", 4));
    let session = Session::with_transport(transport, &Settings::default(), true);

    assert_eq!(session.grid.initial_load().await, InitialOutcome::Empty);
    session.wait_for_gallery().await;
    let surface = lock_surface(&session.surface);
    assert_eq!(
        surface.gallery_items(GalleryTab::Artwork).map(<[_]>::len),
        Some(4)
    );
    assert_eq!(
        surface.gallery_items(GalleryTab::Wallpapers).map(<[_]>::len),
        Some(0)
    );
}

#[tokio::test]
/// What: Lane paging strides over the sibling tab's pages and stops once exhausted
async fn lanes_page_independently() {
    let transport = RoutedTransport::new();
    transport
        .route(CHARS_P1, character_listing("Hero", 2))
        .route(CHARS_P2, character_listing("Rival", 2))
        .route("/top/characters?page=3", character_listing("Deep", 5))
        .route("/top/characters?page=4", character_listing("Deeper", 1));
    let session = Session::with_transport(transport.clone(), &Settings::default(), true);
    let gallery = session.gallery.clone().expect("gallery enabled");
    gallery.populate_all().await;

    assert_eq!(
        gallery.load_more(GalleryTab::Artwork).await,
        LoadOutcome::Appended(5)
    );
    assert_eq!(
        gallery.load_more(GalleryTab::FanArt).await,
        LoadOutcome::Appended(1)
    );
    assert_eq!(gallery.cursor(GalleryTab::Artwork), 3);
    assert_eq!(gallery.cursor(GalleryTab::FanArt), 4);

    assert_eq!(
        gallery.load_more(GalleryTab::Artwork).await,
        LoadOutcome::Exhausted
    );
    let before = transport.hits().len();
    assert_eq!(
        gallery.load_more(GalleryTab::Artwork).await,
        LoadOutcome::Exhausted
    );
    assert_eq!(transport.hits().len(), before);
    assert!(gallery.is_exhausted(GalleryTab::Artwork));
    assert!(!gallery.is_exhausted(GalleryTab::FanArt));
}

#[tokio::test]
/// What: Disabling the gallery leaves its regions unmounted and unfetched
async fn disabled_gallery_fetches_nothing() {
    let transport = RoutedTransport::new();
    transport.route(ANIME_P1, anime_listing("Top", 2));
    let session = Session::with_transport(transport.clone(), &Settings::default(), false);

    assert!(session.gallery.is_none());
    assert_eq!(session.grid.initial_load().await, InitialOutcome::Loaded(2));
    session.wait_for_gallery().await;
    assert_eq!(transport.hits(), [ANIME_P1]);
    assert!(!lock_surface(&session.surface).has_gallery_tab(GalleryTab::Wallpapers));
}
