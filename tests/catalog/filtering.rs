//! Tag filter and search over loaded grid pages, in both composition modes.

use animeverse::logic::{FilterEngine, FilterMode};
use animeverse::state::lock_surface;

use crate::common::{QueuedTransport, anime, grid_session, page};

async fn loaded_session() -> animeverse::app::Session {
    let transport = QueuedTransport::new();
    transport
        .ok(page(vec![
            anime("Blade Runner Zero", &["Action", "Sci-Fi"]),
            anime("Quiet Garden", &["Romance"]),
        ]))
        .ok(page(vec![
            anime("Blade Dance", &["Romance", "Fantasy"]),
            anime("Steel Fist", &["Action"]),
        ]));
    let session = grid_session(transport);
    session.load_pages(1).await;
    session
}

fn visible_titles(session: &animeverse::app::Session) -> Vec<String> {
    lock_surface(&session.surface)
        .grid_cards()
        .iter()
        .filter(|c| c.visible)
        .map(|c| c.title.clone())
        .collect()
}

#[tokio::test]
/// What: Composed mode shows exactly the cards matching both tag and query
async fn composed_mode_intersects_tag_and_query() {
    let session = loaded_session().await;
    let mut engine = FilterEngine::new(FilterMode::Composed);
    {
        let mut surface = lock_surface(&session.surface);
        let cards = surface.grid_cards_mut().expect("grid mounted");
        assert_eq!(engine.apply_tag(cards, "romance"), 2);
        assert_eq!(engine.apply_search(cards, "BLADE"), 1);
    }
    assert_eq!(visible_titles(&session), ["Blade Dance"]);
}

#[tokio::test]
/// What: Independent mode lets the later operation replace the earlier restriction
async fn independent_mode_last_operation_wins() {
    let session = loaded_session().await;
    let mut engine = FilterEngine::new(FilterMode::Independent);
    let mut surface = lock_surface(&session.surface);
    let cards = surface.grid_cards_mut().expect("grid mounted");

    assert_eq!(engine.apply_tag(cards, "action"), 2);
    assert_eq!(engine.apply_search(cards, "blade"), 2);
    assert!(cards.iter().any(|c| c.visible && c.title == "Blade Dance"));

    assert_eq!(engine.apply_tag(cards, "all"), 4);
    assert_eq!(engine.query(), "blade");
}

#[tokio::test]
/// What: Composed mode hides appended cards that fail the remembered predicate
async fn composed_mode_reapplies_to_appended_page() {
    let transport = QueuedTransport::new();
    transport
        .ok(page(vec![anime("First Romance", &["Romance"])]))
        .ok(page(vec![
            anime("Late Romance", &["Romance"]),
            anime("Late Action", &["Action"]),
        ]));
    let session = grid_session(transport);
    let mut engine = FilterEngine::new(FilterMode::Composed);

    session.grid.initial_load().await;
    {
        let mut surface = lock_surface(&session.surface);
        let cards = surface.grid_cards_mut().expect("grid mounted");
        engine.apply_tag(cards, "romance");
    }
    session.grid.load_more().await;
    {
        let mut surface = lock_surface(&session.surface);
        let cards = surface.grid_cards_mut().expect("grid mounted");
        assert_eq!(engine.reapply(cards), 2);
    }
    assert_eq!(visible_titles(&session), ["First Romance", "Late Romance"]);
}
