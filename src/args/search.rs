//! Command-line search and filter modes.

use crate::app::Session;
use crate::logic::{FilterEngine, FilterMode};
use crate::state::lock_surface;

/// What: Load `pages` grid pages and return the display titles that pass the filters.
///
/// Inputs:
/// - `session`: Session to load into (its gallery is not awaited).
/// - `query`: Text search, if any.
/// - `tag`: Tag filter, if any.
/// - `pages`: Total grid pages to load (at least one).
///
/// Output:
/// - Matching titles in grid order.
///
/// Details:
/// - Both predicates are combined: a one-shot query has no "last operation" to
///   let win, so tag and text always intersect here.
pub async fn collect_matches(
    session: &Session,
    query: Option<&str>,
    tag: Option<&str>,
    pages: u32,
) -> Vec<String> {
    let (initial, more) = session.load_pages(pages.saturating_sub(1)).await;
    tracing::info!(?initial, extra = more.len(), "cli pages loaded");
    let mut engine = FilterEngine::new(FilterMode::Composed);
    let mut surface = lock_surface(&session.surface);
    let Some(cards) = surface.grid_cards_mut() else {
        return Vec::new();
    };
    if let Some(t) = tag {
        engine.apply_tag(cards, t);
    }
    if let Some(q) = query {
        engine.apply_search(cards, q);
    }
    cards
        .iter()
        .filter(|c| c.visible)
        .map(|c| c.title.clone())
        .collect()
}

/// What: Run the CLI search/filter mode and print one title per line.
///
/// Output:
/// - Number of titles printed.
pub async fn handle_search(
    session: &Session,
    query: Option<&str>,
    tag: Option<&str>,
    pages: u32,
) -> usize {
    tracing::info!(query = ?query, tag = ?tag, pages, "search mode requested from CLI");
    let titles = collect_matches(session, query, tag, pages).await;
    if titles.is_empty() {
        eprintln!("No anime matched.");
    }
    for t in &titles {
        println!("{t}");
    }
    titles.len()
}
