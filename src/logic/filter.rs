//! Tag filter and text search over rendered cards.

use tracing::debug;

use crate::render::RenderedCard;

/// Filter value that matches every card.
pub const FILTER_ALL: &str = "all";

/// How tag filter and text search interact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FilterMode {
    /// Each operation recomputes visibility on its own, discarding the other's restriction.
    #[default]
    Independent,
    /// Visibility is the conjunction of the active tag and the active query.
    Composed,
}

impl FilterMode {
    /// Parse a settings/CLI value.
    #[must_use]
    pub fn from_config_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "independent" | "separate" => Some(Self::Independent),
            "composed" | "combined" | "and" => Some(Self::Composed),
            _ => None,
        }
    }

    /// Value as written in settings.
    #[must_use]
    pub const fn as_config_key(self) -> &'static str {
        match self {
            Self::Independent => "independent",
            Self::Composed => "composed",
        }
    }
}

/// What: Tag predicate.
///
/// Details:
/// - Substring containment on the tag key, so a filter value that is part of
///   an unrelated tag also matches.
#[must_use]
pub fn matches_tag(card: &RenderedCard, filter: &str) -> bool {
    filter == FILTER_ALL || card.tag_key.contains(filter)
}

/// Case-insensitive substring match on title or synopsis excerpt; `query` must be lower-cased.
#[must_use]
pub fn matches_query(card: &RenderedCard, query: &str) -> bool {
    card.title.to_lowercase().contains(query)
        || card.synopsis_excerpt.to_lowercase().contains(query)
}

/// Active tag and query plus the composition mode.
#[derive(Clone, Debug)]
pub struct FilterEngine {
    mode: FilterMode,
    tag: String,
    query: String,
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new(FilterMode::default())
    }
}

impl FilterEngine {
    /// Engine with tag `all` and an empty query.
    #[must_use]
    pub fn new(mode: FilterMode) -> Self {
        Self {
            mode,
            tag: FILTER_ALL.to_string(),
            query: String::new(),
        }
    }

    /// Composition mode.
    #[must_use]
    pub const fn mode(&self) -> FilterMode {
        self.mode
    }

    /// Active tag filter.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Active (lower-cased) query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    fn visible_count(cards: &[RenderedCard]) -> usize {
        cards.iter().filter(|c| c.visible).count()
    }

    /// What: Select a tag filter and recompute visibility.
    ///
    /// Inputs:
    /// - `cards`: Rendered cards of the grid.
    /// - `filter`: Filter value (`all` shows everything); lower-cased before use.
    ///
    /// Output:
    /// - Number of visible cards afterwards.
    ///
    /// Details:
    /// - Independent mode ignores the query entirely.
    pub fn apply_tag(&mut self, cards: &mut [RenderedCard], filter: &str) -> usize {
        self.tag = filter.trim().to_lowercase();
        if self.tag.is_empty() {
            self.tag = FILTER_ALL.to_string();
        }
        for card in cards.iter_mut() {
            card.visible = match self.mode {
                FilterMode::Independent => matches_tag(card, &self.tag),
                FilterMode::Composed => {
                    matches_tag(card, &self.tag) && matches_query(card, &self.query)
                }
            };
        }
        let shown = Self::visible_count(cards);
        debug!(tag = %self.tag, shown, total = cards.len(), "tag filter applied");
        shown
    }

    /// What: Set the search text and recompute visibility from scratch.
    ///
    /// Inputs:
    /// - `cards`: Rendered cards of the grid.
    /// - `query`: Raw input text; matched case-insensitively.
    ///
    /// Output:
    /// - Number of visible cards afterwards.
    pub fn apply_search(&mut self, cards: &mut [RenderedCard], query: &str) -> usize {
        self.query = query.to_lowercase();
        for card in cards.iter_mut() {
            card.visible = match self.mode {
                FilterMode::Independent => matches_query(card, &self.query),
                FilterMode::Composed => {
                    matches_tag(card, &self.tag) && matches_query(card, &self.query)
                }
            };
        }
        let shown = Self::visible_count(cards);
        debug!(query = %self.query, shown, total = cards.len(), "search applied");
        shown
    }

    /// What: Evaluate the remembered predicate on cards added after the last operation.
    ///
    /// Output:
    /// - Number of visible cards afterwards.
    ///
    /// Details:
    /// - Only composed mode re-evaluates; in independent mode appended cards
    ///   stay as rendered (visible).
    pub fn reapply(&self, cards: &mut [RenderedCard]) -> usize {
        if self.mode == FilterMode::Composed {
            for card in cards.iter_mut() {
                card.visible = matches_tag(card, &self.tag) && matches_query(card, &self.query);
            }
        }
        Self::visible_count(cards)
    }
}
