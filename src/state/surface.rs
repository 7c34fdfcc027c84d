//! The DOM-like surface controllers install fragments into.
//!
//! The surface is shared between controllers and the presentation layer as
//! [`SharedSurface`]. Regions may be unmounted at any time; every mutating
//! method reports whether its target existed so late results can be dropped.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::render::{GalleryItem, RenderedCard};
use crate::state::GalleryTab;

/// Shared handle to a [`Surface`].
pub type SharedSurface = Arc<Mutex<Surface>>;

/// Placeholder shown while the first grid page is in flight.
pub const GRID_LOADING_TEXT: &str = "Loading Top Anime...";
/// Message shown when the first grid page could not be loaded.
pub const GRID_FAILED_TEXT: &str = "Failed to load anime data.";
/// Label of the load-more control when idle.
pub const LOAD_MORE_LABEL: &str = "Load More";
/// Label of the load-more control while a request is in flight.
pub const LOAD_MORE_BUSY_LABEL: &str = "Loading...";

/// Status message occupying the grid region instead of cards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// Loading placeholder.
    Loading(String),
    /// Failure message.
    Failed(String),
}

impl Notice {
    /// Message text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Loading(t) | Self::Failed(t) => t,
        }
    }
}

/// The `animeGrid` region.
#[derive(Clone, Debug, Default)]
pub struct GridRegion {
    /// Notice replacing the cards, if any.
    pub notice: Option<Notice>,
    /// Installed cards in insertion order.
    pub cards: Vec<RenderedCard>,
}

/// The "load more" button under the grid.
#[derive(Clone, Debug)]
pub struct LoadMoreControl {
    hidden: bool,
    busy: bool,
}

impl LoadMoreControl {
    /// Whether the control was hidden after the listing ran out.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Whether a request started from this control is in flight.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    /// Current button label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        if self.busy {
            LOAD_MORE_BUSY_LABEL
        } else {
            LOAD_MORE_LABEL
        }
    }
}

/// In-memory page: the grid, the four gallery regions and the load-more control.
#[derive(Debug)]
pub struct Surface {
    grid: Option<GridRegion>,
    gallery: BTreeMap<GalleryTab, Vec<GalleryItem>>,
    load_more: Option<LoadMoreControl>,
    revision: u64,
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface {
    /// A fully mounted, empty page.
    #[must_use]
    pub fn new() -> Self {
        Self {
            grid: Some(GridRegion::default()),
            gallery: GalleryTab::ALL.into_iter().map(|t| (t, Vec::new())).collect(),
            load_more: Some(LoadMoreControl {
                hidden: false,
                busy: false,
            }),
            revision: 0,
        }
    }

    /// A page with no regions mounted.
    #[must_use]
    pub const fn unmounted() -> Self {
        Self {
            grid: None,
            gallery: BTreeMap::new(),
            load_more: None,
            revision: 0,
        }
    }

    /// Wrap into a [`SharedSurface`].
    #[must_use]
    pub fn shared(self) -> SharedSurface {
        Arc::new(Mutex::new(self))
    }

    /// Number of mutations applied so far.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    const fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Grid region, if mounted.
    #[must_use]
    pub const fn grid(&self) -> Option<&GridRegion> {
        self.grid.as_ref()
    }

    /// Cards of the grid (empty when unmounted).
    #[must_use]
    pub fn grid_cards(&self) -> &[RenderedCard] {
        self.grid
            .as_ref()
            .map(|g| g.cards.as_slice())
            .unwrap_or_default()
    }

    /// Mutable cards of the grid, for visibility changes.
    pub fn grid_cards_mut(&mut self) -> Option<&mut Vec<RenderedCard>> {
        if self.grid.is_some() {
            self.touch();
        }
        self.grid.as_mut().map(|g| &mut g.cards)
    }

    /// What: Replace the grid content with a notice.
    ///
    /// Output:
    /// - `false` when the grid is not mounted (nothing changes).
    pub fn set_grid_notice(&mut self, notice: Notice) -> bool {
        let Some(grid) = self.grid.as_mut() else {
            return false;
        };
        grid.cards.clear();
        grid.notice = Some(notice);
        self.touch();
        true
    }

    /// Replace the grid content with `cards`; `false` when unmounted.
    pub fn replace_grid_cards(&mut self, cards: Vec<RenderedCard>) -> bool {
        let Some(grid) = self.grid.as_mut() else {
            return false;
        };
        grid.notice = None;
        grid.cards = cards;
        self.touch();
        true
    }

    /// Append `cards` after the existing ones; `false` when unmounted.
    pub fn append_grid_cards(&mut self, cards: Vec<RenderedCard>) -> bool {
        let Some(grid) = self.grid.as_mut() else {
            return false;
        };
        grid.notice = None;
        grid.cards.extend(cards);
        self.touch();
        true
    }

    /// Remove the grid region.
    pub fn unmount_grid(&mut self) {
        if self.grid.take().is_some() {
            self.touch();
        }
    }

    /// Items of a gallery tab, if mounted.
    #[must_use]
    pub fn gallery_items(&self, tab: GalleryTab) -> Option<&[GalleryItem]> {
        self.gallery.get(&tab).map(Vec::as_slice)
    }

    /// Whether the region of `tab` exists.
    #[must_use]
    pub fn has_gallery_tab(&self, tab: GalleryTab) -> bool {
        self.gallery.contains_key(&tab)
    }

    /// Replace the items of `tab`; `false` when unmounted.
    pub fn replace_gallery(&mut self, tab: GalleryTab, items: Vec<GalleryItem>) -> bool {
        let Some(slot) = self.gallery.get_mut(&tab) else {
            return false;
        };
        *slot = items;
        self.touch();
        true
    }

    /// Append items to `tab`; `false` when unmounted.
    pub fn append_gallery(&mut self, tab: GalleryTab, items: Vec<GalleryItem>) -> bool {
        let Some(slot) = self.gallery.get_mut(&tab) else {
            return false;
        };
        slot.extend(items);
        self.touch();
        true
    }

    /// Remove the region of `tab`.
    pub fn unmount_gallery(&mut self, tab: GalleryTab) {
        if self.gallery.remove(&tab).is_some() {
            self.touch();
        }
    }

    /// The load-more control, if mounted.
    #[must_use]
    pub const fn load_more(&self) -> Option<&LoadMoreControl> {
        self.load_more.as_ref()
    }

    /// Mark the load-more control busy or idle. No-op when unmounted.
    pub fn set_load_more_busy(&mut self, busy: bool) {
        if let Some(ctrl) = self.load_more.as_mut() {
            ctrl.busy = busy;
            self.touch();
        }
    }

    /// What: Hide the load-more control for the rest of the session.
    ///
    /// Details:
    /// - There is deliberately no inverse operation.
    pub fn hide_load_more(&mut self) {
        if let Some(ctrl) = self.load_more.as_mut() {
            ctrl.hidden = true;
            self.touch();
        }
    }

    /// Remove the load-more control.
    pub fn unmount_load_more(&mut self) {
        if self.load_more.take().is_some() {
            self.touch();
        }
    }

    /// Unmount every region, as when the page goes away.
    pub fn unmount_all(&mut self) {
        self.unmount_grid();
        for tab in GalleryTab::ALL {
            self.unmount_gallery(tab);
        }
        self.unmount_load_more();
    }
}

/// Lock a shared surface, recovering the data if a holder panicked.
pub fn lock_surface(surface: &SharedSurface) -> MutexGuard<'_, Surface> {
    surface.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render_card;
    use crate::state::AnimeRecord;

    fn card(title: &str) -> RenderedCard {
        render_card(&AnimeRecord {
            title: title.into(),
            image_url: "x.jpg".into(),
            ..AnimeRecord::default()
        })
    }

    #[test]
    /// What: Notice and cards are exclusive; appends keep order
    fn grid_notice_and_cards() {
        let mut s = Surface::new();
        assert!(s.set_grid_notice(Notice::Loading(GRID_LOADING_TEXT.into())));
        assert!(s.replace_grid_cards(vec![card("A")]));
        assert!(s.grid().is_some_and(|g| g.notice.is_none()));
        assert!(s.append_grid_cards(vec![card("B"), card("C")]));
        let titles: Vec<_> = s.grid_cards().iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["A", "B", "C"]);
    }

    #[test]
    /// What: Unmounted regions reject mutations and keep the revision
    fn unmounted_regions_are_untouched() {
        let mut s = Surface::new();
        s.unmount_all();
        let rev = s.revision();
        assert!(!s.replace_grid_cards(vec![card("A")]));
        assert!(!s.append_gallery(GalleryTab::Artwork, Vec::new()));
        s.hide_load_more();
        s.set_load_more_busy(true);
        assert_eq!(s.revision(), rev);
    }

    #[test]
    fn load_more_label_tracks_busy() {
        let mut s = Surface::new();
        s.set_load_more_busy(true);
        assert_eq!(s.load_more().map(LoadMoreControl::label), Some("Loading..."));
        s.set_load_more_busy(false);
        assert_eq!(s.load_more().map(LoadMoreControl::label), Some("Load More"));
        s.hide_load_more();
        assert!(s.load_more().is_some_and(LoadMoreControl::is_hidden));
    }
}
