//! Front-end state: focus, selections, filter bar, search input and modal.

use std::path::PathBuf;

use tracing::debug;

use super::modal::{Modal, TrailerPreview};
use super::surface::{SharedSurface, lock_surface};
use super::types::GalleryTab;
use crate::logic::{FILTER_ALL, FilterEngine, FilterMode};
use crate::render::{GalleryItem, RenderedCard};

/// Which pane receives navigation keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    /// The anime grid.
    #[default]
    Grid,
    /// The gallery of the active tab.
    Gallery,
    /// The search input line.
    Search,
}

/// Central state mutated by the event layer and read by the UI.
#[derive(Debug)]
pub struct AppState {
    /// Page the controllers install into.
    pub surface: SharedSurface,
    /// Tag/search visibility engine.
    pub filter: FilterEngine,
    /// Filter bar values, `all` first.
    pub filters: Vec<String>,
    /// Index into `filters` of the active tag.
    pub filter_idx: usize,
    /// Pane with keyboard focus.
    pub focus: Focus,
    /// Pane focused before the search input took focus.
    pub focus_before_search: Focus,
    /// Search text as typed.
    pub search_input: String,
    /// Selection among the visible grid cards.
    pub grid_selected: usize,
    /// Selection within the active gallery tab.
    pub gallery_selected: usize,
    /// Gallery tab shown.
    pub active_tab: GalleryTab,
    /// Open dialog.
    pub modal: Modal,
    /// One-line status shown in the footer.
    pub status: Option<String>,
    /// Target directory of image downloads.
    pub downloads_dir: PathBuf,
}

impl AppState {
    /// What: Fresh state over `surface`.
    ///
    /// Inputs:
    /// - `filters`: Filter bar values; `all` is prepended when missing.
    /// - `mode`: Filter composition mode.
    #[must_use]
    pub fn new(
        surface: SharedSurface,
        mut filters: Vec<String>,
        mode: FilterMode,
        downloads_dir: PathBuf,
    ) -> Self {
        if filters.first().map(String::as_str) != Some(FILTER_ALL) {
            filters.retain(|f| f != FILTER_ALL);
            filters.insert(0, FILTER_ALL.to_string());
        }
        Self {
            surface,
            filter: FilterEngine::new(mode),
            filters,
            filter_idx: 0,
            focus: Focus::Grid,
            focus_before_search: Focus::Grid,
            search_input: String::new(),
            grid_selected: 0,
            gallery_selected: 0,
            active_tab: GalleryTab::Wallpapers,
            modal: Modal::None,
            status: None,
            downloads_dir,
        }
    }

    /// Active filter value.
    #[must_use]
    pub fn active_filter(&self) -> &str {
        self.filters
            .get(self.filter_idx)
            .map_or(FILTER_ALL, String::as_str)
    }

    /// Number of grid cards currently visible.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        lock_surface(&self.surface)
            .grid_cards()
            .iter()
            .filter(|c| c.visible)
            .count()
    }

    fn clamp_grid_selection(&mut self) {
        let n = self.visible_count();
        self.grid_selected = self.grid_selected.min(n.saturating_sub(1));
    }

    /// What: Step to the next (or previous) filter value, wrapping, and apply it.
    ///
    /// Output:
    /// - Number of visible cards afterwards.
    pub fn cycle_filter(&mut self, forward: bool) -> usize {
        let len = self.filters.len().max(1);
        self.filter_idx = if forward {
            (self.filter_idx + 1) % len
        } else {
            (self.filter_idx + len - 1) % len
        };
        let tag = self.active_filter().to_string();
        let shown = {
            let mut surface = lock_surface(&self.surface);
            surface
                .grid_cards_mut()
                .map_or(0, |cards| self.filter.apply_tag(cards, &tag))
        };
        self.clamp_grid_selection();
        self.status = Some(format!("Filter: {tag} ({shown} shown)"));
        shown
    }

    /// Re-run the search with the current input; called on every edit.
    pub fn apply_search(&mut self) -> usize {
        let query = self.search_input.clone();
        let shown = {
            let mut surface = lock_surface(&self.surface);
            surface
                .grid_cards_mut()
                .map_or(0, |cards| self.filter.apply_search(cards, &query))
        };
        self.clamp_grid_selection();
        shown
    }

    /// Evaluate the remembered filter on cards appended by a load.
    pub fn after_grid_change(&mut self) -> usize {
        let shown = {
            let mut surface = lock_surface(&self.surface);
            surface
                .grid_cards_mut()
                .map_or(0, |cards| self.filter.reapply(cards))
        };
        self.clamp_grid_selection();
        shown
    }

    /// Give focus to the search line, remembering where it came from.
    pub fn enter_search(&mut self) {
        if self.focus != Focus::Search {
            self.focus_before_search = self.focus;
            self.focus = Focus::Search;
        }
    }

    /// Return focus to the pane used before searching; the query stays applied.
    pub fn leave_search(&mut self) {
        if self.focus == Focus::Search {
            self.focus = self.focus_before_search;
        }
    }

    /// Switch between grid and gallery focus.
    pub const fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Grid => Focus::Gallery,
            Focus::Gallery | Focus::Search => Focus::Grid,
        };
    }

    /// Show `tab`, resetting the gallery selection.
    pub fn select_tab(&mut self, tab: GalleryTab) {
        self.active_tab = tab;
        self.gallery_selected = 0;
        debug!(tab = tab.key(), "active gallery tab");
    }

    /// What: Move the selection of the focused pane by `delta`, clamped to its items.
    pub fn move_selection(&mut self, delta: isize) {
        let (len, sel) = match self.focus {
            Focus::Gallery => (
                lock_surface(&self.surface)
                    .gallery_items(self.active_tab)
                    .map_or(0, <[GalleryItem]>::len),
                &mut self.gallery_selected,
            ),
            Focus::Grid | Focus::Search => (self.visible_count(), &mut self.grid_selected),
        };
        if len == 0 {
            *sel = 0;
            return;
        }
        *sel = sel.saturating_add_signed(delta).min(len - 1);
    }

    /// Selected grid card among the visible ones.
    #[must_use]
    pub fn selected_card(&self) -> Option<RenderedCard> {
        lock_surface(&self.surface)
            .grid_cards()
            .iter()
            .filter(|c| c.visible)
            .nth(self.grid_selected)
            .cloned()
    }

    /// Selected tile of the active gallery tab.
    #[must_use]
    pub fn selected_gallery_item(&self) -> Option<GalleryItem> {
        lock_surface(&self.surface)
            .gallery_items(self.active_tab)
            .and_then(|items| items.get(self.gallery_selected))
            .cloned()
    }

    /// Open the detail dialog of the selected card.
    pub fn open_detail(&mut self) {
        if let Some(card) = self.selected_card() {
            self.modal = Modal::Detail {
                card: Box::new(card),
            };
        }
    }

    /// Open the trailer dialog of the selected card.
    pub fn open_trailer(&mut self) {
        if let Some(card) = self.selected_card() {
            self.modal = Modal::Trailer(TrailerPreview::for_card(&card));
        }
    }

    /// Open the image dialog of the selected gallery tile.
    pub fn open_image(&mut self) {
        if let Some(item) = self.selected_gallery_item() {
            self.modal = Modal::Image {
                item: Box::new(item),
            };
        }
    }
}
