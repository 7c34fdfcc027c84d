//! The tabbed gallery: four independent lanes of the grid pattern.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use futures::future::join_all;
use tracing::{debug, info, warn};

use super::grid::LoadOutcome;
use super::pagination::{LoadGuard, PaginationCursor};
use crate::render::{GalleryItem, render_gallery_item};
use crate::sources::{CatalogClient, FetchError, FetchErrorPolicy};
use crate::state::{GalleryTab, SharedSurface, lock_surface};

/// Items kept per tab from each fetched page.
pub const DEFAULT_ITEMS_PER_TAB: usize = 10;
/// Pages a lane skips on load more; two tabs share each listing.
pub const PAGE_STRIDE: u32 = 2;

/// Gallery settings taken from configuration.
#[derive(Clone, Copy, Debug)]
pub struct GalleryOptions {
    /// Items kept from each fetched page.
    pub items_per_tab: usize,
    /// Whether failures stay distinguishable from empty pages.
    pub fetch_errors: FetchErrorPolicy,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            items_per_tab: DEFAULT_ITEMS_PER_TAB,
            fetch_errors: FetchErrorPolicy::Surface,
        }
    }
}

/// Cursor and guard of one tab.
///
/// `filled` turns true once the lane's first page came back (with or without
/// items); until then load more fetches that page instead of striding past it.
#[derive(Debug)]
struct Lane {
    tab: GalleryTab,
    cursor: PaginationCursor,
    guard: LoadGuard,
    filled: AtomicBool,
    exhausted: AtomicBool,
}

impl Lane {
    fn new(tab: GalleryTab) -> Self {
        Self {
            tab,
            cursor: PaginationCursor::new(tab.first_page()),
            guard: LoadGuard::default(),
            filled: AtomicBool::new(false),
            exhausted: AtomicBool::new(false),
        }
    }
}

/// Populates and extends the four gallery regions.
pub struct GalleryController {
    client: CatalogClient,
    surface: SharedSurface,
    lanes: Vec<Lane>,
    options: GalleryOptions,
    active: Mutex<GalleryTab>,
    torn_down: AtomicBool,
}

impl GalleryController {
    /// Create a gallery bound to `surface`; `Wallpapers` starts active.
    #[must_use]
    pub fn new(client: CatalogClient, surface: SharedSurface, options: GalleryOptions) -> Self {
        Self {
            client,
            surface,
            lanes: GalleryTab::ALL.into_iter().map(Lane::new).collect(),
            options,
            active: Mutex::new(GalleryTab::Wallpapers),
            torn_down: AtomicBool::new(false),
        }
    }

    fn lane(&self, tab: GalleryTab) -> Option<&Lane> {
        self.lanes.iter().find(|l| l.tab == tab)
    }

    /// Whether [`Self::teardown`] was called.
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::Acquire)
    }

    /// Stop accepting results; late fetches are discarded.
    pub fn teardown(&self) {
        self.torn_down.store(true, Ordering::Release);
    }

    /// Tab currently shown.
    #[must_use]
    pub fn active_tab(&self) -> GalleryTab {
        *self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Show `tab`. Population is unaffected: every tab is filled eagerly.
    pub fn select_tab(&self, tab: GalleryTab) {
        *self.active.lock().unwrap_or_else(PoisonError::into_inner) = tab;
        debug!(tab = tab.key(), "gallery tab selected");
    }

    /// Page last requested by the lane of `tab`.
    #[must_use]
    pub fn cursor(&self, tab: GalleryTab) -> u32 {
        self.lane(tab).map_or(0, |l| l.cursor.current())
    }

    /// Whether the lane of `tab` ran out of pages.
    #[must_use]
    pub fn is_exhausted(&self, tab: GalleryTab) -> bool {
        self.lane(tab)
            .is_some_and(|l| l.exhausted.load(Ordering::Acquire))
    }

    /// Whether the lane of `tab` has a request in flight.
    #[must_use]
    pub fn is_loading(&self, tab: GalleryTab) -> bool {
        self.lane(tab).is_some_and(|l| l.guard.is_loading())
    }

    async fn fetch_items(&self, tab: GalleryTab, page: u32) -> Result<Vec<GalleryItem>, FetchError> {
        let records = self
            .client
            .fetch_with_policy(tab.list_kind(), page, self.options.fetch_errors)
            .await?;
        Ok(records
            .iter()
            .take(self.options.items_per_tab)
            .map(|r| render_gallery_item(r, tab))
            .collect())
    }

    /// What: Fill every tab from its bound (listing, page) pair.
    ///
    /// Output:
    /// - One outcome per tab, in tab order. `Appended(n)` means the region was
    ///   replaced by `n` items.
    ///
    /// Details:
    /// - Lanes are fetched concurrently and share nothing; a lane whose region
    ///   is absent issues no request.
    /// - An empty or failed page leaves that region as it was.
    /// - A lane already filled by an earlier load more is left alone (`Skipped`).
    pub async fn populate_all(&self) -> Vec<(GalleryTab, LoadOutcome)> {
        let fills = self
            .lanes
            .iter()
            .map(|lane| async move { (lane.tab, self.populate_lane(lane).await) });
        join_all(fills).await
    }

    async fn populate_lane(&self, lane: &Lane) -> LoadOutcome {
        if self.is_torn_down() {
            return LoadOutcome::Discarded;
        }
        let mounted = lock_surface(&self.surface).has_gallery_tab(lane.tab);
        if !mounted {
            debug!(tab = lane.tab.key(), "gallery region absent; skipping");
            return LoadOutcome::Discarded;
        }
        if lane.filled.load(Ordering::Acquire) {
            return LoadOutcome::Skipped;
        }
        let Some(_permit) = lane.guard.try_acquire() else {
            return LoadOutcome::Skipped;
        };
        self.fill_lane(lane).await
    }

    /// Replace the lane's region with its first page. Caller holds the lane guard.
    async fn fill_lane(&self, lane: &Lane) -> LoadOutcome {
        let page = lane.cursor.current();
        let result = self.fetch_items(lane.tab, page).await;
        if self.is_torn_down() {
            return LoadOutcome::Discarded;
        }
        match result {
            Ok(items) if items.is_empty() => {
                lane.filled.store(true, Ordering::Release);
                lane.exhausted.store(true, Ordering::Release);
                warn!(tab = lane.tab.key(), page, "gallery tab received no items");
                LoadOutcome::Exhausted
            }
            Ok(items) => {
                let n = items.len();
                if lock_surface(&self.surface).replace_gallery(lane.tab, items) {
                    lane.filled.store(true, Ordering::Release);
                    info!(tab = lane.tab.key(), page, items = n, "gallery tab populated");
                    LoadOutcome::Appended(n)
                } else {
                    LoadOutcome::Discarded
                }
            }
            Err(e) => {
                warn!(tab = lane.tab.key(), page, error = %e, "gallery tab failed to load");
                LoadOutcome::Failed(e)
            }
        }
    }

    /// What: Append the next page of the lane of `tab`.
    ///
    /// Output:
    /// - Same contract as the grid's load more: `Skipped` while in flight,
    ///   `Exhausted` once a page comes back empty (further calls stay
    ///   `Exhausted` without fetching), `Failed` restores the cursor.
    ///
    /// Details:
    /// - Advances by [`PAGE_STRIDE`] so tabs sharing a listing never fetch
    ///   each other's pages.
    /// - A lane whose first page has not arrived yet (population pending or
    ///   failed) loads that page instead, so it is never skipped.
    pub async fn load_more(&self, tab: GalleryTab) -> LoadOutcome {
        if self.is_torn_down() {
            return LoadOutcome::Discarded;
        }
        let Some(lane) = self.lane(tab) else {
            return LoadOutcome::Discarded;
        };
        if lane.exhausted.load(Ordering::Acquire) {
            return LoadOutcome::Exhausted;
        }
        let Some(_permit) = lane.guard.try_acquire() else {
            return LoadOutcome::Skipped;
        };
        if !lane.filled.load(Ordering::Acquire) {
            debug!(tab = tab.key(), "lane not filled yet; loading its first page");
            return self.fill_lane(lane).await;
        }
        let (prev, page) = lane.cursor.advance_by(PAGE_STRIDE);
        let result = self.fetch_items(tab, page).await;
        if self.is_torn_down() {
            return LoadOutcome::Discarded;
        }
        match result {
            Ok(items) if items.is_empty() => {
                lane.exhausted.store(true, Ordering::Release);
                info!(tab = tab.key(), page, "gallery lane exhausted");
                LoadOutcome::Exhausted
            }
            Ok(items) => {
                let n = items.len();
                if lock_surface(&self.surface).append_gallery(tab, items) {
                    LoadOutcome::Appended(n)
                } else {
                    LoadOutcome::Discarded
                }
            }
            Err(e) => {
                lane.cursor.restore(prev);
                warn!(tab = tab.key(), page, error = %e, "gallery load more failed; cursor restored");
                LoadOutcome::Failed(e)
            }
        }
    }
}
