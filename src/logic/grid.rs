//! The anime grid controller: initial load and incremental "load more".

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use super::gallery::GalleryController;
use super::pagination::{LoadGuard, PaginationCursor};
use super::tasks::TaskRegistry;
use crate::render::{RenderedCard, render_card};
use crate::sources::{CatalogClient, FetchError, FetchErrorPolicy};
use crate::state::{
    CatalogRecord, ControllerId, GRID_FAILED_TEXT, GRID_LOADING_TEXT, GalleryTab, ListKind,
    Notice, SharedSurface, lock_surface,
};

/// Result of a load-more request (grid or gallery lane).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// This many fragments were installed.
    Appended(usize),
    /// The listing returned no records; the lane is done for the session.
    Exhausted,
    /// The fetch failed; the cursor was restored.
    Failed(FetchError),
    /// Another request was in flight; nothing was issued.
    Skipped,
    /// The result arrived for a torn-down controller or an absent region and was dropped.
    Discarded,
}

/// Result of the grid's initial load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InitialOutcome {
    /// This many cards replaced the placeholder.
    Loaded(usize),
    /// The first page was empty; the failure notice is shown.
    Empty,
    /// The first page could not be fetched; the failure notice is shown.
    Failed(FetchError),
    /// The grid region was absent or the controller was torn down.
    Discarded,
    /// Another initial load held the guard; nothing was issued.
    Skipped,
}

/// Grid settings taken from configuration.
#[derive(Clone, Copy, Debug)]
pub struct GridOptions {
    /// Page requested by the initial load.
    pub first_page: u32,
    /// Whether failures stay distinguishable from empty pages.
    pub fetch_errors: FetchErrorPolicy,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            first_page: 1,
            fetch_errors: FetchErrorPolicy::Surface,
        }
    }
}

/// Marks the load-more control busy for as long as it lives.
struct BusyIndicator<'a> {
    grid: &'a GridController,
}

impl<'a> BusyIndicator<'a> {
    fn show(grid: &'a GridController) -> Self {
        lock_surface(&grid.surface).set_load_more_busy(true);
        Self { grid }
    }
}

impl Drop for BusyIndicator<'_> {
    fn drop(&mut self) {
        if !self.grid.is_torn_down() {
            lock_surface(&self.grid.surface).set_load_more_busy(false);
        }
    }
}

/// Owns the grid's cursor and guard and installs cards into the surface.
///
/// Idle/Loading is the state of its [`LoadGuard`]: `load_more` while Loading
/// is dropped, not queued. The initial load holds the same guard, and
/// `load_more` stays inert until the initial load has returned.
pub struct GridController {
    client: CatalogClient,
    surface: SharedSurface,
    cursor: PaginationCursor,
    guard: LoadGuard,
    options: GridOptions,
    gallery: Option<Arc<GalleryController>>,
    tasks: TaskRegistry,
    primed: AtomicBool,
    torn_down: AtomicBool,
}

impl GridController {
    /// What: Create a grid controller bound to a surface.
    ///
    /// Inputs:
    /// - `client`: Catalog client.
    /// - `surface`: Surface whose grid region and load-more control this controller owns.
    /// - `options`: First page and failure policy.
    /// - `tasks`: Registry receiving background tasks spawned by this controller.
    #[must_use]
    pub fn new(
        client: CatalogClient,
        surface: SharedSurface,
        options: GridOptions,
        tasks: TaskRegistry,
    ) -> Self {
        Self {
            client,
            surface,
            cursor: PaginationCursor::new(options.first_page),
            guard: LoadGuard::default(),
            options,
            gallery: None,
            tasks,
            primed: AtomicBool::new(false),
            torn_down: AtomicBool::new(false),
        }
    }

    /// Gallery populated in the background after the initial load.
    #[must_use]
    pub fn with_gallery(mut self, gallery: Arc<GalleryController>) -> Self {
        self.gallery = Some(gallery);
        self
    }

    /// Page most recently requested.
    #[must_use]
    pub fn cursor(&self) -> u32 {
        self.cursor.current()
    }

    /// Whether a load-more request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.guard.is_loading()
    }

    /// Whether the initial load has returned, so load more may run.
    #[must_use]
    pub fn is_primed(&self) -> bool {
        self.primed.load(Ordering::Acquire)
    }

    /// Whether [`Self::teardown`] was called.
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::Acquire)
    }

    /// The gallery this grid triggers, if any.
    #[must_use]
    pub const fn gallery(&self) -> Option<&Arc<GalleryController>> {
        self.gallery.as_ref()
    }

    async fn fetch_cards(&self, page: u32) -> Result<Vec<RenderedCard>, FetchError> {
        let records = self
            .client
            .fetch_with_policy(ListKind::TopAnime, page, self.options.fetch_errors)
            .await?;
        Ok(records
            .iter()
            .filter_map(CatalogRecord::as_anime)
            .map(render_card)
            .collect())
    }

    /// What: Load the first page into the grid, then start the gallery.
    ///
    /// Output:
    /// - See [`InitialOutcome`].
    ///
    /// Details:
    /// - Shows the loading placeholder first; an empty or failed page shows the
    ///   failure notice instead of cards.
    /// - Holds the load guard and the busy label for the whole fetch, so an
    ///   overlapping `load_more` is `Skipped` instead of racing the first page.
    /// - The gallery population is spawned afterwards in every case and
    ///   registered under [`ControllerId::Gallery`]; nothing waits for it.
    pub async fn initial_load(&self) -> InitialOutcome {
        let outcome = self.load_first_page().await;
        if outcome == InitialOutcome::Skipped {
            debug!("initial load ignored; another one is in flight");
            return outcome;
        }
        self.primed.store(true, Ordering::Release);
        match &outcome {
            InitialOutcome::Loaded(n) => info!(cards = n, "grid initial load complete"),
            InitialOutcome::Empty => warn!("grid initial load returned no records"),
            InitialOutcome::Failed(e) => warn!(error = %e, "grid initial load failed"),
            InitialOutcome::Discarded => debug!("grid initial load discarded"),
            InitialOutcome::Skipped => {}
        }
        self.spawn_gallery();
        outcome
    }

    async fn load_first_page(&self) -> InitialOutcome {
        if self.is_torn_down() {
            return InitialOutcome::Discarded;
        }
        let Some(_permit) = self.guard.try_acquire() else {
            return InitialOutcome::Skipped;
        };
        let mounted = lock_surface(&self.surface)
            .set_grid_notice(Notice::Loading(GRID_LOADING_TEXT.to_string()));
        if !mounted {
            return InitialOutcome::Discarded;
        }
        let _busy = BusyIndicator::show(self);
        let result = self.fetch_cards(self.cursor.current()).await;
        if self.is_torn_down() {
            return InitialOutcome::Discarded;
        }
        let mut surface = lock_surface(&self.surface);
        let outcome = match result {
            Ok(cards) if !cards.is_empty() => {
                let n = cards.len();
                if !surface.replace_grid_cards(cards) {
                    return InitialOutcome::Discarded;
                }
                InitialOutcome::Loaded(n)
            }
            Ok(_) => InitialOutcome::Empty,
            Err(e) => InitialOutcome::Failed(e),
        };
        if !matches!(outcome, InitialOutcome::Loaded(_))
            && !surface.set_grid_notice(Notice::Failed(GRID_FAILED_TEXT.to_string()))
        {
            return InitialOutcome::Discarded;
        }
        outcome
    }

    fn spawn_gallery(&self) {
        if self.is_torn_down() {
            return;
        }
        let Some(gallery) = self.gallery.clone() else {
            return;
        };
        let handle = tokio::spawn(async move {
            let results = gallery.populate_all().await;
            debug!(?results, "gallery population finished");
        });
        self.tasks.register(ControllerId::Gallery, handle);
    }

    /// What: Fetch the next page and append its cards.
    ///
    /// Output:
    /// - `Skipped` when a request is already in flight or the initial load has
    ///   not returned yet (no fetch issued).
    /// - `Appended(n)` on a non-empty page.
    /// - `Exhausted` on an empty page: the load-more control is hidden for good.
    /// - `Failed(e)` on a failed fetch: the cursor is restored and the control
    ///   stays visible, so the next call requests the same page again.
    /// - `Discarded` when the controller was torn down meanwhile.
    ///
    /// Details:
    /// - The guard and the busy label are released on every path, including
    ///   when the future is dropped mid-flight.
    pub async fn load_more(&self) -> LoadOutcome {
        if self.is_torn_down() {
            return LoadOutcome::Discarded;
        }
        if !self.is_primed() {
            debug!("load more ignored; initial load has not finished");
            return LoadOutcome::Skipped;
        }
        let Some(_permit) = self.guard.try_acquire() else {
            debug!("load more ignored; request already in flight");
            return LoadOutcome::Skipped;
        };
        let _busy = BusyIndicator::show(self);
        let (prev, page) = self.cursor.advance();
        debug!(page, "grid load more");
        let result = self.fetch_cards(page).await;
        if self.is_torn_down() {
            return LoadOutcome::Discarded;
        }
        match result {
            Ok(cards) if cards.is_empty() => {
                lock_surface(&self.surface).hide_load_more();
                info!(page, "grid listing exhausted; load more hidden");
                LoadOutcome::Exhausted
            }
            Ok(cards) => {
                let n = cards.len();
                if lock_surface(&self.surface).append_grid_cards(cards) {
                    info!(page, cards = n, "grid page appended");
                    LoadOutcome::Appended(n)
                } else {
                    LoadOutcome::Discarded
                }
            }
            Err(e) => {
                self.cursor.restore(prev);
                warn!(page, error = %e, "grid load more failed; cursor restored");
                LoadOutcome::Failed(e)
            }
        }
    }

    /// What: Stop this controller and its gallery.
    ///
    /// Details:
    /// - Aborts registered tasks; anything already completing is discarded
    ///   without touching the surface.
    pub fn teardown(&self) {
        self.torn_down.store(true, Ordering::Release);
        if let Some(gallery) = &self.gallery {
            gallery.teardown();
        }
        let mut aborted = self.tasks.abort(ControllerId::Grid);
        aborted += self.tasks.abort(ControllerId::Gallery);
        for tab in GalleryTab::ALL {
            aborted += self.tasks.abort(ControllerId::GalleryLane(tab));
        }
        debug!(aborted, "grid controller torn down");
    }
}
