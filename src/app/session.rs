//! Wiring of catalog client, surface and controllers for one page session.

use std::sync::Arc;

use tracing::info;

use crate::config::Settings;
use crate::logic::{
    GalleryController, GalleryOptions, GridController, GridOptions, InitialOutcome, LoadOutcome,
    TaskRegistry,
};
use crate::sources::{CatalogClient, CatalogTransport, HttpTransport, build_http_client};
use crate::state::{ControllerId, SharedSurface, Surface, lock_surface};

/// One mounted page: its surface, the grid and (optionally) the gallery.
///
/// Cheap to clone; clones drive the same controllers.
#[derive(Clone)]
pub struct Session {
    /// Page the controllers install into.
    pub surface: SharedSurface,
    /// The anime grid.
    pub grid: Arc<GridController>,
    /// The gallery, absent when disabled.
    pub gallery: Option<Arc<GalleryController>>,
    /// Background tasks of every controller.
    pub tasks: TaskRegistry,
    /// HTTP client for image downloads; shares the catalog transport's pool when built from settings.
    pub http: reqwest::Client,
}

impl Session {
    /// What: Build a session talking HTTP to the configured API.
    ///
    /// Inputs:
    /// - `settings`: Base URL, paging and failure policy.
    /// - `with_gallery`: Whether the gallery regions are mounted and populated.
    #[must_use]
    pub fn from_settings(settings: &Settings, with_gallery: bool) -> Self {
        let http = build_http_client();
        let transport = HttpTransport::new(&settings.api_base_url, http.clone());
        Self::assemble(Arc::new(transport), http, settings, with_gallery)
    }

    /// What: Build a session over an arbitrary transport.
    ///
    /// Details:
    /// - Without the gallery its four regions are unmounted, so nothing is
    ///   fetched for them.
    #[must_use]
    pub fn with_transport(
        transport: Arc<dyn CatalogTransport>,
        settings: &Settings,
        with_gallery: bool,
    ) -> Self {
        Self::assemble(transport, build_http_client(), settings, with_gallery)
    }

    /// Wire controllers over `transport`, keeping `http` for downloads.
    fn assemble(
        transport: Arc<dyn CatalogTransport>,
        http: reqwest::Client,
        settings: &Settings,
        with_gallery: bool,
    ) -> Self {
        let client = CatalogClient::new(transport);
        let mut page = Surface::new();
        if !with_gallery {
            for tab in crate::state::GalleryTab::ALL {
                page.unmount_gallery(tab);
            }
        }
        let surface = page.shared();
        let tasks = TaskRegistry::default();
        let gallery = with_gallery.then(|| {
            Arc::new(GalleryController::new(
                client.clone(),
                surface.clone(),
                GalleryOptions {
                    items_per_tab: settings.gallery_items_per_tab,
                    fetch_errors: settings.fetch_errors,
                },
            ))
        });
        let mut grid = GridController::new(
            client,
            surface.clone(),
            GridOptions {
                first_page: settings.grid_first_page,
                fetch_errors: settings.fetch_errors,
            },
            tasks.clone(),
        );
        if let Some(g) = &gallery {
            grid = grid.with_gallery(Arc::clone(g));
        }
        Self {
            surface,
            grid: Arc::new(grid),
            gallery,
            tasks,
            http,
        }
    }

    /// What: Initial load followed by up to `extra_pages` load-more requests.
    ///
    /// Output:
    /// - Outcome of the initial load and of each load-more, in order.
    ///
    /// Details:
    /// - Stops early once a load-more does not append.
    pub async fn load_pages(&self, extra_pages: u32) -> (InitialOutcome, Vec<LoadOutcome>) {
        let first = self.grid.initial_load().await;
        let mut more = Vec::new();
        if matches!(first, InitialOutcome::Loaded(_)) {
            for _ in 0..extra_pages {
                let outcome = self.grid.load_more().await;
                let appended = matches!(outcome, LoadOutcome::Appended(_));
                more.push(outcome);
                if !appended {
                    break;
                }
            }
        }
        (first, more)
    }

    /// Wait until the background gallery population has finished.
    pub async fn wait_for_gallery(&self) {
        self.tasks.join(ControllerId::Gallery).await;
    }

    /// Tear down every controller and unmount the page.
    pub fn shutdown(&self) {
        self.grid.teardown();
        self.tasks.abort_all();
        lock_surface(&self.surface).unmount_all();
        info!("session shut down");
    }
}
