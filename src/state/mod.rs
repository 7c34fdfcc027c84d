//! Application state: catalog value types, the shared surface and UI state.

pub mod app_state;
pub mod modal;
pub mod surface;
pub mod types;

pub use app_state::{AppState, Focus};
pub use modal::{Modal, TrailerPreview};
pub use surface::{
    GRID_FAILED_TEXT, GRID_LOADING_TEXT, GridRegion, LoadMoreControl, Notice, SharedSurface,
    Surface, lock_surface,
};
pub use types::{
    AnimeRecord, CatalogRecord, CharacterRecord, ControllerId, GalleryTab, ListKind,
};
