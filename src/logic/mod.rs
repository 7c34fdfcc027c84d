//! Controllers and the filter engine: everything that mutates the surface.

pub mod filter;
pub mod gallery;
pub mod grid;
pub mod pagination;
pub mod tasks;

pub use filter::{FILTER_ALL, FilterEngine, FilterMode, matches_query, matches_tag};
pub use gallery::{DEFAULT_ITEMS_PER_TAB, GalleryController, GalleryOptions, PAGE_STRIDE};
pub use grid::{GridController, GridOptions, InitialOutcome, LoadOutcome};
pub use pagination::{LoadGuard, LoadPermit, PaginationCursor};
pub use tasks::TaskRegistry;
