//! Fragment renderers: grid cards, gallery tiles and the exported page.

mod card;
mod escape;
mod gallery;
mod page;

pub use card::{
    ELLIPSIS, NO_SYNOPSIS, RenderedCard, SYNOPSIS_EXCERPT_CHARS, display_title, episode_label,
    rating_label, render_card, synopsis_excerpt, tag_key, year_label,
};
pub use escape::escape_html;
pub use gallery::{GalleryItem, render_gallery_item};
pub use page::render_document;
