//! Gallery item fragments.

use super::escape::escape_html;
use crate::state::{CatalogRecord, GalleryTab};

/// One image tile of a gallery tab.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GalleryItem {
    /// Image shown in the tile and the image modal.
    pub image_url: String,
    /// Anime title or character name.
    pub title: String,
    /// Caption fixed per tab.
    pub subtitle: String,
    /// Category attribute fixed per tab.
    pub category: String,
    /// HTML fragment for the tile.
    pub markup: String,
    /// Visibility flag.
    pub visible: bool,
}

/// What: Render a catalog record as a tile of `tab`.
///
/// Inputs:
/// - `record`: Anime or character record.
/// - `tab`: Tab that supplies subtitle and category.
///
/// Output:
/// - A visible [`GalleryItem`] with escaped markup; the download action carries
///   the image URL and title as data attributes.
#[must_use]
pub fn render_gallery_item(record: &CatalogRecord, tab: GalleryTab) -> GalleryItem {
    let image_url = record.image_url().to_string();
    let title = record.title().to_string();
    let img = escape_html(&image_url);
    let t = escape_html(&title);
    let subtitle = tab.subtitle();
    let category = tab.category();
    let markup = format!(
        r#"<div class="gallery-item" data-category="{category}">
    <img src="{img}" alt="{t}" loading="lazy" />
    <div class="gallery-overlay">
        <div class="gallery-info">
            <h4>{t}</h4>
            <p>{subtitle}</p>
        </div>
        <div class="gallery-actions">
            <button class="gallery-btn" data-action="view"><i class="ri-eye-line"></i></button>
            <button class="gallery-btn" data-action="download" data-src="{img}" data-title="{t}"><i class="ri-download-line"></i></button>
            <button class="gallery-btn" data-action="favorite"><i class="ri-heart-line"></i></button>
        </div>
    </div>
</div>
"#
    );
    GalleryItem {
        image_url,
        title,
        subtitle: subtitle.to_string(),
        category: category.to_string(),
        markup,
        visible: true,
    }
}
