//! Standalone HTML document for a surface snapshot.

use std::fmt::Write;

use super::escape::escape_html;
use crate::state::{GalleryTab, Surface};

/// What: Render the grid, filter bar, load-more control and gallery regions as one page.
///
/// Inputs:
/// - `surface`: Snapshot to export.
/// - `filters`: Filter button values, `all` first.
///
/// Output:
/// - A complete HTML document. Hidden cards carry the `hidden` attribute; a
///   notice replaces the cards when one is set.
#[must_use]
pub fn render_document(surface: &Surface, filters: &[String]) -> String {
    let mut out = String::with_capacity(16 * 1024);
    out.push_str(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\" />\n<title>AnimeVerse</title>\n</head>\n<body>\n",
    );

    out.push_str("<section id=\"anime\">\n<div class=\"anime-filters\">\n");
    for (i, f) in filters.iter().enumerate() {
        let active = if i == 0 { " active" } else { "" };
        let f = escape_html(f);
        let _ = writeln!(
            out,
            r#"<button class="filter-btn{active}" data-filter="{f}">{f}</button>"#
        );
    }
    out.push_str("<input type=\"text\" id=\"animeSearch\" placeholder=\"Search anime...\" />\n</div>\n");

    out.push_str("<div class=\"anime-grid\" id=\"animeGrid\">\n");
    if let Some(grid) = surface.grid() {
        if let Some(notice) = &grid.notice {
            let _ = writeln!(
                out,
                r#"<div class="status-message">{}</div>"#,
                escape_html(notice.text())
            );
        } else {
            for card in &grid.cards {
                if card.visible {
                    out.push_str(&card.markup);
                } else {
                    let _ = writeln!(out, "<div hidden>\n{}</div>", card.markup);
                }
            }
        }
    }
    out.push_str("</div>\n");
    if let Some(ctrl) = surface.load_more()
        && !ctrl.is_hidden()
    {
        let _ = writeln!(
            out,
            r#"<button class="btn btn-outline" id="loadMoreBtn"><span>{}</span></button>"#,
            ctrl.label()
        );
    }
    out.push_str("</section>\n");

    out.push_str("<section id=\"gallery\">\n<div class=\"gallery-tabs\">\n");
    for (i, tab) in GalleryTab::ALL.into_iter().enumerate() {
        let active = if i == 0 { " active" } else { "" };
        let _ = writeln!(
            out,
            r#"<button class="gallery-tab{active}" data-tab="{}">{}</button>"#,
            tab.key(),
            tab.label()
        );
    }
    out.push_str("</div>\n");
    for (i, tab) in GalleryTab::ALL.into_iter().enumerate() {
        let Some(items) = surface.gallery_items(tab) else {
            continue;
        };
        let active = if i == 0 { " active" } else { "" };
        let _ = writeln!(
            out,
            r#"<div class="gallery-content{active}" data-content="{}">"#,
            tab.key()
        );
        out.push_str("<div class=\"gallery-masonry\">\n");
        for item in items.iter().filter(|it| it.visible) {
            out.push_str(&item.markup);
        }
        out.push_str("</div>\n</div>\n");
    }
    out.push_str("</section>\n</body>\n</html>\n");
    out
}
