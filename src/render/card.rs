//! Anime card fragments for the main grid.

use std::fmt::Write;

use chrono::{DateTime, Datelike};

use super::escape::escape_html;
use crate::state::AnimeRecord;

/// Characters of synopsis kept in the card excerpt.
pub const SYNOPSIS_EXCERPT_CHARS: usize = 100;
/// Excerpt text when the record has no synopsis.
pub const NO_SYNOPSIS: &str = "No synopsis available.";
/// Marker appended to truncated excerpts.
pub const ELLIPSIS: &str = "...";

/// A display fragment derived 1:1 from an [`AnimeRecord`].
///
/// Every field except `visible` is fixed at render time.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedCard {
    /// Card identifier used by detail and trailer actions.
    pub key: String,
    /// Title shown on the card.
    pub title: String,
    /// Primary title as listed by the catalog.
    pub primary_title: String,
    /// Synopsis excerpt (or the fallback text).
    pub synopsis_excerpt: String,
    /// Full synopsis for detail views.
    pub synopsis: Option<String>,
    /// Score or `N/A`.
    pub rating_label: String,
    /// `<n> Episodes` or `Ongoing`.
    pub episode_label: String,
    /// Release year or `Unknown`.
    pub year_label: String,
    /// First two genres joined by ` • `.
    pub genre_line: String,
    /// Lower-cased, space-joined genre/theme/demographic names; the filter key.
    pub tag_key: String,
    /// Cover image.
    pub image_url: String,
    /// Trailer page, when the catalog lists one.
    pub trailer_url: Option<String>,
    /// HTML fragment for the card.
    pub markup: String,
    /// Visibility flag toggled by the filter engine.
    pub visible: bool,
}

/// Localized title when present, otherwise the primary title.
#[must_use]
pub fn display_title(record: &AnimeRecord) -> &str {
    record
        .title_english
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(&record.title)
}

/// What: Cut a synopsis down to the card excerpt.
///
/// Inputs:
/// - `synopsis`: Full synopsis, if any.
///
/// Output:
/// - First [`SYNOPSIS_EXCERPT_CHARS`] characters plus [`ELLIPSIS`] when longer;
///   the full text when it fits; [`NO_SYNOPSIS`] when absent.
///
/// Details:
/// - Counts Unicode scalar values so multi-byte text is never split mid-character.
#[must_use]
pub fn synopsis_excerpt(synopsis: Option<&str>) -> String {
    let Some(text) = synopsis else {
        return NO_SYNOPSIS.to_string();
    };
    match text.char_indices().nth(SYNOPSIS_EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.to_string(),
    }
}

/// What: Resolve the year label.
///
/// Output:
/// - Explicit year, else the year of the aired-from timestamp, else the
///   catalog's broken-out aired year, else `Unknown`.
#[must_use]
pub fn year_label(record: &AnimeRecord) -> String {
    record
        .year
        .or_else(|| {
            record
                .aired_from
                .as_deref()
                .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
                .map(|dt| dt.year())
        })
        .or(record.aired_from_year)
        .map_or_else(|| "Unknown".to_string(), |y| y.to_string())
}

/// `<n> Episodes`, or `Ongoing` when the count is absent or zero.
#[must_use]
pub fn episode_label(episodes: Option<u32>) -> String {
    match episodes {
        Some(n) if n > 0 => format!("{n} Episodes"),
        _ => "Ongoing".to_string(),
    }
}

/// Score as listed, or `N/A` when absent or zero.
#[must_use]
pub fn rating_label(score: Option<f64>) -> String {
    match score {
        Some(s) if s > 0.0 => s.to_string(),
        _ => "N/A".to_string(),
    }
}

/// Lower-cased, space-joined union of genres, themes and demographics.
#[must_use]
pub fn tag_key(record: &AnimeRecord) -> String {
    record
        .genres
        .iter()
        .chain(&record.themes)
        .chain(&record.demographics)
        .map(|t| t.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

fn card_markup(card: &RenderedCard) -> String {
    let key = escape_html(&card.key);
    let title = escape_html(&card.title);
    let mut out = String::with_capacity(1024);
    let _ = write!(
        out,
        r#"<div class="anime-card" data-anime="{key}" data-category="{tags}">
    <div class="anime-card-image">
        <img src="{img}" alt="{title}" loading="lazy" />
        <div class="anime-card-overlay">
            <div class="anime-card-info">
                <h3>{title}</h3>
                <p>{genres}</p>
                <div class="anime-rating"><i class="ri-star-fill"></i><span>{rating}</span></div>
            </div>
            <div class="anime-card-actions">
                <button class="card-btn" data-action="detail" data-anime="{key}" title="Watch on HiAnime"><i class="ri-play-circle-line"></i></button>
"#,
        tags = escape_html(&card.tag_key),
        img = escape_html(&card.image_url),
        genres = escape_html(&card.genre_line),
        rating = escape_html(&card.rating_label),
    );
    if let Some(url) = &card.trailer_url {
        let _ = writeln!(
            out,
            r#"                <button class="card-btn" data-action="trailer" data-anime="{key}" data-trailer="{url}" title="Watch Trailer"><i class="ri-play-circle-line"></i></button>"#,
            url = escape_html(url),
        );
    }
    let _ = write!(
        out,
        r#"                <button class="card-btn" data-action="favorite" title="Add to Favorites"><i class="ri-heart-line"></i></button>
                <button class="card-btn" data-action="share" title="Share"><i class="ri-share-line"></i></button>
            </div>
        </div>
    </div>
    <div class="anime-card-content">
        <h3 class="anime-card-title">{title}</h3>
        <p class="anime-card-synopsis">{synopsis}</p>
        <div class="anime-card-meta">
            <span class="anime-episodes">{episodes}</span>
            <span class="anime-year">{year}</span>
        </div>
    </div>
</div>
"#,
        synopsis = escape_html(&card.synopsis_excerpt),
        episodes = escape_html(&card.episode_label),
        year = escape_html(&card.year_label),
    );
    out
}

/// What: Render one anime record into a grid card.
///
/// Inputs:
/// - `record`: Normalized catalog record.
///
/// Output:
/// - A visible [`RenderedCard`] whose markup escapes all remote text.
#[must_use]
pub fn render_card(record: &AnimeRecord) -> RenderedCard {
    let title = display_title(record).to_string();
    let mut card = RenderedCard {
        key: title.clone(),
        title,
        primary_title: record.title.clone(),
        synopsis_excerpt: synopsis_excerpt(record.synopsis.as_deref()),
        synopsis: record.synopsis.clone(),
        rating_label: rating_label(record.score),
        episode_label: episode_label(record.episodes),
        year_label: year_label(record),
        genre_line: record
            .genres
            .iter()
            .take(2)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" • "),
        tag_key: tag_key(record),
        image_url: record.image_url.clone(),
        trailer_url: record.trailer_url.clone(),
        markup: String::new(),
        visible: true,
    };
    card.markup = card_markup(&card);
    card
}
