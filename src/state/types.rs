//! Core value types shared by the catalog client, renderers and controllers.

use std::fmt;

/// Which remote catalog listing a page request targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// Top anime ordered by popularity.
    TopAnime,
    /// Top characters by favorites.
    TopCharacters,
}

impl ListKind {
    /// What: Build the request path and query for one page of this listing.
    ///
    /// Inputs:
    /// - `page`: 1-based page number.
    ///
    /// Output:
    /// - Path relative to the API base, including the query string.
    #[must_use]
    pub fn path_for_page(self, page: u32) -> String {
        match self {
            Self::TopAnime => format!("/top/anime?page={page}&filter=bypopularity"),
            Self::TopCharacters => format!("/top/characters?page={page}"),
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TopAnime => "top_anime",
            Self::TopCharacters => "top_characters",
        })
    }
}

/// One anime entry as normalized from the catalog.
///
/// Records are immutable once fetched and keyed by their title string.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimeRecord {
    /// Primary (romanized) title; always present.
    pub title: String,
    /// Localized (English) title when the catalog has one.
    pub title_english: Option<String>,
    /// Free-text synopsis.
    pub synopsis: Option<String>,
    /// Average score.
    pub score: Option<f64>,
    /// Episode count; `None` means the series is still airing or unknown.
    pub episodes: Option<u32>,
    /// Explicit release year.
    pub year: Option<i32>,
    /// Raw aired-from timestamp (RFC 3339).
    pub aired_from: Option<String>,
    /// Aired-from year as broken out by the catalog.
    pub aired_from_year: Option<i32>,
    /// Large cover image URL.
    pub image_url: String,
    /// Genre names.
    pub genres: Vec<String>,
    /// Theme names.
    pub themes: Vec<String>,
    /// Demographic names.
    pub demographics: Vec<String>,
    /// Trailer page URL.
    pub trailer_url: Option<String>,
}

/// One character entry as normalized from the catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharacterRecord {
    /// Display name; always present.
    pub name: String,
    /// Name in kanji.
    pub name_kanji: Option<String>,
    /// Portrait image URL.
    pub image_url: String,
    /// Number of users who favorited this character.
    pub favorites: Option<u64>,
}

/// A normalized record of either listing.
#[derive(Clone, Debug, PartialEq)]
pub enum CatalogRecord {
    /// Entry of [`ListKind::TopAnime`].
    Anime(AnimeRecord),
    /// Entry of [`ListKind::TopCharacters`].
    Character(CharacterRecord),
}

impl CatalogRecord {
    /// Primary title for anime, name for characters.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Anime(a) => &a.title,
            Self::Character(c) => &c.name,
        }
    }

    /// Image URL used by the gallery.
    #[must_use]
    pub fn image_url(&self) -> &str {
        match self {
            Self::Anime(a) => &a.image_url,
            Self::Character(c) => &c.image_url,
        }
    }

    /// Borrow the anime payload, if this is an anime record.
    #[must_use]
    pub const fn as_anime(&self) -> Option<&AnimeRecord> {
        match self {
            Self::Anime(a) => Some(a),
            Self::Character(_) => None,
        }
    }
}

/// The four gallery tabs, each backed by its own catalog query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GalleryTab {
    /// Top anime covers, page 1.
    Wallpapers,
    /// Top characters, page 1.
    Artwork,
    /// Top anime covers, page 2.
    Screenshots,
    /// Top characters, page 2.
    FanArt,
}

impl GalleryTab {
    /// All tabs in display order.
    pub const ALL: [Self; 4] = [
        Self::Wallpapers,
        Self::Artwork,
        Self::Screenshots,
        Self::FanArt,
    ];

    /// Catalog listing backing this tab.
    #[must_use]
    pub const fn list_kind(self) -> ListKind {
        match self {
            Self::Wallpapers | Self::Screenshots => ListKind::TopAnime,
            Self::Artwork | Self::FanArt => ListKind::TopCharacters,
        }
    }

    /// Page the tab is populated from at initial load.
    #[must_use]
    pub const fn first_page(self) -> u32 {
        match self {
            Self::Wallpapers | Self::Artwork => 1,
            Self::Screenshots | Self::FanArt => 2,
        }
    }

    /// Caption shown under each item of this tab.
    #[must_use]
    pub const fn subtitle(self) -> &'static str {
        match self {
            Self::Wallpapers => "High Res Wallpaper",
            Self::Artwork => "Character Design",
            Self::Screenshots => "Official Visual",
            Self::FanArt => "Fan Creation",
        }
    }

    /// Category attribute written on each item.
    #[must_use]
    pub const fn category(self) -> &'static str {
        match self {
            Self::Wallpapers => "wallpaper",
            Self::Artwork => "artwork",
            Self::Screenshots => "screenshot",
            Self::FanArt => "fanart",
        }
    }

    /// Key of the content region (`data-content` attribute).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Wallpapers => "wallpapers",
            Self::Artwork => "artwork",
            Self::Screenshots => "screenshots",
            Self::FanArt => "fanart",
        }
    }

    /// Human label for tab headers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Wallpapers => "Wallpapers",
            Self::Artwork => "Artwork",
            Self::Screenshots => "Screenshots",
            Self::FanArt => "Fan Art",
        }
    }

    /// Next tab, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Wallpapers => Self::Artwork,
            Self::Artwork => Self::Screenshots,
            Self::Screenshots => Self::FanArt,
            Self::FanArt => Self::Wallpapers,
        }
    }

    /// Previous tab, wrapping around.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Wallpapers => Self::FanArt,
            Self::Artwork => Self::Wallpapers,
            Self::Screenshots => Self::Artwork,
            Self::FanArt => Self::Screenshots,
        }
    }
}

/// Identity of a controller, used to key its background tasks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControllerId {
    /// The main anime grid.
    Grid,
    /// The gallery as a whole (initial population).
    Gallery,
    /// One gallery lane.
    GalleryLane(GalleryTab),
}
