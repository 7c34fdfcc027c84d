use std::fs;
use std::path::{Path, PathBuf};

use super::paths::{config_dir, default_downloads_dir, resolve_settings_config_path};
use crate::logic::{DEFAULT_ITEMS_PER_TAB, FILTER_ALL, FilterMode};
use crate::sources::{DEFAULT_API_BASE, FetchErrorPolicy};
use crate::util::config::{
    parse_key_value, parse_list, skip_comment_or_empty, strip_inline_comment,
};

/// Filter values offered when `filters` is not configured.
pub const DEFAULT_FILTERS: [&str; 8] = [
    "all",
    "action",
    "adventure",
    "comedy",
    "drama",
    "fantasy",
    "romance",
    "shounen",
];

/// Commented settings file written on first run.
pub const SKELETON_SETTINGS_CONTENT: &str = r"# AnimeVerse settings
# Lines are `key = value`; `#`, `//` and `;` start comments.

# Catalog API root.
api_base_url = https://api.jikan.moe/v4

# independent: tag filter and search each replace the other's result.
# composed: a card is shown only when it matches both.
filter_mode = independent

# surface: failed fetches are reported and the load-more button stays.
# swallow: a failed fetch counts as an empty page.
fetch_errors = surface

gallery_items_per_tab = 10
grid_first_page = 1

# Comma-separated tag filters; `all` is always offered first.
filters = all, action, adventure, comedy, drama, fantasy, romance, shounen

# Where downloaded gallery images go (defaults to ~/Downloads/animeverse).
# downloads_dir = /path/to/dir
";

/// User settings with their defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Catalog API root.
    pub api_base_url: String,
    /// Tag filter / search composition.
    pub filter_mode: FilterMode,
    /// Failure policy of grid and gallery fetches.
    pub fetch_errors: FetchErrorPolicy,
    /// Items kept per gallery tab from each page.
    pub gallery_items_per_tab: usize,
    /// Page requested by the grid's initial load.
    pub grid_first_page: u32,
    /// Filter values, `all` first.
    pub filters: Vec<String>,
    /// Download target; `None` means [`default_downloads_dir`].
    pub downloads_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_string(),
            filter_mode: FilterMode::default(),
            fetch_errors: FetchErrorPolicy::default(),
            gallery_items_per_tab: DEFAULT_ITEMS_PER_TAB,
            grid_first_page: 1,
            filters: DEFAULT_FILTERS.iter().map(ToString::to_string).collect(),
            downloads_dir: None,
        }
    }
}

impl Settings {
    /// Effective download directory.
    #[must_use]
    pub fn downloads_dir(&self) -> PathBuf {
        self.downloads_dir
            .clone()
            .unwrap_or_else(default_downloads_dir)
    }
}

/// What: Parse settings text on top of the defaults.
///
/// Inputs:
/// - `content`: Contents of `settings.conf`.
///
/// Output:
/// - Parsed [`Settings`]; unknown keys and unparsable values keep the default.
///
/// Details:
/// - Inline `#` / `//` comments are stripped from values.
/// - `filters` always starts with `all`, with duplicates removed.
#[must_use]
pub fn parse_settings(content: &str) -> Settings {
    let mut out = Settings::default();
    for line in content.lines() {
        if skip_comment_or_empty(line) {
            continue;
        }
        let Some((key, raw)) = parse_key_value(line) else {
            continue;
        };
        let val = strip_inline_comment(&raw);
        match key.as_str() {
            "api_base_url" => {
                if !val.is_empty() {
                    out.api_base_url = val.trim_end_matches('/').to_string();
                }
            }
            "filter_mode" => {
                if let Some(m) = FilterMode::from_config_key(val) {
                    out.filter_mode = m;
                }
            }
            "fetch_errors" => {
                if let Some(p) = FetchErrorPolicy::from_config_key(val) {
                    out.fetch_errors = p;
                }
            }
            "gallery_items_per_tab" => {
                if let Ok(n) = val.parse::<usize>()
                    && n > 0
                {
                    out.gallery_items_per_tab = n;
                }
            }
            "grid_first_page" => {
                if let Ok(n) = val.parse::<u32>()
                    && n > 0
                {
                    out.grid_first_page = n;
                }
            }
            "filters" => {
                let mut filters = vec![FILTER_ALL.to_string()];
                for f in parse_list(val) {
                    if !filters.contains(&f) {
                        filters.push(f);
                    }
                }
                out.filters = filters;
            }
            "downloads_dir" => {
                if !val.is_empty() {
                    out.downloads_dir = Some(PathBuf::from(val));
                }
            }
            other => tracing::debug!(key = other, "ignoring unknown settings key"),
        }
    }
    out
}

/// What: Read settings from `path`, writing the skeleton there first if it is missing.
///
/// Output:
/// - Parsed settings; defaults when the file cannot be read.
pub fn load_settings_from(path: &Path) -> Settings {
    if !path.is_file() {
        if let Some(dir) = path.parent() {
            let _ = fs::create_dir_all(dir);
        }
        match fs::write(path, SKELETON_SETTINGS_CONTENT) {
            Ok(()) => tracing::info!(path = %path.display(), "wrote default settings"),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "cannot write default settings"),
        }
    }
    match fs::read_to_string(path) {
        Ok(content) => parse_settings(&content),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read settings; using defaults");
            Settings::default()
        }
    }
}

/// Load user settings from the resolved `settings.conf`, creating it on first run.
#[must_use]
pub fn settings() -> Settings {
    let path =
        resolve_settings_config_path().unwrap_or_else(|| config_dir().join("settings.conf"));
    load_settings_from(&path)
}
