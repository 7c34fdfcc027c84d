//! Command-line argument definition and processing.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Settings;
use crate::logic::FilterMode;

/// AnimeVerse - browse top anime and characters from the Jikan catalog in your terminal
#[derive(Parser, Debug, Default)]
#[command(name = "animeverse")]
#[command(version)]
#[command(about = "Browse top anime and characters from the Jikan catalog in your terminal", long_about = None)]
pub struct Args {
    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Load the page and write it as a standalone HTML document to PATH
    #[arg(long, value_name = "PATH")]
    pub export_html: Option<PathBuf>,

    /// Print the titles of loaded anime matching QUERY and exit
    #[arg(short, long, value_name = "QUERY")]
    pub search: Option<String>,

    /// Tag filter applied before searching or exporting (e.g. action)
    #[arg(short, long, value_name = "TAG")]
    pub filter: Option<String>,

    /// Number of grid pages to load in CLI modes
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=25))]
    pub pages: u32,

    /// Override the catalog API root
    #[arg(long, value_name = "URL")]
    pub api_base_url: Option<String>,

    /// Tag filter and search composition
    #[arg(long, value_name = "MODE", value_parser = parse_filter_mode)]
    pub filter_mode: Option<FilterMode>,

    /// Do not mount or populate the gallery
    #[arg(long)]
    pub no_gallery: bool,
}

/// What: clap value parser for `--filter-mode`.
///
/// # Errors
/// - When the value is neither `independent` nor `composed` (or an alias).
pub fn parse_filter_mode(value: &str) -> Result<FilterMode, String> {
    FilterMode::from_config_key(value)
        .ok_or_else(|| format!("unknown filter mode '{value}' (expected independent or composed)"))
}

/// What the binary does after parsing arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunMode {
    /// Interactive terminal UI.
    Tui,
    /// Write the loaded page as HTML.
    ExportHtml(PathBuf),
    /// Print matching titles.
    Search(String),
    /// Print titles matching the tag filter.
    FilterOnly(String),
}

impl Args {
    /// What: Pick the run mode from the flags.
    ///
    /// Details:
    /// - `--export-html` wins over `--search`, which wins over a lone `--filter`.
    #[must_use]
    pub fn run_mode(&self) -> RunMode {
        if let Some(path) = &self.export_html {
            RunMode::ExportHtml(path.clone())
        } else if let Some(q) = &self.search {
            RunMode::Search(q.clone())
        } else if let Some(f) = &self.filter {
            RunMode::FilterOnly(f.clone())
        } else {
            RunMode::Tui
        }
    }

    /// Apply CLI overrides on top of file settings.
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(url) = self.api_base_url.as_deref().map(str::trim)
            && !url.is_empty()
        {
            settings.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(mode) = self.filter_mode {
            settings.filter_mode = mode;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Mode precedence and overrides from a parsed command line
    fn parse_modes_and_overrides() {
        let args = Args::try_parse_from([
            "animeverse",
            "--search",
            "titan",
            "--filter",
            "action",
            "--filter-mode",
            "composed",
            "--api-base-url",
            "http://localhost:8080/v4/",
        ])
        .expect("valid args");
        assert_eq!(args.run_mode(), RunMode::Search("titan".into()));
        let mut settings = Settings::default();
        args.apply_overrides(&mut settings);
        assert_eq!(settings.filter_mode, FilterMode::Composed);
        assert_eq!(settings.api_base_url, "http://localhost:8080/v4");

        let args = Args::try_parse_from(["animeverse"]).expect("valid args");
        assert_eq!(args.run_mode(), RunMode::Tui);
        assert_eq!(args.pages, 1);
    }

    #[test]
    fn rejects_unknown_filter_mode_and_zero_pages() {
        assert!(Args::try_parse_from(["animeverse", "--filter-mode", "xor"]).is_err());
        assert!(Args::try_parse_from(["animeverse", "--pages", "0"]).is_err());
    }
}
