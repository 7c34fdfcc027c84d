use std::env;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "animeverse";
const SETTINGS_FILE: &str = "settings.conf";

/// What: Candidate locations of `settings.conf`, in priority order.
///
/// Inputs:
/// - `home`: Value of `$HOME`, if set.
/// - `xdg_config`: Value of `$XDG_CONFIG_HOME`, if set.
///
/// Output:
/// - `$HOME/.config/animeverse/settings.conf` then
///   `$XDG_CONFIG_HOME/animeverse/settings.conf`.
#[must_use]
pub fn settings_candidates(home: Option<&str>, xdg_config: Option<&str>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(h) = home.filter(|h| !h.trim().is_empty()) {
        candidates.push(Path::new(h).join(".config").join(APP_DIR).join(SETTINGS_FILE));
    }
    if let Some(x) = xdg_config.filter(|x| !x.trim().is_empty()) {
        candidates.push(Path::new(x).join(APP_DIR).join(SETTINGS_FILE));
    }
    candidates
}

/// First existing `settings.conf` found from the environment.
#[must_use]
pub fn resolve_settings_config_path() -> Option<PathBuf> {
    let home = env::var("HOME").ok();
    let xdg = env::var("XDG_CONFIG_HOME").ok();
    settings_candidates(home.as_deref(), xdg.as_deref())
        .into_iter()
        .find(|p| p.is_file())
}

/// Resolve the config directory from explicit `$HOME` / `$XDG_CONFIG_HOME` values.
#[must_use]
pub fn config_dir_from(home: Option<&str>, xdg_config: Option<&str>) -> PathBuf {
    if let Some(h) = home.filter(|h| !h.trim().is_empty()) {
        return Path::new(h).join(".config").join(APP_DIR);
    }
    if let Some(x) = xdg_config.filter(|x| !x.trim().is_empty()) {
        return Path::new(x).join(APP_DIR);
    }
    Path::new(".").join(".config").join(APP_DIR)
}

/// Config directory for AnimeVerse (ensured to exist).
#[must_use]
pub fn config_dir() -> PathBuf {
    let home = env::var("HOME").ok();
    let xdg = env::var("XDG_CONFIG_HOME").ok();
    let dir = config_dir_from(home.as_deref(), xdg.as_deref());
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Logs directory under config: `<config_dir>/logs` (ensured to exist)
#[must_use]
pub fn logs_dir() -> PathBuf {
    let dir = config_dir().join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Default download target: `$HOME/Downloads/animeverse`, or `<config_dir>/downloads`.
#[must_use]
pub fn default_downloads_dir() -> PathBuf {
    env::var("HOME")
        .ok()
        .filter(|h| !h.trim().is_empty())
        .map_or_else(
            || config_dir().join("downloads"),
            |h| Path::new(&h).join("Downloads").join(APP_DIR),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: HOME wins over XDG_CONFIG_HOME, both are listed when set
    fn candidates_in_priority_order() {
        let c = settings_candidates(Some("/home/a"), Some("/xdg"));
        assert_eq!(
            c,
            [
                PathBuf::from("/home/a/.config/animeverse/settings.conf"),
                PathBuf::from("/xdg/animeverse/settings.conf"),
            ]
        );
        assert_eq!(settings_candidates(None, Some("")), Vec::<PathBuf>::new());
    }

    #[test]
    fn config_dir_fallbacks() {
        assert_eq!(
            config_dir_from(Some("/home/a"), Some("/xdg")),
            PathBuf::from("/home/a/.config/animeverse")
        );
        assert_eq!(
            config_dir_from(None, Some("/xdg")),
            PathBuf::from("/xdg/animeverse")
        );
    }
}
