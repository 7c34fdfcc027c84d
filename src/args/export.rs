//! `--export-html`: load the page and write it as one HTML document.

use std::path::{Path, PathBuf};

use crate::app::Session;
use crate::logic::{FilterEngine, FilterMode};
use crate::render::render_document;
use crate::state::lock_surface;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Load the page like a browser would and write the resulting document.
///
/// Inputs:
/// - `session`: Session to load into.
/// - `filters`: Filter bar values, `all` first.
/// - `tag`: Optional tag filter applied before export (hidden cards keep the `hidden` attribute).
/// - `pages`: Total grid pages to load.
/// - `path`: Output file.
///
/// Output:
/// - Path written.
///
/// # Errors
/// - When the file cannot be written.
///
/// Details:
/// - Waits for the gallery population before rendering, so exported tabs are filled.
pub async fn handle_export(
    session: &Session,
    filters: &[String],
    tag: Option<&str>,
    pages: u32,
    path: &Path,
) -> Result<PathBuf> {
    tracing::info!(path = %path.display(), pages, "export requested from CLI");
    let (initial, more) = session.load_pages(pages.saturating_sub(1)).await;
    session.wait_for_gallery().await;
    tracing::info!(?initial, extra = more.len(), "page loaded for export");
    let html = {
        let mut surface = lock_surface(&session.surface);
        if let Some(t) = tag
            && let Some(cards) = surface.grid_cards_mut()
        {
            FilterEngine::new(FilterMode::Independent).apply_tag(cards, t);
        }
        render_document(&surface, filters)
    };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, html)?;
    tracing::info!(path = %path.display(), "html exported");
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::test_utils::{ScriptedTransport, anime_page};

    #[tokio::test]
    /// What: Exported document carries the grid cards and the gallery markup
    async fn export_writes_document() {
        let transport = ScriptedTransport::new();
        transport.push_ok(anime_page("Show", 2));
        let session = Session::with_transport(transport, &Settings::default(), true);
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("out").join("page.html");
        let written = handle_export(&session, &Settings::default().filters, None, 1, &out)
            .await
            .expect("export succeeds");
        assert_eq!(written, out);
        let html = std::fs::read_to_string(&out).expect("read back");
        assert!(html.contains("id=\"animeGrid\""));
        assert!(html.contains("data-anime=\"Show 0\""));
        assert!(html.contains("data-content=\"wallpapers\""));
    }
}
