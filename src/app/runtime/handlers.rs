use std::path::PathBuf;

use tokio::sync::mpsc;

use crate::app::Session;
use crate::events::Command;
use crate::logic::{InitialOutcome, LoadOutcome};
use crate::sources::{FetchError, download_image};
use crate::state::{AppState, ControllerId, GalleryTab, Modal};

/// Result delivered from a background task to the main loop.
#[derive(Debug)]
pub enum Notification {
    /// The grid's initial load finished.
    InitialLoad(InitialOutcome),
    /// A grid load-more finished.
    GridLoad(LoadOutcome),
    /// A gallery lane load-more finished.
    LaneLoad(GalleryTab, LoadOutcome),
    /// An image download finished.
    Download(Result<PathBuf, String>),
}

/// What: Start the initial load in the background.
///
/// Details:
/// - Registered under [`ControllerId::Grid`] so teardown aborts it.
pub fn spawn_initial_load(session: &Session, tx: &mpsc::UnboundedSender<Notification>) {
    let grid = session.grid.clone();
    let tx = tx.clone();
    let handle = tokio::spawn(async move {
        let outcome = grid.initial_load().await;
        let _ = tx.send(Notification::InitialLoad(outcome));
    });
    session.tasks.register(ControllerId::Grid, handle);
}

/// What: Execute a command returned by the event layer.
///
/// Output:
/// - `true` when the application should exit.
pub fn dispatch_command(
    cmd: Command,
    app: &mut AppState,
    session: &Session,
    tx: &mpsc::UnboundedSender<Notification>,
) -> bool {
    match cmd {
        Command::Quit => return true,
        Command::LoadMoreGrid => {
            let grid = session.grid.clone();
            let tx = tx.clone();
            let handle = tokio::spawn(async move {
                let outcome = grid.load_more().await;
                let _ = tx.send(Notification::GridLoad(outcome));
            });
            session.tasks.register(ControllerId::Grid, handle);
        }
        Command::LoadMoreLane(tab) => {
            let Some(gallery) = session.gallery.clone() else {
                app.status = Some("Gallery is disabled".to_string());
                return false;
            };
            if session.tasks.pending(ControllerId::GalleryLane(tab)) > 0 {
                app.status = Some(format!("{} is still loading", tab.label()));
                return false;
            }
            let tx = tx.clone();
            let handle = tokio::spawn(async move {
                let outcome = gallery.load_more(tab).await;
                let _ = tx.send(Notification::LaneLoad(tab, outcome));
            });
            session
                .tasks
                .register(ControllerId::GalleryLane(tab), handle);
        }
        Command::SelectTab(tab) => {
            if let Some(gallery) = &session.gallery {
                gallery.select_tab(tab);
            }
        }
        Command::Download { url, title } => {
            let dir = app.downloads_dir.clone();
            let http = session.http.clone();
            let tx = tx.clone();
            app.status = Some(format!("Downloading {title}..."));
            tokio::spawn(async move {
                let result = download_image(&http, &url, &title, &dir)
                    .await
                    .map_err(|e| e.to_string());
                let _ = tx.send(Notification::Download(result));
            });
        }
        Command::OpenUrl(url) => {
            crate::util::open_url(&url);
            app.status = Some("Opened in browser".to_string());
        }
    }
    false
}

/// What: Fold a background result into the front-end state.
///
/// Details:
/// - Appended grid pages re-run the remembered filter so composed mode hides
///   new cards that do not match.
pub fn handle_notification(app: &mut AppState, n: Notification) {
    match n {
        Notification::InitialLoad(outcome) => {
            app.status = match outcome {
                InitialOutcome::Loaded(n) => Some(format!("Loaded {n} anime")),
                InitialOutcome::Empty => Some("The catalog returned no anime".to_string()),
                InitialOutcome::Failed(e) => Some(format!("Load failed: {e}")),
                InitialOutcome::Discarded | InitialOutcome::Skipped => None,
            };
            app.after_grid_change();
        }
        Notification::GridLoad(outcome) => {
            app.status = match outcome {
                LoadOutcome::Appended(n) => {
                    let shown = app.after_grid_change();
                    Some(format!("Added {n} anime ({shown} shown)"))
                }
                LoadOutcome::Exhausted => Some("All anime loaded".to_string()),
                LoadOutcome::Failed(e) => Some(failure_status("Load more failed", &e)),
                LoadOutcome::Skipped | LoadOutcome::Discarded => app.status.take(),
            };
        }
        Notification::LaneLoad(tab, outcome) => {
            app.status = match outcome {
                LoadOutcome::Appended(n) => Some(format!("{}: {n} more", tab.label())),
                LoadOutcome::Exhausted => Some(format!("{}: nothing more", tab.label())),
                LoadOutcome::Failed(e) => Some(failure_status(tab.label(), &e)),
                LoadOutcome::Skipped | LoadOutcome::Discarded => app.status.take(),
            };
        }
        Notification::Download(Ok(path)) => {
            app.status = Some(format!("Saved {}", path.display()));
        }
        Notification::Download(Err(e)) => {
            tracing::warn!(error = %e, "download failed");
            app.modal = Modal::Alert {
                message: format!("Download failed:\n{e}"),
            };
        }
    }
}

/// Status line for a failed page; only transient failures suggest another try.
fn failure_status(prefix: &str, err: &FetchError) -> String {
    if err.is_transient() {
        format!("{prefix}: {err} (press m to retry)")
    } else {
        format!("{prefix}: {err}")
    }
}
