use std::sync::atomic::Ordering;
use std::time::Duration;

use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::select;

use super::Session;
use super::terminal::{restore_terminal, setup_terminal};
use crate::config::Settings;
use crate::state::AppState;
use crate::ui::ui;

mod background;
mod handlers;

use background::{Channels, spawn_event_thread};
use handlers::{dispatch_command, handle_notification, spawn_initial_load};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Redraw interval while nothing else happens (spinner, gallery filling in).
const TICK: Duration = Duration::from_millis(250);

/// What: Run the terminal UI end-to-end.
///
/// Inputs:
/// - `settings`: Effective settings (file plus CLI overrides).
/// - `with_gallery`: Whether to mount and populate the gallery.
///
/// Output:
/// - `Ok(())` when the UI exits cleanly; `Err` on terminal errors.
///
/// Details:
/// - The initial load runs in the background; the grid shows its placeholder
///   until the result arrives.
/// - On exit the session is torn down (pending loads aborted, late results
///   discarded) and the terminal is restored even if drawing failed.
pub async fn run(settings: Settings, with_gallery: bool) -> Result<()> {
    let session = Session::from_settings(&settings, with_gallery);
    let mut app = AppState::new(
        session.surface.clone(),
        settings.filters.clone(),
        settings.filter_mode,
        settings.downloads_dir(),
    );

    setup_terminal()?;
    let result = event_loop(&mut app, &session).await;
    session.shutdown();
    let restored = restore_terminal();
    result?;
    restored
}

async fn event_loop(app: &mut AppState, session: &Session) -> Result<()> {
    let mut terminal = Terminal::new(CrosstermBackend::new(std::io::stdout()))?;
    let mut channels = Channels::new();
    spawn_event_thread(
        channels.event_tx.clone(),
        channels.event_thread_cancelled.clone(),
    );
    spawn_initial_load(session, &channels.notify_tx);
    let mut tick = tokio::time::interval(TICK);

    loop {
        terminal.draw(|f| ui(f, app))?;

        select! {
            Some(ev) = channels.event_rx.recv() => {
                if let Some(cmd) = crate::events::handle_event(&ev, app)
                    && dispatch_command(cmd, app, session, &channels.notify_tx)
                {
                    break;
                }
            }
            Some(n) = channels.notify_rx.recv() => {
                handle_notification(app, n);
            }
            _ = tick.tick() => {}
        }
    }

    channels
        .event_thread_cancelled
        .store(true, Ordering::Relaxed);
    tracing::info!("event loop exited");
    Ok(())
}
