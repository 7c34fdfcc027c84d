use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::event::Event as CEvent;
use tokio::sync::mpsc;

use super::handlers::Notification;

/// Channels between the event thread, background tasks and the main loop.
pub struct Channels {
    /// Terminal events from the reader thread.
    pub event_tx: mpsc::UnboundedSender<CEvent>,
    /// Receiving end of `event_tx`.
    pub event_rx: mpsc::UnboundedReceiver<CEvent>,
    /// Controller and download results.
    pub notify_tx: mpsc::UnboundedSender<Notification>,
    /// Receiving end of `notify_tx`.
    pub notify_rx: mpsc::UnboundedReceiver<Notification>,
    /// Set on exit so the reader thread stops.
    pub event_thread_cancelled: Arc<AtomicBool>,
}

impl Default for Channels {
    fn default() -> Self {
        Self::new()
    }
}

impl Channels {
    /// Fresh, unconnected channels.
    pub fn new() -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (notify_tx, notify_rx) = mpsc::unbounded_channel();
        Self {
            event_tx,
            event_rx,
            notify_tx,
            notify_rx,
            event_thread_cancelled: Arc::new(AtomicBool::new(false)),
        }
    }
}

/// What: Read terminal events on a dedicated thread and forward them.
///
/// Details:
/// - Polls with a 50ms timeout so the cancellation flag is checked promptly.
/// - Exits when cancelled or when the receiver is gone.
pub fn spawn_event_thread(
    event_tx: mpsc::UnboundedSender<CEvent>,
    cancelled: Arc<AtomicBool>,
) {
    std::thread::spawn(move || {
        while !cancelled.load(Ordering::Relaxed) {
            match crossterm::event::poll(Duration::from_millis(50)) {
                Ok(true) => match crossterm::event::read() {
                    Ok(ev) => {
                        if cancelled.load(Ordering::Relaxed) || event_tx.send(ev).is_err() {
                            break;
                        }
                    }
                    Err(e) => tracing::debug!(error = %e, "terminal read failed"),
                },
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "terminal poll failed; stopping event thread");
                    break;
                }
            }
        }
        tracing::debug!("event thread exited");
    });
}
