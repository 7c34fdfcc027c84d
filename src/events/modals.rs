use crossterm::event::{KeyCode, KeyEvent};

use super::Command;
use crate::state::{AppState, Modal, TrailerPreview};

/// What: Handle a key while a modal is open.
///
/// Output:
/// - `OpenUrl` / `Download` commands for the dialog's actions; `None` otherwise.
///
/// Details:
/// - `Esc`, `Enter` and `q` close every dialog (closing the image dialog
///   never leaves the page).
/// - `t` inside the detail dialog switches to the trailer preview of the same card.
pub(super) fn handle_modal_key(ke: KeyEvent, app: &mut AppState) -> Option<Command> {
    match ke.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
            app.modal = Modal::None;
            None
        }
        KeyCode::Char('o') => {
            let url = app.modal.link().map(str::to_string);
            if url.is_none() {
                app.status = Some("No link available".to_string());
            }
            url.map(Command::OpenUrl)
        }
        KeyCode::Char('d') => match &app.modal {
            Modal::Image { item } => Some(Command::Download {
                url: item.image_url.clone(),
                title: item.title.clone(),
            }),
            _ => None,
        },
        KeyCode::Char('t') => {
            if let Modal::Detail { card } = &app.modal {
                app.modal = Modal::Trailer(TrailerPreview::for_card(card));
            }
            None
        }
        _ => None,
    }
}
