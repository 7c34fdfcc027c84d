//! Key handling for the terminal front end.
//!
//! Handlers only mutate [`AppState`]; anything that needs the network or the
//! controllers is returned as a [`Command`] for the runtime to execute.

use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::state::{AppState, Focus, GalleryTab, Modal, lock_surface};

mod modals;
mod search;

/// Side effect requested by a key press.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Leave the application.
    Quit,
    /// Load the next grid page.
    LoadMoreGrid,
    /// Load the next page of one gallery lane.
    LoadMoreLane(GalleryTab),
    /// Tell the gallery which tab is shown.
    SelectTab(GalleryTab),
    /// Save an image to the downloads directory.
    Download {
        /// Image URL.
        url: String,
        /// Title used for the file name.
        title: String,
    },
    /// Open a URL in the browser.
    OpenUrl(String),
}

/// What: Dispatch a single terminal event.
///
/// Inputs:
/// - `ev`: Event read from the terminal.
/// - `app`: State to mutate.
///
/// Output:
/// - A [`Command`] when the key needs the runtime; `None` otherwise.
///
/// Details:
/// - Only key presses are handled; `Ctrl+C` always quits.
/// - An open modal captures every key, then the search line when focused.
pub fn handle_event(ev: &CEvent, app: &mut AppState) -> Option<Command> {
    let CEvent::Key(ke) = ev else {
        return None;
    };
    if ke.kind != KeyEventKind::Press {
        return None;
    }
    if ke.modifiers.contains(KeyModifiers::CONTROL) && ke.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }
    if app.modal.is_open() {
        return modals::handle_modal_key(*ke, app);
    }
    if app.focus == Focus::Search {
        search::handle_search_key(*ke, app);
        return None;
    }
    handle_pane_key(*ke, app)
}

fn handle_pane_key(ke: KeyEvent, app: &mut AppState) -> Option<Command> {
    match ke.code {
        KeyCode::Char('q') => return Some(Command::Quit),
        KeyCode::Char('/') => app.enter_search(),
        KeyCode::Char('f') => {
            app.cycle_filter(true);
        }
        KeyCode::Char('F') => {
            app.cycle_filter(false);
        }
        KeyCode::Char('?') => app.modal = Modal::Help,
        KeyCode::Tab | KeyCode::BackTab => app.toggle_focus(),
        KeyCode::Char(']') => {
            app.select_tab(app.active_tab.next());
            return Some(Command::SelectTab(app.active_tab));
        }
        KeyCode::Char('[') => {
            app.select_tab(app.active_tab.prev());
            return Some(Command::SelectTab(app.active_tab));
        }
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        KeyCode::PageUp => app.move_selection(-10),
        KeyCode::PageDown => app.move_selection(10),
        KeyCode::Char('m') => return load_more_command(app),
        KeyCode::Enter => match app.focus {
            Focus::Gallery => app.open_image(),
            Focus::Grid | Focus::Search => app.open_detail(),
        },
        KeyCode::Char('t') if app.focus == Focus::Grid => app.open_trailer(),
        KeyCode::Char('o') => return open_command(app),
        KeyCode::Char('d') if app.focus == Focus::Gallery => {
            return app.selected_gallery_item().map(|item| Command::Download {
                url: item.image_url,
                title: item.title,
            });
        }
        _ => {}
    }
    None
}

/// Load more for the focused pane; the grid control stays inert once hidden.
fn load_more_command(app: &mut AppState) -> Option<Command> {
    if app.focus == Focus::Gallery {
        return Some(Command::LoadMoreLane(app.active_tab));
    }
    let (hidden, busy) = lock_surface(&app.surface)
        .load_more()
        .map_or((true, false), |c| (c.is_hidden(), c.is_busy()));
    if hidden {
        app.status = Some("No more anime to load".to_string());
        None
    } else if busy {
        app.status = Some("Still loading, try again in a moment".to_string());
        None
    } else {
        Some(Command::LoadMoreGrid)
    }
}

fn open_command(app: &mut AppState) -> Option<Command> {
    let url = match app.focus {
        Focus::Gallery => app.selected_gallery_item().map(|i| i.image_url),
        Focus::Grid | Focus::Search => app.selected_card().and_then(|c| c.trailer_url),
    };
    if url.is_none() {
        app.status = Some("Nothing to open".to_string());
    }
    url.map(Command::OpenUrl)
}
