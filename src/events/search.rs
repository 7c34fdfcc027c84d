use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::state::AppState;

/// What: Edit the search line; every change re-runs the search from scratch.
///
/// Details:
/// - `Esc`/`Enter`/`Tab` return focus to the previous pane and keep the query.
/// - `Ctrl+U` clears the input.
pub(super) fn handle_search_key(ke: KeyEvent, app: &mut AppState) {
    match ke.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Tab => app.leave_search(),
        KeyCode::Backspace => {
            if app.search_input.pop().is_some() {
                app.apply_search();
            }
        }
        KeyCode::Char('u') if ke.modifiers.contains(KeyModifiers::CONTROL) => {
            app.search_input.clear();
            app.apply_search();
        }
        KeyCode::Char(ch) => {
            app.search_input.push(ch);
            let shown = app.apply_search();
            tracing::debug!(query = %app.search_input, shown, "search input changed");
        }
        _ => {}
    }
}
