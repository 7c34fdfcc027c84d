use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Tabs},
};

use super::grid::panel;
use super::palette::theme;
use crate::state::{AppState, Focus, GalleryTab, Surface};
use crate::util::truncate_to_width;

/// What: Draw the gallery tab bar and the tiles of the active tab.
///
/// Details:
/// - Tabs whose region is unmounted are still listed but show as unavailable.
pub(super) fn render_gallery(f: &mut Frame, area: Rect, app: &AppState, surface: &Surface) {
    let th = theme();
    let focused = app.focus == Focus::Gallery;
    let border = if focused { th.sapphire } else { th.surface2 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let titles: Vec<Line> = GalleryTab::ALL
        .iter()
        .map(|t| {
            let count = surface.gallery_items(*t).map_or(0, <[_]>::len);
            Line::from(format!("{} ({count})", t.label()))
        })
        .collect();
    let selected = GalleryTab::ALL
        .iter()
        .position(|t| *t == app.active_tab)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(th.overlay1))
        .highlight_style(Style::default().fg(th.mauve).add_modifier(Modifier::BOLD))
        .divider(" | ");
    f.render_widget(tabs, rows[0]);

    let title = format!("Gallery: {}", app.active_tab.label());
    let Some(items) = surface.gallery_items(app.active_tab) else {
        let p = Paragraph::new("Gallery unavailable").block(panel(&title, border));
        f.render_widget(p, rows[1]);
        return;
    };
    if items.is_empty() {
        let p = Paragraph::new(Span::styled(
            "Nothing here yet",
            Style::default().fg(th.overlay1),
        ))
        .block(panel(&title, border));
        f.render_widget(p, rows[1]);
        return;
    }
    let title_w = usize::from(rows[1].width.saturating_sub(28)).max(10);
    let list_items: Vec<ListItem> = items
        .iter()
        .filter(|i| i.visible)
        .map(|i| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    truncate_to_width(&i.title, title_w),
                    Style::default().fg(th.text),
                ),
                Span::styled(format!("  · {}", i.subtitle), Style::default().fg(th.subtext0)),
            ]))
        })
        .collect();
    let list = List::new(list_items)
        .block(panel(&title, border))
        .highlight_style(Style::default().fg(th.crust).bg(th.lavender))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(Some(app.gallery_selected.min(items.len() - 1)));
    f.render_stateful_widget(list, rows[1], &mut state);
}
