use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::palette::theme;
use crate::render::RenderedCard;
use crate::state::{AppState, Focus, Notice, Surface};
use crate::util::truncate_to_width;

/// What: Draw the anime grid (left) and the selected card's summary (right).
///
/// Details:
/// - A notice (loading placeholder or failure message) replaces the list.
/// - Hidden cards are skipped; the selection indexes the visible ones.
pub(super) fn render_grid(f: &mut Frame, area: Rect, app: &AppState, surface: &Surface) {
    let th = theme();
    let focused = app.focus == Focus::Grid;
    let border = if focused { th.sapphire } else { th.surface2 };
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let Some(grid) = surface.grid() else {
        let p = Paragraph::new("Grid unavailable").block(panel("Top Anime", border));
        f.render_widget(p, area);
        return;
    };
    if let Some(notice) = &grid.notice {
        let color = match notice {
            Notice::Loading(_) => th.overlay1,
            Notice::Failed(_) => th.red,
        };
        let p = Paragraph::new(Span::styled(notice.text(), Style::default().fg(color)))
            .block(panel("Top Anime", border));
        f.render_widget(p, area);
        return;
    }

    let visible: Vec<&RenderedCard> = grid.cards.iter().filter(|c| c.visible).collect();
    let title_w = usize::from(cols[0].width.saturating_sub(30)).max(10);
    let items: Vec<ListItem> = visible
        .iter()
        .map(|c| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    truncate_to_width(&c.title, title_w),
                    Style::default().fg(th.text).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  ★ {}", c.rating_label), Style::default().fg(th.green)),
                Span::styled(format!("  {}", c.episode_label), Style::default().fg(th.yellow)),
                Span::styled(format!("  {}", c.year_label), Style::default().fg(th.overlay1)),
            ]))
        })
        .collect();
    let title = format!("Top Anime ({}/{})", visible.len(), grid.cards.len());
    let list = List::new(items)
        .block(panel(&title, border))
        .highlight_style(Style::default().fg(th.crust).bg(th.lavender))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if !visible.is_empty() {
        state.select(Some(app.grid_selected.min(visible.len() - 1)));
    }
    f.render_stateful_widget(list, cols[0], &mut state);

    let summary = visible
        .get(app.grid_selected)
        .map_or_else(|| vec![Line::from("No card selected")], |c| card_lines(c));
    let p = Paragraph::new(summary)
        .wrap(Wrap { trim: true })
        .block(panel("Details", th.surface2));
    f.render_widget(p, cols[1]);
}

fn card_lines(c: &RenderedCard) -> Vec<Line<'static>> {
    let th = theme();
    let mut lines = vec![
        Line::from(Span::styled(
            c.title.clone(),
            Style::default().fg(th.mauve).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(c.genre_line.clone(), Style::default().fg(th.sapphire))),
        Line::from(vec![
            Span::styled(format!("★ {}", c.rating_label), Style::default().fg(th.green)),
            Span::raw("  "),
            Span::styled(c.episode_label.clone(), Style::default().fg(th.yellow)),
            Span::raw("  "),
            Span::styled(c.year_label.clone(), Style::default().fg(th.overlay1)),
        ]),
        Line::from(""),
        Line::from(Span::styled(c.synopsis_excerpt.clone(), Style::default().fg(th.text))),
    ];
    if c.trailer_url.is_some() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[t] trailer  [o] open",
            Style::default().fg(th.overlay1),
        )));
    }
    lines
}

pub(super) fn panel(title: &str, border: ratatui::style::Color) -> Block<'static> {
    let th = theme();
    Block::default()
        .title(Span::styled(title.to_string(), Style::default().fg(th.overlay1)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
}
