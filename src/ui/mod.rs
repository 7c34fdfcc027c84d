//! Terminal rendering of the surface and the front-end state.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::state::{AppState, Focus, Surface, lock_surface};

mod gallery;
mod grid;
mod modals;
mod palette;

pub use palette::{MOCHA, Palette, theme};

/// What: Draw one frame.
///
/// Inputs:
/// - `f`: Frame to draw into.
/// - `app`: Front-end state; its surface is locked for the duration of the draw.
///
/// Details:
/// - Layout from top: filter bar and search line, grid with details, gallery,
///   footer. The open modal is drawn last, over everything.
pub fn ui(f: &mut Frame, app: &AppState) {
    let th = theme();
    let area = f.area();
    f.render_widget(Block::default().style(Style::default().bg(th.base)), area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Percentage(55),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(area);

    {
        let surface = lock_surface(&app.surface);
        render_header(f, rows[0], app);
        grid::render_grid(f, rows[1], app, &surface);
        gallery::render_gallery(f, rows[2], app, &surface);
        render_footer(f, rows[3], app, &surface);
    }
    modals::render_modal(f, app);
}

fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let th = theme();
    let mut filter_spans = vec![Span::styled("Filter: ", Style::default().fg(th.overlay1))];
    for (i, value) in app.filters.iter().enumerate() {
        let style = if i == app.filter_idx {
            Style::default()
                .fg(th.crust)
                .bg(th.mauve)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(th.subtext0)
        };
        filter_spans.push(Span::styled(format!(" {value} "), style));
        filter_spans.push(Span::raw(" "));
    }
    let searching = app.focus == Focus::Search;
    let search_line = Line::from(vec![
        Span::styled(
            "Search: ",
            Style::default().fg(if searching { th.sapphire } else { th.overlay1 }),
        ),
        Span::styled(
            app.search_input.clone(),
            Style::default().fg(if searching { th.text } else { th.subtext0 }),
        ),
        Span::styled(
            if searching { "▏" } else { "" },
            Style::default().fg(th.sapphire),
        ),
    ]);
    f.render_widget(
        Paragraph::new(vec![Line::from(filter_spans), search_line]),
        area,
    );
}

fn render_footer(f: &mut Frame, area: Rect, app: &AppState, surface: &Surface) {
    let th = theme();
    let control = match surface.load_more() {
        Some(c) if c.is_hidden() => Span::styled("All anime loaded", Style::default().fg(th.overlay1)),
        Some(c) => Span::styled(format!("[m] {}", c.label()), Style::default().fg(th.green)),
        None => Span::raw(""),
    };
    let engine = &app.filter;
    let mut spans = vec![
        control,
        Span::raw("  "),
        Span::styled(
            if engine.query().is_empty() {
                format!("{} | {}", engine.tag(), engine.mode().as_config_key())
            } else {
                format!(
                    "{} + \"{}\" | {}",
                    engine.tag(),
                    engine.query(),
                    engine.mode().as_config_key()
                )
            },
            Style::default().fg(th.mauve),
        ),
        Span::raw("  "),
    ];
    if let Some(status) = &app.status {
        spans.push(Span::styled(status.clone(), Style::default().fg(th.yellow)));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(
        "[/] search  [f] filter  [Tab] focus  [?] help  [q] quit",
        Style::default().fg(th.overlay1),
    ));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
