use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
};

use super::grid::panel;
use super::palette::theme;
use crate::state::{AppState, Modal};

const HELP_LINES: [(&str, &str); 14] = [
    ("q / Ctrl+C", "quit"),
    ("/", "search titles and synopses"),
    ("f / F", "next / previous tag filter"),
    ("Tab", "switch between grid and gallery"),
    ("[ / ]", "previous / next gallery tab"),
    ("j k ↑ ↓", "move selection"),
    ("PgUp / PgDn", "move by ten"),
    ("m", "load more (grid or active gallery tab)"),
    ("Enter", "details (grid) or image (gallery)"),
    ("t", "trailer preview"),
    ("o", "open trailer or image in the browser"),
    ("d", "download the selected image"),
    ("?", "this help"),
    ("Esc", "close dialog / leave search"),
];

/// Rectangle of `pct_x` by `pct_y` percent centered in `area`.
fn centered_rect(pct_x: u16, pct_y: u16, area: Rect) -> Rect {
    let w = area.width.saturating_mul(pct_x) / 100;
    let h = area.height.saturating_mul(pct_y) / 100;
    Rect {
        x: area.x + (area.width.saturating_sub(w)) / 2,
        y: area.y + (area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    }
}

/// What: Draw the open modal, if any, over the page.
pub(super) fn render_modal(f: &mut Frame, app: &AppState) {
    let th = theme();
    let (title, lines): (String, Vec<Line>) = match &app.modal {
        Modal::None => return,
        Modal::Alert { message } => (
            "Notice".to_string(),
            message.lines().map(|l| Line::from(l.to_string())).collect(),
        ),
        Modal::Detail { card } => {
            let mut lines = vec![
                Line::from(Span::styled(
                    card.title.clone(),
                    Style::default().fg(th.mauve).add_modifier(Modifier::BOLD),
                )),
            ];
            if card.primary_title != card.title {
                lines.push(Line::from(Span::styled(
                    card.primary_title.clone(),
                    Style::default().fg(th.subtext0),
                )));
            }
            lines.push(Line::from(vec![
                Span::styled(format!("★ {}", card.rating_label), Style::default().fg(th.green)),
                Span::raw("  "),
                Span::styled(card.episode_label.clone(), Style::default().fg(th.yellow)),
                Span::raw("  "),
                Span::styled(card.year_label.clone(), Style::default().fg(th.overlay1)),
            ]));
            lines.push(Line::from(Span::styled(
                format!("Tags: {}", card.tag_key),
                Style::default().fg(th.sapphire),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(
                card.synopsis
                    .clone()
                    .unwrap_or_else(|| card.synopsis_excerpt.clone()),
            ));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Image: {}", card.image_url),
                Style::default().fg(th.overlay1),
            )));
            lines.push(Line::from(Span::styled(
                "[t] trailer  [o] open trailer  [Esc] close",
                Style::default().fg(th.overlay1),
            )));
            ("Details".to_string(), lines)
        }
        Modal::Trailer(t) => {
            let link = t.url.clone().map_or_else(
                || Span::styled("Trailer unavailable", Style::default().fg(th.red)),
                |u| Span::styled(u, Style::default().fg(th.sapphire)),
            );
            (
                t.title.clone(),
                vec![
                    Line::from(t.description.clone()),
                    Line::from(""),
                    Line::from(link),
                    Line::from(""),
                    Line::from(Span::styled(
                        "[o] open in browser  [Esc] close",
                        Style::default().fg(th.overlay1),
                    )),
                ],
            )
        }
        Modal::Image { item } => (
            item.title.clone(),
            vec![
                Line::from(Span::styled(
                    item.subtitle.clone(),
                    Style::default().fg(th.subtext0),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    item.image_url.clone(),
                    Style::default().fg(th.sapphire),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "[d] download  [o] open in browser  [Esc] close",
                    Style::default().fg(th.overlay1),
                )),
            ],
        ),
        Modal::Help => (
            "Help".to_string(),
            HELP_LINES
                .iter()
                .map(|(k, v)| {
                    Line::from(vec![
                        Span::styled(format!("{k:<14}"), Style::default().fg(th.mauve)),
                        Span::styled((*v).to_string(), Style::default().fg(th.text)),
                    ])
                })
                .collect(),
        ),
    };
    let rect = centered_rect(70, 60, f.area());
    f.render_widget(Clear, rect);
    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(th.text).bg(th.base))
        .block(panel(&title, th.lavender));
    f.render_widget(p, rect);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_stays_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let r = centered_rect(70, 60, area);
        assert_eq!((r.x, r.y, r.width, r.height), (15, 8, 70, 24));
    }
}
