pub mod help;
pub mod panel;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use scholar_queue_core::KeyValueStore;

use crate::app::{App, InputMode};

pub const PANEL_WIDTH: u16 = 52;
pub const PANEL_HEIGHT: u16 = 21;

/// Draw one frame: backdrop, floating panel, and the help overlay on top.
pub fn render<S: KeyValueStore>(f: &mut Frame, app: &mut App<S>) {
    let area = f.area();
    render_backdrop(f, app, area);

    let rect = panel_rect(area, app.panel_pos);
    panel::render(f, app, rect);

    if app.show_help {
        help::render(f, &app.theme);
    }
}

/// Where the panel lands for a requested `(row, col)`.
///
/// With no saved position it docks near the top-right corner. A saved
/// position is clamped so the whole panel stays on screen.
pub fn panel_rect(area: Rect, pos: Option<(u16, u16)>) -> Rect {
    let width = PANEL_WIDTH.min(area.width);
    let height = PANEL_HEIGHT.min(area.height);
    let (row, col) = pos.unwrap_or((
        area.y.saturating_add(2),
        area.right().saturating_sub(width.saturating_add(2)),
    ));
    let row = row.clamp(area.y, area.bottom().saturating_sub(height).max(area.y));
    let col = col.clamp(area.x, area.right().saturating_sub(width).max(area.x));
    Rect::new(col, row, width, height)
}

fn render_backdrop<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let theme = &app.theme;
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(area);

    let header = Line::from(vec![
        Span::styled(" scholar-queue ", theme.header_style()),
        Span::styled(
            format!("  {}", app.session.config().engine.base_url()),
            Style::default().fg(theme.dim),
        ),
    ]);
    f.render_widget(Paragraph::new(header), chunks[0]);

    let mut body = vec![Line::from("")];
    match &app.host.last_url {
        Some(url) => {
            body.push(Line::from(Span::styled(
                "  Last search",
                Style::default().fg(theme.active).add_modifier(Modifier::BOLD),
            )));
            body.push(Line::from(Span::styled(
                format!("  {}", url),
                Style::default().fg(theme.text),
            )));
        }
        None => body.push(Line::from(Span::styled(
            "  No search opened yet",
            Style::default().fg(theme.dim),
        ))),
    }
    body.push(Line::from(""));
    body.push(Line::from(Span::styled(
        format!("  Library: {}", app.host.library.path().display()),
        Style::default().fg(theme.dim),
    )));
    f.render_widget(Paragraph::new(body), chunks[1]);

    let hints = match app.input_mode {
        InputMode::Normal => {
            " i:edit queries  b:begin  s:save  n:next  c:clear  o:reopen  ?:help  q:quit"
        }
        InputMode::TextInput => " typing: Enter newline  Esc/Tab:done  Ctrl+c:quit",
    };
    f.render_widget(
        Paragraph::new(Line::from(hints)).style(theme.footer_style()),
        chunks[2],
    );
}

/// Truncate a string to fit in `max_width` columns, appending "\u{2026}" if truncated.
pub fn truncate(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if s.chars().count() <= max_width {
        return s.to_string();
    }
    let mut truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
    truncated.push('\u{2026}');
    truncated
}
