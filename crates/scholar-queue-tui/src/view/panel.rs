use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use scholar_queue_core::{KeyValueStore, QueryKind, classify};

use super::truncate;
use crate::app::{App, Button, InputMode, PanelLayout};
use crate::theme::Theme;

/// Render the floating queue panel into `area` and record its hit areas.
pub fn render<S: KeyValueStore>(f: &mut Frame, app: &mut App<S>, area: Rect) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if app.drag.is_some() {
            theme.focused_border_style()
        } else {
            theme.border_style()
        })
        .title(Line::from(Span::styled(
            " Scholar Library Saver ",
            theme.header_style(),
        )))
        .title(
            Line::from(Span::styled(" \u{2630} ", Style::default().fg(theme.dim))).right_aligned(),
        );
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Length(7),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .split(inner);

    render_input(f, app, chunks[0]);
    let buttons = render_buttons(f, app, chunks[1]);
    render_preview(f, app, chunks[3]);
    render_activity(f, app, chunks[4]);

    app.layout = PanelLayout {
        panel: area,
        input: chunks[0],
        buttons,
    };
}

fn render_input<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let theme = &app.theme;
    let focused = app.input_mode == InputMode::TextInput;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            theme.focused_border_style()
        } else {
            theme.border_style()
        })
        .title(" One title or DOI per line ");
    let inner = block.inner(area);

    let lines: Vec<&str> = app.input.split('\n').collect();
    let skip = lines.len().saturating_sub(inner.height as usize);
    let width = inner.width as usize;

    let text: Vec<Line> = if app.input.is_empty() && !focused {
        vec![Line::from(Span::styled(
            "Press i to type, or paste a list",
            Style::default().fg(theme.dim),
        ))]
    } else {
        lines[skip..]
            .iter()
            .map(|l| Line::from(Span::styled(truncate(l, width), Style::default().fg(theme.text))))
            .collect()
    };
    f.render_widget(Paragraph::new(text).block(block), area);

    if focused && inner.width > 0 && inner.height > 0 {
        let last = lines.last().copied().unwrap_or("");
        let col = (last.chars().count() as u16).min(inner.width - 1);
        let row = (lines.len() - skip).saturating_sub(1) as u16;
        f.set_cursor_position(Position::new(inner.x + col, inner.y + row));
    }
}

fn render_buttons<S: KeyValueStore>(
    f: &mut Frame,
    app: &App<S>,
    area: Rect,
) -> Vec<(Button, Rect)> {
    let theme = &app.theme;
    let mut spans = Vec::new();
    let mut rects = Vec::new();
    let mut x = area.x;

    for button in Button::ALL {
        let label = format!("[{}]", button.label());
        let width = label.chars().count() as u16;
        let style = if button == Button::Save && app.host.save_highlighted() {
            theme.save_highlight_style()
        } else {
            Style::default().fg(theme.active)
        };
        let visible = width.min(area.right().saturating_sub(x));
        if visible > 0 {
            rects.push((button, Rect::new(x, area.y, visible, area.height.min(1))));
        }
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
        x = x.saturating_add(width + 1);
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
    rects
}

fn render_preview<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let theme = &app.theme;
    let snapshot = &app.host.snapshot;
    let width = area.width as usize;

    let lines = match &snapshot.current {
        Some(current) => {
            let mut lines = vec![query_line(
                "Current: ",
                current,
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                theme,
                width,
            )];
            if let Some(next) = &snapshot.next {
                lines.push(query_line(
                    "Next: ",
                    next,
                    Style::default().fg(theme.dim),
                    theme,
                    width,
                ));
            }
            lines.push(Line::from(Span::styled(
                format!("{} remaining", snapshot.remaining),
                Style::default().fg(theme.dim),
            )));
            lines
        }
        None => vec![Line::from(Span::styled(
            "No active paper",
            Style::default().fg(theme.dim),
        ))],
    };
    f.render_widget(Paragraph::new(lines), area);
}

/// `label [doi] text`, truncated to `width`.
fn query_line<'a>(
    label: &'a str,
    query: &str,
    style: Style,
    theme: &Theme,
    width: usize,
) -> Line<'a> {
    let mut spans = vec![Span::styled(label, Style::default().fg(theme.active))];
    let mut used = label.chars().count();
    if let QueryKind::Doi(_) = classify(query) {
        spans.push(Span::styled("[doi] ", Style::default().fg(theme.saved)));
        used += 6;
    }
    spans.push(Span::styled(
        truncate(query, width.saturating_sub(used)),
        style,
    ));
    Line::from(spans)
}

fn render_activity<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(theme.border_style())
        .title(" Activity ");
    let inner = block.inner(area);
    let width = inner.width as usize;

    let lines: Vec<Line> = app
        .host
        .activity
        .recent(inner.height as usize)
        .map(|entry| {
            Line::from(vec![
                Span::styled(format!("{} ", entry.time), Style::default().fg(theme.dim)),
                Span::styled(
                    truncate(&entry.message, width.saturating_sub(entry.time.len() + 1)),
                    Style::default().fg(theme.log_color(entry.level)),
                ),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines).block(block), area);
}
