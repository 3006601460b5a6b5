use ratatui::prelude::*;
use ratatui::widgets::*;

use chirilica_core::TextBuffer;

use crate::tui::app::{App, Pane};
use crate::tui::theme::theme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();
    let focused = app.focused_pane == Pane::Output;

    let block = Block::default()
        .title(t.panel_title("OUTPUT", focused))
        .borders(Borders::ALL)
        .border_style(t.panel_border(focused))
        .border_type(if focused {
            BorderType::Thick
        } else {
            BorderType::Plain
        });

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.field.is_empty() && !focused {
        let empty = Paragraph::new(Line::styled(
            "Nothing typed yet. Type Latin letters to write Cyrillic.",
            t.text_muted(),
        ));
        frame.render_widget(empty, inner);
        return;
    }

    let lines = text_lines(app.field.chars(), app.cursor(), focused);

    // Keep the cursor line visible
    let cursor_line = app.field.chars()[..app.cursor()]
        .iter()
        .filter(|ch| **ch == '\n')
        .count();
    let visible_height = inner.height as usize;
    let scroll = (cursor_line + 1).saturating_sub(visible_height);

    let output = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll as u16, 0));
    frame.render_widget(output, inner);
}

/// Split the buffer into lines, marking the cursor cell.
fn text_lines(chars: &[char], cursor: usize, show_cursor: bool) -> Vec<Line<'static>> {
    let t = theme();
    let mut lines = Vec::new();
    let mut spans = Vec::new();
    let mut run = String::new();

    for (i, ch) in chars.iter().enumerate() {
        if show_cursor && i == cursor {
            if !run.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut run), t.text_primary()));
            }
            let cell = if *ch == '\n' { " ".to_string() } else { ch.to_string() };
            spans.push(Span::styled(cell, t.cursor()));
            if *ch != '\n' {
                continue;
            }
        }
        if *ch == '\n' {
            if !run.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut run), t.text_primary()));
            }
            lines.push(Line::from(std::mem::take(&mut spans)));
            continue;
        }
        run.push(*ch);
    }

    if !run.is_empty() {
        spans.push(Span::styled(run, t.text_primary()));
    }
    if show_cursor && cursor == chars.len() {
        spans.push(Span::styled(" ", t.cursor()));
    }
    lines.push(Line::from(spans));
    lines
}
