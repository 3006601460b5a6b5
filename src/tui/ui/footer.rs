use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use chirilica_core::TextBuffer;

use crate::tui::app::{App, Pane};
use crate::tui::theme::{theme, Theme};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();

    let line1 = Line::from(vec![
        Span::styled(format!("Status: {}  ", app.status), t.status_message()),
        Span::styled(
            format!("{} chars, cursor {}", app.field.len(), app.cursor()),
            t.text_muted(),
        ),
    ]);

    let footer = Paragraph::new(vec![line1, hints(app, t)]);
    frame.render_widget(footer, area);
}

fn hints<'a>(app: &App, t: &'a Theme) -> Line<'a> {
    let mut spans = vec![
        Span::styled("F1", t.key_hint()),
        Span::styled(":case ", t.text_muted()),
        Span::styled("F2", t.key_hint()),
        Span::styled(":alt ", t.text_muted()),
        Span::styled("F3", t.key_hint()),
        Span::styled(":acute ", t.text_muted()),
        Span::styled("F4", t.key_hint()),
        Span::styled(":grave ", t.text_muted()),
        Span::styled("F5", t.key_hint()),
        Span::styled(":reload ", t.text_muted()),
        Span::styled("Ctrl-L", t.key_hint()),
        Span::styled(":clear ", t.text_muted()),
        Span::styled("Tab", t.key_hint()),
        Span::styled(":focus ", t.text_muted()),
    ];

    if app.focused_pane == Pane::Keyboard {
        spans.push(Span::styled("arrows", t.key_hint()));
        spans.push(Span::styled(":select ", t.text_muted()));
        spans.push(Span::styled("Enter", t.key_hint()));
        spans.push(Span::styled(":press ", t.text_muted()));
    } else {
        spans.push(Span::styled("3/4", t.key_hint()));
        spans.push(Span::styled(":hold accent ", t.text_secondary()));
    }

    spans.push(Span::styled("Esc", t.key_hint()));
    spans.push(Span::styled(":quit", t.text_muted()));
    Line::from(spans)
}
