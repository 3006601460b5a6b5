use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use chirilica_core::{MarkKey, Switch};

use crate::tui::app::App;
use crate::tui::theme::theme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();
    let engine = &app.engine;

    let mut spans = vec![
        // App name
        Span::styled("chirilica ", t.text_primary().add_modifier(Modifier::BOLD)),
    ];

    for (switch, active) in [
        (Switch::Case, engine.is_case_active()),
        (Switch::Alternate, engine.is_alternate_active()),
    ] {
        spans.push(Span::styled(
            format!(" {} {} ", switch.panel_glyph(), switch),
            t.switch_badge(active),
        ));
        spans.push(Span::raw(" "));
    }

    for mark in [MarkKey::Acute, MarkKey::Grave] {
        spans.push(Span::styled(
            format!(" {} {} ", mark.display_glyph(), mark),
            t.switch_badge(engine.active_diacritic() == Some(mark)),
        ));
        spans.push(Span::raw(" "));
    }

    let release = if app.release_events { "held keys" } else { "tap keys" };
    spans.push(Span::styled(format!("[{}] ", release), t.text_muted()));
    // Right-aligned quit hint
    spans.push(Span::styled("Esc:quit", t.key_hint()));

    let header = Paragraph::new(Line::from(spans)).alignment(Alignment::Left);

    frame.render_widget(header, area);
}
