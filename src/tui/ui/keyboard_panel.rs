use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::tui::app::{App, Pane};
use crate::tui::theme::theme;

const CAP_WIDTH: u16 = 6;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();
    let focused = app.focused_pane == Pane::Keyboard;

    let block = Block::default()
        .title(t.panel_title("KEYBOARD", focused))
        .borders(Borders::ALL)
        .border_style(t.panel_border(focused))
        .border_type(if focused {
            BorderType::Thick
        } else {
            BorderType::Plain
        });

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = app.labels();
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(rows.iter().map(|_| Constraint::Length(3)))
        .split(inner);

    for (r, (row, row_area)) in rows.iter().zip(row_areas.iter()).enumerate() {
        // The space bar spans the whole row
        let widths: Vec<Constraint> = if row.len() == 1 {
            vec![Constraint::Min(CAP_WIDTH)]
        } else {
            row.iter().map(|_| Constraint::Length(CAP_WIDTH)).collect()
        };
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(*row_area);

        for (c, ((_, label), cell)) in row.iter().zip(cells.iter()).enumerate() {
            let selected = focused && app.panel_cursor == (r, c);
            let caps = Paragraph::new(vec![
                Line::styled(label.primary.clone(), t.key_cap(label.active, selected)),
                Line::styled(
                    label.secondary.clone().unwrap_or_default(),
                    t.key_secondary(selected),
                ),
            ])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(t.panel_border(false)),
            );
            frame.render_widget(caps, *cell);
        }
    }
}
