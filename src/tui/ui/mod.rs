mod footer;
mod header;
mod keyboard_panel;
mod output_panel;

use ratatui::prelude::*;

use crate::tui::app::App;

pub fn draw_ui(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),   // Compact header
            Constraint::Min(6),      // Output block
            Constraint::Length(14),  // Keyboard block (4 rows of 3-line caps + border)
            Constraint::Length(2),   // Footer
        ])
        .split(frame.area());

    header::render(frame, app, root[0]);
    output_panel::render(frame, app, root[1]);
    keyboard_panel::render(frame, app, root[2]);
    footer::render(frame, app, root[3]);
}
