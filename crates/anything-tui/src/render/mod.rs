//! Rendering for the terminal host.
//!
//! Everything is drawn inside the simulated window's rectangle; the rest of
//! the screen stays background.

mod results;
mod settings;

use crate::app::App;
use crate::bridge::TerminalBridge;
use crate::colors;
use anything_core::{Launcher, ViewState};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
};

pub fn draw(f: &mut Frame, app: &mut App, launcher: &Launcher<TerminalBridge>) {
    app.screen = f.area();
    f.render_widget(
        Block::default().style(Style::default().bg(colors::BG)),
        f.area(),
    );

    if !app.visible {
        render_hidden(f, app);
        return;
    }

    let area = app.window.area(app.screen);
    f.render_widget(Clear, area);
    match launcher.view_state() {
        ViewState::Launcher => results::render(f, area, app, launcher),
        ViewState::Settings => {
            if let Some(form) = launcher.settings_form() {
                settings::render(f, area, form, launcher.progress());
            }
        }
    }
}

fn render_hidden(f: &mut Frame, app: &App) {
    let area = f.area();
    let y = area.y + area.height / 2;
    let middle = Rect::new(area.x, y, area.width, 1.min(area.height));
    let hint = Line::from(vec![
        Span::styled("Press ", Style::default().fg(colors::OUTLINE)),
        Span::styled(app.hotkey.to_string(), Style::default().fg(colors::PRIMARY)),
        Span::styled(
            " to search, Ctrl+C to quit",
            Style::default().fg(colors::OUTLINE),
        ),
    ]);
    f.render_widget(Paragraph::new(hint).alignment(Alignment::Center), middle);
}
