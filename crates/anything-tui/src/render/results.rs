//! Input box and result rows.

use crate::app::App;
use crate::bridge::TerminalBridge;
use crate::colors;
use anything_core::{FileCategory, Launcher, RowIcon, RowView};
use anything_tui::window::{INPUT_LINES, LINES_PER_ROW, first_visible, row_capacity};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

fn glyph(icon: &RowIcon) -> &'static str {
    match icon {
        RowIcon::Settings => "⚙",
        RowIcon::Inline(_) => "◆",
        RowIcon::Thumbnail(_) => "▣",
        RowIcon::Placeholder(category) => match category {
            FileCategory::Pdf => "▤",
            FileCategory::Document => "≡",
            FileCategory::Image => "▨",
            FileCategory::Code => "λ",
            FileCategory::Other => "·",
        },
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App, launcher: &Launcher<TerminalBridge>) {
    let input_area = Rect {
        height: INPUT_LINES.min(area.height),
        ..area
    };
    let input_block = Block::default()
        .borders(Borders::ALL)
        .title(" Anything ")
        .style(Style::default().bg(colors::SURFACE))
        .border_style(Style::default().fg(if app.input_focused {
            colors::PRIMARY
        } else {
            colors::OUTLINE
        }));

    let input = launcher.input();
    let text = if input.is_empty() {
        Span::styled("Search files", Style::default().fg(colors::OUTLINE))
    } else {
        Span::styled(input, Style::default().fg(colors::ON_SURFACE))
    };
    f.render_widget(Paragraph::new(text).block(input_block), input_area);

    if app.input_focused && input_area.height == INPUT_LINES {
        let typed = u16::try_from(input.chars().count()).unwrap_or(u16::MAX);
        let max_x = input_area.x + input_area.width.saturating_sub(2);
        f.set_cursor_position((
            (input_area.x + 1).saturating_add(typed).min(max_x),
            input_area.y + 1,
        ));
    }

    let list = launcher.list();
    let capacity = row_capacity(area);
    let offset = first_visible(list.selected, capacity);
    for (slot, row) in list.rows.iter().skip(offset).take(capacity).enumerate() {
        let y = area.y + INPUT_LINES + u16::try_from(slot).unwrap_or(0) * LINES_PER_ROW;
        render_row(f, Rect::new(area.x, y, area.width, LINES_PER_ROW), row);
    }
}

fn render_row(f: &mut Frame, area: Rect, row: &RowView) {
    let background = if row.selected {
        colors::SURFACE_HIGH
    } else {
        colors::SURFACE
    };
    let name_style = if row.selected {
        Style::default()
            .fg(colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors::ON_SURFACE)
    };

    let mut title = vec![
        Span::styled(
            format!(" {} ", glyph(&row.icon)),
            Style::default().fg(colors::SUBTEXT),
        ),
        Span::styled(row.name.clone(), name_style),
        Span::styled(
            format!("  {}", row.directory),
            Style::default().fg(colors::OUTLINE),
        ),
    ];
    if let Some(score) = &row.score {
        title.push(Span::styled(
            format!("  {score}"),
            Style::default().fg(colors::SUBTEXT),
        ));
    }

    let mut snippet = vec![Span::raw("   ")];
    snippet.extend(row.snippet.iter().map(|span| {
        if span.highlighted {
            Span::styled(
                span.text.clone(),
                Style::default()
                    .fg(colors::HIGHLIGHT)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(span.text.clone(), Style::default().fg(colors::SUBTEXT))
        }
    }));

    let lines = vec![Line::from(title), Line::from(snippet)];
    f.render_widget(
        Paragraph::new(lines).style(Style::default().bg(background)),
        area,
    );
}
