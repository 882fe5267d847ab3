//! The settings view: panel tabs, the selected panel, and key hints.

use crate::colors;
use anything_core::{ProgressBoard, ProgressDisplay, SettingsForm, SettingsPanel};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Tabs, Wrap},
};

pub fn render(f: &mut Frame, area: Rect, form: &SettingsForm, progress: &ProgressBoard) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Settings ")
        .style(Style::default().bg(colors::SURFACE))
        .border_style(Style::default().fg(colors::PRIMARY));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(inner);

    let selected = SettingsPanel::ALL
        .iter()
        .position(|panel| *panel == form.panel)
        .unwrap_or(0);
    let tabs = Tabs::new(SettingsPanel::ALL.iter().map(|panel| panel.title()))
        .select(selected)
        .style(Style::default().fg(colors::SUBTEXT))
        .highlight_style(
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, chunks[0]);

    match form.panel {
        SettingsPanel::General => render_general(f, chunks[1], form),
        SettingsPanel::Indexing => render_indexing(f, chunks[1], form, &progress.indexing),
        SettingsPanel::Models => render_models(f, chunks[1], form, &progress.download),
    }

    let hints = Paragraph::new(Line::from(Span::styled(
        "Tab/←/→ panels   Enter save   Esc close",
        Style::default().fg(colors::OUTLINE),
    )));
    f.render_widget(hints, chunks[2]);
}

fn label(text: &str) -> Span<'static> {
    Span::styled(format!("{text:<22}"), Style::default().fg(colors::SUBTEXT))
}

fn value(text: impl Into<String>) -> Span<'static> {
    Span::styled(text.into(), Style::default().fg(colors::ON_SURFACE))
}

fn render_general(f: &mut Frame, area: Rect, form: &SettingsForm) {
    let mut lines = vec![
        Line::from(vec![
            label("Hotkey"),
            Span::styled(
                format!("{}▏", form.hotkey_draft),
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            label("Saved hotkey"),
            value(form.record.hotkey.clone()),
        ]),
        Line::default(),
        Line::from(Span::styled(
            "Type a combination such as Ctrl+Shift+K, Alt+Space or F12",
            Style::default().fg(colors::OUTLINE),
        )),
    ];
    if let Some(error) = &form.error {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(colors::ERROR),
        )));
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_indexing(f: &mut Frame, area: Rect, form: &SettingsForm, progress: &ProgressDisplay) {
    let [text_area, bar_area] = split_for_progress(area);

    let record = &form.record;
    let lines = vec![
        Line::from(vec![
            label("Ignored paths"),
            value(list(&record.ignored_paths)),
        ]),
        Line::from(vec![
            label("Allowed extensions"),
            value(list(&record.allowed_extensions)),
        ]),
        Line::default(),
        Line::from(Span::styled(
            "r: rebuild index",
            Style::default().fg(colors::OUTLINE),
        )),
    ];
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), text_area);
    render_progress(f, bar_area, "Indexing", progress);
}

fn render_models(f: &mut Frame, area: Rect, form: &SettingsForm, progress: &ProgressDisplay) {
    let [text_area, bar_area] = split_for_progress(area);

    let record = &form.record;
    let lines = vec![
        Line::from(vec![
            label("Embedding strategy"),
            value(record.embedding_strategy.clone()),
        ]),
        Line::from(vec![
            label("Max chunks per file"),
            value(record.max_chunks_per_file.to_string()),
        ]),
        Line::default(),
        Line::from(Span::styled(
            "d: download models",
            Style::default().fg(colors::OUTLINE),
        )),
    ];
    f.render_widget(Paragraph::new(lines), text_area);
    render_progress(f, bar_area, "Download", progress);
}

fn split_for_progress(area: Rect) -> [Rect; 2] {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(3)])
        .areas(area)
}

fn list(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}

fn render_progress(f: &mut Frame, area: Rect, title: &str, display: &ProgressDisplay) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
        .border_style(Style::default().fg(colors::OUTLINE));

    let gauge = match display {
        ProgressDisplay::Hidden => {
            f.render_widget(
                Paragraph::new(Span::styled("Idle", Style::default().fg(colors::OUTLINE)))
                    .block(block),
                area,
            );
            return;
        }
        // Indeterminate: full bar, dimmed
        ProgressDisplay::Dimmed { message } => Gauge::default()
            .percent(100)
            .label(message.clone())
            .gauge_style(Style::default().fg(colors::OUTLINE).bg(colors::SURFACE)),
        ProgressDisplay::Active {
            percent,
            label,
            message,
        } => Gauge::default()
            .percent(u16::from(*percent))
            .label(format!("{label}  {message}"))
            .gauge_style(
                Style::default()
                    .fg(colors::PRIMARY)
                    .bg(colors::SURFACE_HIGH),
            ),
    };
    f.render_widget(gauge.block(block), area);
}
