//! Current value and current time cards.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::ui::theme::{MUTED, VALUE};

pub fn draw_current_value(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    location: &str,
    value: Option<&str>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Current temperature in {location}"));
    let p = match value {
        Some(v) => Paragraph::new(v.to_string())
            .style(Style::default().fg(VALUE).add_modifier(Modifier::BOLD)),
        None => Paragraph::new("--").style(Style::default().fg(MUTED)),
    };
    f.render_widget(p.alignment(Alignment::Center).block(block), area);
}

pub fn draw_current_time(f: &mut ratatui::Frame<'_>, area: Rect, timestamp: Option<&str>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Current date and time");
    let p = match timestamp {
        Some(t) => Paragraph::new(t.to_string()),
        None => Paragraph::new("--").style(Style::default().fg(MUTED)),
    };
    f.render_widget(p.alignment(Alignment::Center).block(block), area);
}
