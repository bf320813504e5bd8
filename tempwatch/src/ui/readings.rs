//! Most recent readings, oldest first.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph, Row, Table},
};

use crate::presenter::TableRow;
use crate::types::Unit;
use crate::ui::theme::{HEADER_ROW, MUTED};

pub fn draw_readings(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    rows: &[TableRow],
    unit: Unit,
    placeholder: &str,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Most recent readings");
    if rows.is_empty() {
        let p = Paragraph::new(placeholder.to_string())
            .style(Style::default().fg(MUTED))
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let header = Row::new(vec![
        "#".to_string(),
        format!("Temp ({})", unit.suffix()),
        "Timestamp".to_string(),
    ])
    .style(Style::default().fg(HEADER_ROW).add_modifier(Modifier::BOLD));

    let body = rows.iter().enumerate().map(|(i, r)| {
        Row::new(vec![
            format!("{}", i + 1),
            r.value.clone(),
            r.timestamp.clone(),
        ])
    });

    let table = Table::new(
        body,
        [
            Constraint::Length(3),
            Constraint::Length(10),
            Constraint::Min(19),
        ],
    )
    .header(header)
    .block(block);
    f.render_widget(table, area);
}
