//! Top header with location, source and key hints.

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders},
};

pub fn draw_header(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    location: &str,
    source: &str,
    interval_secs: u64,
) {
    let title = format!(
        "tempwatch | {location} via {source} | every {interval_secs}s  (r: refresh now, q: quit)"
    );
    f.render_widget(Block::default().title(title).borders(Borders::BOTTOM), area);
}
