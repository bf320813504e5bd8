//! Scatter of the readings with the least-squares trend line on top.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};

use crate::presenter::{clock_part, ChartSeries};
use crate::types::{Snapshot, Unit};
use crate::ui::theme::{MUTED, READING, TREND};

pub fn draw_chart(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    snap: Option<&Snapshot>,
    series: Option<&ChartSeries>,
    unit: Unit,
    placeholder: &str,
) {
    let (Some(snap), Some(series)) = (snap, series) else {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Chart with current trend");
        let p = Paragraph::new(placeholder.to_string())
            .style(Style::default().fg(MUTED))
            .block(block);
        f.render_widget(p, area);
        return;
    };

    let mut datasets = vec![Dataset::default()
        .name("Readings")
        .marker(symbols::Marker::Dot)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(READING))
        .data(&series.points)];
    if let Some(trend) = series.trend.as_deref() {
        datasets.push(
            Dataset::default()
                .name("Trend")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(TREND))
                .data(trend),
        );
    }

    let title = match series.fit {
        Some(t) => format!("Chart with current trend ({:+.2} {}/reading)", t.slope, unit.suffix()),
        None => "Chart with current trend (needs 2 readings)".to_string(),
    };

    let [x_lo, x_hi] = series.x_bounds();
    let [y_lo, y_hi] = series.y_bounds();
    let first = snap.history.first().map(|o| clock_part(&o.timestamp)).unwrap_or("");
    let last = snap.history.last().map(|o| clock_part(&o.timestamp)).unwrap_or("");

    let chart = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title(title))
        .x_axis(
            Axis::default()
                .title("Time")
                .style(Style::default().fg(Color::Gray))
                .bounds([x_lo, x_hi])
                .labels(vec![Span::raw(first.to_string()), Span::raw(last.to_string())]),
        )
        .y_axis(
            Axis::default()
                .title(format!("Temperature ({})", unit.suffix()))
                .style(Style::default().fg(Color::Gray))
                .bounds([y_lo, y_hi])
                .labels(vec![
                    Span::raw(format!("{y_lo:.1}")),
                    Span::raw(format!("{y_hi:.1}")),
                ]),
        );
    f.render_widget(chart, area);
}
