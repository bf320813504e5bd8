//! Read-only views over the latest snapshot: current value, current time, readings
//! table and chart series. Everything here is pure formatting; drawing lives in `ui`.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::sampler::SnapshotRx;
use crate::trend::{linear_fit, Trend};
use crate::types::{Observation, Snapshot, Unit};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub value: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub points: Vec<(f64, f64)>,
    /// Fitted line at the same x positions; absent below two points.
    pub trend: Option<Vec<(f64, f64)>>,
    pub fit: Option<Trend>,
}

impl ChartSeries {
    pub fn x_bounds(&self) -> [f64; 2] {
        let lo = self.points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
        let hi = self.points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
        if hi - lo < 1.0 {
            [lo, lo + 1.0]
        } else {
            [lo, hi]
        }
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        let ys = self
            .points
            .iter()
            .chain(self.trend.iter().flatten())
            .map(|p| p.1);
        let (lo, hi) = ys.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });
        if hi - lo < 1e-9 {
            [lo - 1.0, hi + 1.0]
        } else {
            [lo - 0.5, hi + 0.5]
        }
    }
}

pub fn display_value(snap: &Snapshot, unit: Unit) -> String {
    format!("{:.1} {}", snap.latest.value, unit.suffix())
}

pub fn display_time(snap: &Snapshot) -> String {
    snap.latest.timestamp.clone()
}

pub fn table_rows(snap: &Snapshot) -> Vec<TableRow> {
    snap.history
        .iter()
        .map(|o| TableRow {
            value: format!("{:.1}", o.value),
            timestamp: o.timestamp.clone(),
        })
        .collect()
}

pub fn chart_series(snap: &Snapshot) -> Option<ChartSeries> {
    if snap.history.is_empty() {
        return None;
    }
    let xs = x_positions(&snap.history);
    let values: Vec<f64> = snap.history.iter().map(|o| o.value).collect();
    let points = xs.iter().copied().zip(values.iter().copied()).collect();
    let fit = linear_fit(&values);
    let trend = fit.map(|t| xs.iter().copied().zip(t.values(xs.len())).collect());
    Some(ChartSeries { points, trend, fit })
}

// Seconds since the first reading; falls back to the index if any stamp is unreadable.
fn x_positions(history: &[Observation]) -> Vec<f64> {
    let stamps: Option<Vec<NaiveDateTime>> = history.iter().map(Observation::recorded_at).collect();
    match stamps.as_deref() {
        Some([first, ..]) => stamps
            .iter()
            .flatten()
            .map(|t| (*t - *first).num_seconds() as f64)
            .collect(),
        _ => (0..history.len()).map(|i| i as f64).collect(),
    }
}

/// `HH:MM:SS` part of an observation timestamp.
pub fn clock_part(timestamp: &str) -> &str {
    timestamp.split_once(' ').map(|(_, t)| t).unwrap_or(timestamp)
}

/// Plain-text rendering of all views, used by one-shot mode.
pub fn render_text(snap: Option<&Snapshot>, unit: Unit, location: &str) -> String {
    match snap {
        Some(snap) => TextReport { snap, unit, location }.to_string(),
        None => format!("{location}: waiting for first reading\n"),
    }
}

struct TextReport<'a> {
    snap: &'a Snapshot,
    unit: Unit,
    location: &'a str,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (snap, unit) = (self.snap, self.unit);
        writeln!(f, "Current temperature in {}: {}", self.location, display_value(snap, unit))?;
        writeln!(f, "As of: {}", display_time(snap))?;
        writeln!(f)?;
        writeln!(f, "{:>3}  {:>10}  Timestamp", "#", format!("Temp ({})", unit.suffix()))?;
        for (i, row) in table_rows(snap).iter().enumerate() {
            writeln!(f, "{:>3}  {:>10}  {}", i + 1, row.value, row.timestamp)?;
        }
        writeln!(f)?;
        match chart_series(snap).and_then(|c| c.fit) {
            Some(t) => writeln!(f, "Trend: {:+.2} {} per reading", t.slope, unit.suffix()),
            None => writeln!(f, "Trend: n/a (needs at least 2 readings)"),
        }
    }
}

/// Subscriber side of the sampler: keeps the snapshot every view of one frame draws from.
pub struct Presenter {
    rx: SnapshotRx,
    current: Option<Arc<Snapshot>>,
    pub unit: Unit,
    pub location: String,
}

impl Presenter {
    pub fn new(rx: SnapshotRx, unit: Unit, location: impl Into<String>) -> Self {
        let current = rx.borrow().clone();
        Self {
            rx,
            current,
            unit,
            location: location.into(),
        }
    }

    /// Picks up a newer snapshot if one was published. Returns true when it did.
    pub fn refresh(&mut self) -> bool {
        match self.rx.has_changed() {
            Ok(true) => {
                self.current = self.rx.borrow_and_update().clone();
                true
            }
            _ => false,
        }
    }

    /// Waits for the next snapshot; `false` once the sampler has gone away.
    pub async fn changed(&mut self) -> bool {
        if self.rx.changed().await.is_err() {
            return false;
        }
        self.current = self.rx.borrow_and_update().clone();
        true
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.current.as_deref()
    }

    pub fn display_value(&self) -> Option<String> {
        self.snapshot().map(|s| display_value(s, self.unit))
    }

    pub fn display_time(&self) -> Option<String> {
        self.snapshot().map(display_time)
    }

    pub fn table_rows(&self) -> Vec<TableRow> {
        self.snapshot().map(table_rows).unwrap_or_default()
    }

    pub fn chart_series(&self) -> Option<ChartSeries> {
        self.snapshot().and_then(chart_series)
    }

    pub fn render_text(&self) -> String {
        render_text(self.snapshot(), self.unit, &self.location)
    }
}
