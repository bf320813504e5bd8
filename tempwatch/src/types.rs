//! Reading types shared by the sampler and the views.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Wall-clock format used for every observation timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One timestamped reading, already converted to the display unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub value: f64,
    pub timestamp: String,
}

impl Observation {
    pub fn new(value: f64, timestamp: impl Into<String>) -> Self {
        Self {
            value,
            timestamp: timestamp.into(),
        }
    }

    pub fn recorded_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).ok()
    }
}

/// History as it stood right after one tick, paired with the reading that tick produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub history: Vec<Observation>,
    pub latest: Observation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Celsius,
    #[default]
    Fahrenheit,
}

impl Unit {
    pub fn convert(self, c: f64) -> f64 {
        match self {
            Unit::Celsius => c,
            Unit::Fahrenheit => c * 1.8 + 32.0,
        }
    }

    pub fn to_celsius(self, v: f64) -> f64 {
        match self {
            Unit::Celsius => v,
            Unit::Fahrenheit => (v - 32.0) / 1.8,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Celsius => "°C",
            Unit::Fahrenheit => "°F",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fahrenheit_round_trips_through_celsius() {
        for c in [-40.0, -12.3, 0.0, 15.0, 22.5, 25.0, 37.7, 100.0] {
            let f = Unit::Fahrenheit.convert(c);
            assert!((Unit::Fahrenheit.to_celsius(f) - c).abs() < 1e-9, "c={c} f={f}");
        }
    }

    #[test]
    fn known_conversions() {
        assert!((Unit::Fahrenheit.convert(22.5) - 72.5).abs() < 1e-9);
        assert!((Unit::Fahrenheit.convert(-40.0) + 40.0).abs() < 1e-9);
        assert_eq!(Unit::Celsius.convert(18.2), 18.2);
    }

    #[test]
    fn timestamp_parses_back() {
        let o = Observation::new(70.0, "2024-03-01 09:15:30");
        let at = o.recorded_at().expect("parse");
        assert_eq!(at.format(TIMESTAMP_FORMAT).to_string(), o.timestamp);
        assert!(Observation::new(70.0, "yesterday").recorded_at().is_none());
    }
}
