//! Settings: built-in defaults, optionally overridden by a JSON file and CLI flags.
//! Stored under XDG config dir: $XDG_CONFIG_HOME/tempwatch/config.json (fallback ~/.config/tempwatch/config.json)

use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};
use thiserror::Error;

use crate::types::Unit;

pub const DEFAULT_URL: &str = "http://www.bom.gov.au/nsw/forecasts/sydney.shtml";
pub const DEFAULT_SELECTOR: &str = "em.temp";
pub const DEFAULT_LOCATION: &str = "Sydney";
pub const DEFAULT_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_CAPACITY: usize = 5;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const MAX_INTERVAL_SECS: u64 = 24 * 60 * 60;
pub const MAX_TIMEOUT_SECS: u64 = 60 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid source url {0:?}: {1}")]
    Url(String, String),
    #[error("invalid selector {0:?}: {1}")]
    Selector(String, String),
    #[error("could not build http client: {0}")]
    Client(String),
    #[error("{0} must be at least 1")]
    TooSmall(&'static str),
    #[error("{0} must be at most {1}")]
    TooLarge(&'static str, u64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub url: String,
    pub selector: String,
    pub location: String,
    pub interval_secs: u64,
    pub capacity: usize,
    pub timeout_secs: u64,
    pub unit: Unit,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.into(),
            selector: DEFAULT_SELECTOR.into(),
            location: DEFAULT_LOCATION.into(),
            interval_secs: DEFAULT_INTERVAL_SECS,
            capacity: DEFAULT_CAPACITY,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            unit: Unit::Fahrenheit,
        }
    }
}

impl Settings {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_secs == 0 {
            return Err(ConfigError::TooSmall("interval"));
        }
        if self.capacity == 0 {
            return Err(ConfigError::TooSmall("capacity"));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::TooSmall("timeout"));
        }
        if self.interval_secs > MAX_INTERVAL_SECS {
            return Err(ConfigError::TooLarge("interval", MAX_INTERVAL_SECS));
        }
        if self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::TooLarge("timeout", MAX_TIMEOUT_SECS));
        }
        crate::source::parse_source_url(&self.url)?;
        Ok(())
    }

    pub fn apply(&mut self, o: &Overrides) {
        if let Some(v) = &o.url {
            self.url = v.clone();
        }
        if let Some(v) = &o.selector {
            self.selector = v.clone();
        }
        if let Some(v) = &o.location {
            self.location = v.clone();
        }
        if let Some(v) = o.interval_secs {
            self.interval_secs = v;
        }
        if let Some(v) = o.capacity {
            self.capacity = v;
        }
        if let Some(v) = o.timeout_secs {
            self.timeout_secs = v;
        }
        if let Some(v) = o.unit {
            self.unit = v;
        }
    }
}

/// Values given on the command line; `None` keeps what the file (or default) says.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub url: Option<String>,
    pub selector: Option<String>,
    pub location: Option<String>,
    pub interval_secs: Option<u64>,
    pub capacity: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub unit: Option<Unit>,
}

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("tempwatch")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tempwatch")
    }
}

pub fn settings_path() -> PathBuf {
    config_dir().join("config.json")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    match fs::read_to_string(&path) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
            tracing::warn!("ignoring unreadable {}: {e}", path.display());
            Settings::default()
        }),
        Err(_) => Settings::default(),
    }
}

pub fn save_settings(s: &Settings) -> std::io::Result<()> {
    let path = settings_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_vec_pretty(s)?;
    fs::write(path, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_dashboard() {
        let s = Settings::default();
        assert_eq!(s.interval(), Duration::from_secs(30));
        assert_eq!(s.capacity, 5);
        assert_eq!(s.unit, Unit::Fahrenheit);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let s: Settings = serde_json::from_str(r#"{"capacity": 8, "unit": "celsius"}"#).unwrap();
        assert_eq!(s.capacity, 8);
        assert_eq!(s.unit, Unit::Celsius);
        assert_eq!(s.url, DEFAULT_URL);
        assert_eq!(s.interval_secs, DEFAULT_INTERVAL_SECS);
    }

    #[test]
    fn overrides_win_over_file_values() {
        let mut s = Settings {
            capacity: 8,
            ..Settings::default()
        };
        s.apply(&Overrides {
            interval_secs: Some(5),
            location: Some("Hobart".into()),
            ..Overrides::default()
        });
        assert_eq!(s.interval_secs, 5);
        assert_eq!(s.capacity, 8);
        assert_eq!(s.location, "Hobart");
    }

    #[test]
    fn validation_rejects_zeroes_and_bad_urls() {
        let zero_interval = Settings {
            interval_secs: 0,
            ..Settings::default()
        };
        assert!(matches!(zero_interval.validate(), Err(ConfigError::TooSmall("interval"))));
        let zero_cap = Settings {
            capacity: 0,
            ..Settings::default()
        };
        assert!(matches!(zero_cap.validate(), Err(ConfigError::TooSmall("capacity"))));
        let bad_url = Settings {
            url: "file:///etc/passwd".into(),
            ..Settings::default()
        };
        assert!(matches!(bad_url.validate(), Err(ConfigError::Url(..))));
    }

    #[test]
    fn validation_rejects_huge_interval_and_timeout() {
        let mut s = Settings::default();
        s.apply(&Overrides {
            interval_secs: Some(u64::MAX),
            ..Overrides::default()
        });
        assert!(matches!(s.validate(), Err(ConfigError::TooLarge("interval", _))));

        let at_limit = Settings {
            interval_secs: MAX_INTERVAL_SECS,
            ..Settings::default()
        };
        assert!(at_limit.validate().is_ok());

        let slow = Settings {
            timeout_secs: MAX_TIMEOUT_SECS + 1,
            ..Settings::default()
        };
        assert!(matches!(slow.validate(), Err(ConfigError::TooLarge("timeout", _))));
    }
}
