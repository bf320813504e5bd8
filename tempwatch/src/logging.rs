//! tracing setup. The TUI owns the terminal, so interactive runs log to a file.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

pub fn log_path(config_dir: &Path) -> PathBuf {
    config_dir.join("tempwatch.log")
}

pub fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))
}

/// RUST_LOG wins; otherwise `default_directive` (e.g. "info").
///
/// An unusable log file is not fatal: events are discarded and the open error comes
/// back as `Ok(Some(_))` for the caller to report.
pub fn init(target: LogTarget, default_directive: &str) -> Result<Option<anyhow::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let unusable = match target {
        LogTarget::Stderr => {
            builder.with_writer(std::io::stderr).try_init().map_err(|e| anyhow!(e))?;
            None
        }
        LogTarget::File(path) => match open_log_file(&path) {
            Ok(file) => {
                builder
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .try_init()
                    .map_err(|e| anyhow!(e))?;
                None
            }
            Err(e) => {
                builder.with_writer(std::io::sink).try_init().map_err(|e| anyhow!(e))?;
                Some(e)
            }
        },
    };
    Ok(unusable)
}
