//! Library surface for tempwatch (used by the binary and integration tests).

pub mod app;
pub mod cli;
pub mod config;
pub mod history;
pub mod logging;
pub mod presenter;
pub mod sampler;
pub mod source;
pub mod trend;
pub mod types;
pub mod ui;
