//! UI module root: exposes drawing functions for individual panels.

pub mod chart;
pub mod current;
pub mod header;
pub mod readings;
pub mod theme;
