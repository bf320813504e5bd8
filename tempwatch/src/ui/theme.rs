//! Shared UI theme constants.

use ratatui::style::Color;

pub const READING: Color = Color::Cyan;
pub const TREND: Color = Color::Yellow;
pub const VALUE: Color = Color::Green;
pub const MUTED: Color = Color::DarkGray;
pub const HEADER_ROW: Color = Color::Rgb(170, 170, 180);
