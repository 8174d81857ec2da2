use colored::Color;

pub const PRIMARY: Color = Color::BrightGreen;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;
pub const ACCENT: Color = Color::Cyan;

pub const KEPT: Color = Color::Green;
pub const DROPPED: Color = Color::Red;
