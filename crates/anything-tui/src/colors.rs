//! Dark theme colors

use ratatui::style::Color;

pub const BG: Color = Color::Rgb(0x12, 0x14, 0x18);
pub const SURFACE: Color = Color::Rgb(0x1c, 0x1f, 0x25);
pub const SURFACE_HIGH: Color = Color::Rgb(0x2a, 0x2f, 0x38);

pub const ON_SURFACE: Color = Color::Rgb(0xe3, 0xe6, 0xeb);
pub const SUBTEXT: Color = Color::Rgb(0xa9, 0xb0, 0xbb);
pub const OUTLINE: Color = Color::Rgb(0x6e, 0x76, 0x82);

pub const PRIMARY: Color = Color::Rgb(0x8a, 0xb4, 0xf8);
pub const HIGHLIGHT: Color = Color::Rgb(0xff, 0xd9, 0x66);

pub const ERROR: Color = Color::Rgb(0xff, 0xb4, 0xab);
