use ratatui::style::Color;

pub(crate) const ACCENT: Color = Color::Rgb(152, 0, 0);
pub(crate) const ACCENT_DIM: Color = Color::Rgb(96, 0, 0);
pub(crate) const SUCCESS: Color = Color::Rgb(0, 255, 0);
pub(crate) const WARNING: Color = Color::Yellow;
pub(crate) const MUTED: Color = Color::Rgb(102, 102, 102);
pub(crate) const SELECTION: Color = Color::Rgb(45, 45, 50);
