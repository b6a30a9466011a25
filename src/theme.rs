use ratatui::style::Color;

pub const FOREGROUND: Color = Color::Rgb(168, 163, 159); // #A8A39F
pub const DIMMED: Color = Color::Rgb(85, 84, 69); // #555445
pub const GOOD: Color = Color::Rgb(71, 154, 67); // #479A43
pub const BAD: Color = Color::Rgb(152, 41, 15); // #98290F
pub const WARN: Color = Color::Rgb(127, 113, 17); // #7F7111
pub const ACCENT: Color = Color::Rgb(73, 127, 125); // #497F7D
