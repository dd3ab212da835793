//! Button and chrome colors.
//!
//! The defaults reproduce the classic calculator look: dark gray digit
//! keys, orange operator keys, light gray function keys, white labels.
//! Button colors can be overridden with hex strings in the config file.

use ratatui::style::Color;

use crate::config::ColorOverrides;
use crate::keypad::Category;

/// Theme colors for the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub digit: Color,    // Digit and decimal-point keys
    pub operator: Color, // Arithmetic keys and equals
    pub function: Color, // AC, sign toggle, percent
    pub text: Color,     // Button labels and the display string
    pub text_dim: Color, // Expression line, footer hints
    pub accent: Color,   // Cursor border, popup chrome
    pub inactive: Color, // Idle borders
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            digit: Color::Rgb(85, 85, 85),       // #555555
            operator: Color::Rgb(255, 128, 0),   // #FF8000
            function: Color::Rgb(170, 170, 170), // #AAAAAA
            text: Color::Rgb(255, 255, 255),
            text_dim: Color::Rgb(138, 138, 141),
            accent: Color::Rgb(255, 193, 7),
            inactive: Color::Rgb(89, 89, 89),
        }
    }
}

impl Theme {
    /// Build the theme, applying any hex overrides from the config.
    /// Colors that are missing or fail to parse keep their defaults.
    pub fn from_config(colors: &ColorOverrides) -> Self {
        let defaults = Self::default();
        Self {
            digit: resolve("digit", &colors.digit, defaults.digit),
            operator: resolve("operator", &colors.operator, defaults.operator),
            function: resolve("function", &colors.function, defaults.function),
            accent: resolve("accent", &colors.accent, defaults.accent),
            ..defaults
        }
    }

    /// The fill color for a button of the given category.
    pub fn button_color(&self, category: Category) -> Color {
        match category {
            Category::Digit => self.digit,
            Category::Operator => self.operator,
            Category::Function => self.function,
        }
    }
}

fn resolve(name: &str, hex: &Option<String>, fallback: Color) -> Color {
    match hex {
        Some(s) => parse_hex_color(s).unwrap_or_else(|| {
            tracing::warn!("Invalid color '{}' for '{}', using default", s, name);
            fallback
        }),
        None => fallback,
    }
}

/// Parse a hex color string (#RRGGBB or #RGB)
fn parse_hex_color(s: &str) -> Option<Color> {
    let s = s.trim().trim_start_matches('#');

    if s.len() == 6 {
        let r = u8::from_str_radix(&s[0..2], 16).ok()?;
        let g = u8::from_str_radix(&s[2..4], 16).ok()?;
        let b = u8::from_str_radix(&s[4..6], 16).ok()?;
        Some(Color::Rgb(r, g, b))
    } else if s.len() == 3 {
        let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
        let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
        let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
        Some(Color::Rgb(r, g, b))
    } else {
        None
    }
}
