//! Color schemes for the terminal chrome.
//!
//! Slice colors come from the chart palette and never change with the
//! scheme; these colors cover borders, text, header, status bar and
//! overlays. Dark, light and colorblind-friendly variants are provided.

use std::str::FromStr;

use ratatui::style::Color;

/// Color scheme for the storage-report TUI.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScheme {
    /// Highlight for the selected slice and focused chart
    pub selected: Color,

    // Text colors
    /// Primary text color
    pub text: Color,
    /// Dimmed/secondary text color
    pub text_dim: Color,
    /// Border color for panels/frames
    pub border: Color,

    // Header colors
    pub header_fg: Color,
    pub header_bg: Color,
    /// Accent color for titles and the Analyze trigger
    pub accent: Color,
    /// Path and drive display color
    pub path_fg: Color,
    pub hint_fg: Color,

    // Status bar colors
    pub status_fg: Color,
    pub status_bg: Color,
    /// Size display color
    pub size_fg: Color,
    /// Busy spinner color
    pub busy_fg: Color,
    /// Key shortcut color
    pub key_fg: Color,
    pub error_fg: Color,
    pub warning_fg: Color,

    /// Solid background behind tooltips and the help overlay
    pub overlay_bg: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl ColorScheme {
    /// High-contrast theme for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            selected: Color::Rgb(255, 215, 0), // Gold highlight

            text: Color::Rgb(248, 248, 242),     // Off-white
            text_dim: Color::Rgb(136, 136, 136), // Medium gray
            border: Color::Rgb(98, 114, 164),    // Muted purple-blue

            header_fg: Color::Rgb(248, 248, 242),
            header_bg: Color::Rgb(40, 42, 54),
            accent: Color::Rgb(189, 147, 249), // Purple accent
            path_fg: Color::Rgb(139, 233, 253), // Cyan
            hint_fg: Color::Rgb(98, 114, 164),

            status_fg: Color::Rgb(248, 248, 242),
            status_bg: Color::Rgb(68, 71, 90),
            size_fg: Color::Rgb(80, 250, 123),  // Green for sizes
            busy_fg: Color::Rgb(241, 250, 140), // Yellow spinner
            key_fg: Color::Rgb(255, 184, 108),  // Orange for keys
            error_fg: Color::Rgb(255, 85, 85),
            warning_fg: Color::Rgb(255, 184, 108),

            overlay_bg: Color::Rgb(25, 25, 35),
        }
    }

    /// Darker, more saturated colors that stay readable on light backgrounds.
    pub fn light() -> Self {
        Self {
            selected: Color::Rgb(0, 100, 200), // Strong blue

            text: Color::Rgb(30, 30, 30),
            text_dim: Color::Rgb(100, 100, 100),
            border: Color::Rgb(80, 80, 120),

            header_fg: Color::Rgb(30, 30, 30),
            header_bg: Color::Rgb(230, 230, 235),
            accent: Color::Rgb(100, 60, 180),
            path_fg: Color::Rgb(0, 100, 150),
            hint_fg: Color::Rgb(120, 120, 140),

            status_fg: Color::Rgb(30, 30, 30),
            status_bg: Color::Rgb(210, 210, 220),
            size_fg: Color::Rgb(22, 130, 80),
            busy_fg: Color::Rgb(180, 140, 0),
            key_fg: Color::Rgb(180, 100, 50),
            error_fg: Color::Rgb(180, 30, 30),
            warning_fg: Color::Rgb(180, 100, 50),

            overlay_bg: Color::Rgb(245, 245, 250),
        }
    }

    /// Colorblind-friendly chrome.
    ///
    /// Relies on luminance contrast and the blue-orange axis, which survives
    /// the common forms of color vision deficiency.
    pub fn colorblind() -> Self {
        Self {
            selected: Color::Rgb(255, 255, 255), // White for maximum contrast

            text: Color::Rgb(255, 255, 255),
            text_dim: Color::Rgb(170, 170, 170),
            border: Color::Rgb(136, 136, 136),

            header_fg: Color::Rgb(255, 255, 255),
            header_bg: Color::Rgb(40, 40, 50),
            accent: Color::Rgb(86, 180, 233),  // CVD-safe blue
            path_fg: Color::Rgb(240, 228, 66), // CVD-safe yellow
            hint_fg: Color::Rgb(153, 153, 153),

            status_fg: Color::Rgb(255, 255, 255),
            status_bg: Color::Rgb(60, 60, 70),
            size_fg: Color::Rgb(0, 158, 115), // CVD-safe bluish green
            busy_fg: Color::Rgb(240, 228, 66),
            key_fg: Color::Rgb(230, 159, 0), // CVD-safe orange
            error_fg: Color::Rgb(213, 94, 0), // CVD-safe vermillion
            warning_fg: Color::Rgb(230, 159, 0),

            overlay_bg: Color::Rgb(25, 25, 35),
        }
    }
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "default" | "dark" => Ok(Self::dark()),
            "light" => Ok(Self::light()),
            "colorblind" => Ok(Self::colorblind()),
            other => Err(format!(
                "unknown color scheme '{}' (expected default, dark, light or colorblind)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scheme() {
        assert_eq!(ColorScheme::default(), ColorScheme::dark());
    }

    #[test]
    fn test_light_scheme() {
        let scheme = ColorScheme::light();
        // Light scheme should have dark text
        assert!(matches!(scheme.text, Color::Rgb(30, 30, 30)));
    }

    #[test]
    fn test_colorblind_scheme() {
        let scheme = ColorScheme::colorblind();
        assert!(matches!(scheme.accent, Color::Rgb(86, 180, 233)));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("default".parse::<ColorScheme>().unwrap(), ColorScheme::dark());
        assert_eq!("Light".parse::<ColorScheme>().unwrap(), ColorScheme::light());
        assert_eq!(
            "colorblind".parse::<ColorScheme>().unwrap(),
            ColorScheme::colorblind()
        );
        assert!("neon".parse::<ColorScheme>().is_err());
    }
}
