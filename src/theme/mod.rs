//! Theme System for spark-storyboard.
//!
//! Two modes, light and dark, each with a fixed [`Palette`]. The active mode
//! lives in a process-wide cell ([`state`]) and is persisted through a
//! [`ThemeStore`].
//!
//! # Example
//!
//! ```rust
//! use spark_storyboard::theme::{Palette, ThemeMode};
//!
//! let dark = Palette::for_mode(ThemeMode::Dark);
//! assert_ne!(dark.background, Palette::for_mode(ThemeMode::Light).background);
//! assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::ColorToken;
use crate::types::Rgba;

pub mod state;
pub mod store;

pub use state::{active_mode, init_theme, reset_theme_state, set_mode, subscribe, toggle_theme};
pub use store::{
    mode_from_colorfgbg, system_mode, FileThemeStore, MemoryThemeStore, ThemeStore, THEME_KEY,
};

// =============================================================================
// ThemeMode
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Palette
// =============================================================================

/// Semantic colors for one mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub mode: ThemeMode,
    pub background: Rgba,
    pub surface: Rgba,
    pub text: Rgba,
    pub text_muted: Rgba,
    pub border: Rgba,
    pub track: Rgba,
    pub success: Rgba,
    pub primary: Rgba,
    pub badge: Rgba,
}

const LIGHT: Palette = Palette {
    mode: ThemeMode::Light,
    background: Rgba::from_rgb_int(0xf9fafb), // gray-50
    surface: Rgba::from_rgb_int(0xffffff),
    text: Rgba::from_rgb_int(0x111827),       // gray-900
    text_muted: Rgba::from_rgb_int(0x6b7280), // gray-500
    border: Rgba::from_rgb_int(0xe5e7eb),     // gray-200
    track: Rgba::from_rgb_int(0xe5e7eb),
    success: Rgba::from_rgb_int(0x16a34a), // green-600
    primary: Rgba::from_rgb_int(0x2563eb), // blue-600
    badge: Rgba::from_rgb_int(0xf3f4f6),   // gray-100
};

const DARK: Palette = Palette {
    mode: ThemeMode::Dark,
    background: Rgba::from_rgb_int(0x030712), // gray-950
    surface: Rgba::from_rgb_int(0x111827),    // gray-900
    text: Rgba::from_rgb_int(0xf9fafb),
    text_muted: Rgba::from_rgb_int(0x9ca3af), // gray-400
    border: Rgba::from_rgb_int(0x374151),     // gray-700
    track: Rgba::from_rgb_int(0x1f2937),      // gray-800
    success: Rgba::from_rgb_int(0x4ade80),    // green-400
    primary: Rgba::from_rgb_int(0x60a5fa),    // blue-400
    badge: Rgba::from_rgb_int(0x1f2937),
};

impl Palette {
    pub const fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => LIGHT,
            ThemeMode::Dark => DARK,
        }
    }

    /// Accent color of a catalog token. Dark mode uses the lighter shade.
    pub fn token(&self, token: ColorToken) -> Rgba {
        let (light, dark) = match token {
            ColorToken::Blue => (0x2563eb, 0x60a5fa),
            ColorToken::Purple => (0x9333ea, 0xc084fc),
            ColorToken::Green => (0x16a34a, 0x4ade80),
            ColorToken::Red => (0xdc2626, 0xf87171),
            ColorToken::Orange => (0xea580c, 0xfb923c),
            ColorToken::Indigo => (0x4f46e5, 0x818cf8),
            ColorToken::Pink => (0xdb2777, 0xf472b6),
            ColorToken::Teal => (0x0d9488, 0x2dd4bf),
            ColorToken::Emerald => (0x059669, 0x34d399),
            ColorToken::Rose => (0xe11d48, 0xfb7185),
        };
        match self.mode {
            ThemeMode::Light => Rgba::from_rgb_int(light),
            ThemeMode::Dark => Rgba::from_rgb_int(dark),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::for_mode(ThemeMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse_and_display() {
        assert_eq!(ThemeMode::parse("dark"), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::parse("light"), Some(ThemeMode::Light));
        assert_eq!(ThemeMode::parse("sepia"), None);
        assert_eq!(ThemeMode::Dark.to_string(), "dark");
    }

    #[test]
    fn test_toggle_roundtrip() {
        assert_eq!(ThemeMode::Light.toggled().toggled(), ThemeMode::Light);
    }

    #[test]
    fn test_token_depends_on_mode() {
        let light = Palette::for_mode(ThemeMode::Light);
        let dark = Palette::for_mode(ThemeMode::Dark);
        assert_eq!(light.token(ColorToken::Blue), Rgba::from_rgb_int(0x2563eb));
        assert_eq!(dark.token(ColorToken::Blue), Rgba::from_rgb_int(0x60a5fa));
    }
}
