//! Theme support.
//!
//! This crate ships no color palettes or theme catalogs of its own — which
//! concrete colors a `Variant` resolves to is entirely up to the host
//! application (see [`variant::ThemeResolver`]). What lives here is the
//! shared vocabulary a host uses to describe those colors: [`ThemeColor`]
//! (terminal-default / ANSI index / RGB / parsed string) and OKLCH-based
//! color math in [`modifiers`].
//!
//! # Color Types
//!
//! - `ThemeColor::Default` - Uses terminal's default color
//! - `ThemeColor::Ansi(n)` - ANSI palette index (0-255)
//! - `ThemeColor::Rgb(rgba)` - Explicit RGB color
//! - `ThemeColor::Str(s)` - String to be parsed (hex, oklch, etc.)

use crate::types::Rgba;

pub mod modifiers;
pub mod variant;

pub use modifiers::*;
pub use variant::{
    clear_theme_resolver, get_variant_style, resolve_registered_variant, set_theme_resolver,
    variant_style, ThemeResolver, Variant, VariantStyle,
};

// =============================================================================
// ThemeColor - A color that can be ANSI, RGB, or string
// =============================================================================

/// Theme color can be:
/// - `Default`: Terminal's default color
/// - `Ansi(n)`: ANSI palette index (0-255)
/// - `Rgb(rgba)`: Explicit RGB color
/// - `Str(s)`: String to be parsed (hex, oklch, etc.)
#[derive(Debug, Clone, PartialEq)]
pub enum ThemeColor {
    /// Use terminal's default color.
    Default,
    /// ANSI palette index (0-255).
    /// - 0-7: Standard colors
    /// - 8-15: Bright colors
    /// - 16-231: 6x6x6 RGB cube
    /// - 232-255: Grayscale
    Ansi(u8),
    /// Explicit RGB color.
    Rgb(Rgba),
    /// String to be parsed (hex, oklch, etc.).
    Str(String),
}

impl ThemeColor {
    /// Resolve to Rgba. Parses string if needed.
    ///
    /// - `Default` returns `Rgba::TERMINAL_DEFAULT`
    /// - `Ansi(n)` returns `Rgba::ansi(n)`
    /// - `Rgb(c)` returns the color directly
    /// - `Str(s)` parses the string, returning magenta on parse failure
    pub fn resolve(&self) -> Rgba {
        match self {
            Self::Default => Rgba::TERMINAL_DEFAULT,
            Self::Ansi(i) => Rgba::ansi(*i),
            Self::Rgb(c) => *c,
            Self::Str(s) => Rgba::parse(s).unwrap_or(Rgba::MAGENTA),
        }
    }

    /// Check if this is the terminal default.
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    /// Check if this is an ANSI color.
    pub fn is_ansi(&self) -> bool {
        matches!(self, Self::Ansi(_))
    }

    /// Check if this is an RGB color.
    pub fn is_rgb(&self) -> bool {
        matches!(self, Self::Rgb(_))
    }
}

// =============================================================================
// From implementations for ergonomic construction
// =============================================================================

impl Default for ThemeColor {
    fn default() -> Self {
        Self::Default
    }
}

/// `()` means terminal default.
impl From<()> for ThemeColor {
    fn from(_: ()) -> Self {
        Self::Default
    }
}

/// `u8` is an ANSI index.
impl From<u8> for ThemeColor {
    fn from(index: u8) -> Self {
        Self::Ansi(index)
    }
}

/// `Rgba` is an RGB color.
impl From<Rgba> for ThemeColor {
    fn from(color: Rgba) -> Self {
        Self::Rgb(color)
    }
}

/// `&str` is a string to parse.
impl From<&str> for ThemeColor {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

/// `String` is a string to parse.
impl From<String> for ThemeColor {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

/// `u32` is an RGB integer (0xRRGGBB).
impl From<u32> for ThemeColor {
    fn from(rgb: u32) -> Self {
        Self::Rgb(Rgba::from_rgb_int(rgb))
    }
}

/// `Option<u32>` - None is default, Some is RGB.
impl From<Option<u32>> for ThemeColor {
    fn from(opt: Option<u32>) -> Self {
        match opt {
            None => Self::Default,
            Some(rgb) => Self::Rgb(Rgba::from_rgb_int(rgb)),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_color_default() {
        let color = ThemeColor::Default;
        assert!(color.is_default());
        assert!(!color.is_ansi());
        assert!(!color.is_rgb());
        assert!(color.resolve().is_terminal_default());
    }

    #[test]
    fn test_theme_color_ansi() {
        let color = ThemeColor::Ansi(12);
        assert!(!color.is_default());
        assert!(color.is_ansi());
        assert!(!color.is_rgb());

        let resolved = color.resolve();
        assert!(resolved.is_ansi());
        assert_eq!(resolved.ansi_index(), 12);
    }

    #[test]
    fn test_theme_color_rgb() {
        let color = ThemeColor::Rgb(Rgba::rgb(255, 0, 0));
        assert!(!color.is_default());
        assert!(!color.is_ansi());
        assert!(color.is_rgb());

        let resolved = color.resolve();
        assert_eq!(resolved, Rgba::rgb(255, 0, 0));
    }

    #[test]
    fn test_theme_color_str_hex() {
        let color = ThemeColor::Str("#ff0000".to_string());
        let resolved = color.resolve();
        assert_eq!(resolved, Rgba::rgb(255, 0, 0));
    }

    #[test]
    fn test_theme_color_str_oklch() {
        let color = ThemeColor::Str("oklch(0.75 0.15 300)".to_string());
        let resolved = color.resolve();
        // Should be purple-ish (high blue)
        assert!(resolved.b > 200);
    }

    #[test]
    fn test_theme_color_str_invalid() {
        let color = ThemeColor::Str("invalid".to_string());
        let resolved = color.resolve();
        // Falls back to magenta
        assert_eq!(resolved, Rgba::MAGENTA);
    }

    #[test]
    fn test_theme_color_from_unit() {
        let color: ThemeColor = ().into();
        assert!(color.is_default());
    }

    #[test]
    fn test_theme_color_from_u8() {
        let color: ThemeColor = 12u8.into();
        assert_eq!(color, ThemeColor::Ansi(12));
    }

    #[test]
    fn test_theme_color_from_rgba() {
        let color: ThemeColor = Rgba::RED.into();
        assert_eq!(color, ThemeColor::Rgb(Rgba::RED));
    }

    #[test]
    fn test_theme_color_from_str() {
        let color: ThemeColor = "#ff0000".into();
        assert_eq!(color, ThemeColor::Str("#ff0000".to_string()));
    }

    #[test]
    fn test_theme_color_from_u32() {
        let color: ThemeColor = 0xff0000u32.into();
        assert_eq!(color, ThemeColor::Rgb(Rgba::rgb(255, 0, 0)));
    }

    #[test]
    fn test_theme_color_from_option_none() {
        let color: ThemeColor = None.into();
        assert!(color.is_default());
    }

    #[test]
    fn test_theme_color_from_option_some() {
        let color: ThemeColor = Some(0xff0000u32).into();
        assert_eq!(color, ThemeColor::Rgb(Rgba::rgb(255, 0, 0)));
    }
}
