//! Color values
//!
//! Styles store colors as [`Rgba`]: 8-bit RGB channels plus a floating
//! point alpha. Parsing accepts every CSS color form (`#hex`, `rgb()`,
//! `hsl()`, named colors) via the `csscolorparser` crate.

use std::fmt;
use std::hash::{Hash, Hasher};

/// RGBA color representation
///
/// - R, G, B: 0-255 (stored as u8)
/// - A: 0.0-1.0 (stored as f32, where 0.0 is fully transparent)
///
/// # Examples
///
/// ```
/// use faststyle::Rgba;
///
/// let red = Rgba::new(255, 0, 0, 1.0);
/// let semi = red.with_alpha(0.5);
/// assert!(!semi.is_opaque());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
  /// Red component (0-255)
  pub r: u8,
  /// Green component (0-255)
  pub g: u8,
  /// Blue component (0-255)
  pub b: u8,
  /// Alpha component (0.0-1.0)
  pub a: f32,
}

impl Rgba {
  /// Fully transparent black
  pub const TRANSPARENT: Self = Self {
    r: 0,
    g: 0,
    b: 0,
    a: 0.0,
  };

  /// Opaque black
  pub const BLACK: Self = Self {
    r: 0,
    g: 0,
    b: 0,
    a: 1.0,
  };

  /// Opaque white
  pub const WHITE: Self = Self {
    r: 255,
    g: 255,
    b: 255,
    a: 1.0,
  };

  /// Creates a new RGBA color
  pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
    Self { r, g, b, a }
  }

  /// Creates an opaque RGB color
  pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
    Self { r, g, b, a: 1.0 }
  }

  /// Returns true if this color is fully transparent
  pub fn is_transparent(self) -> bool {
    self.a <= 0.0
  }

  /// Returns true if this color is fully opaque
  pub fn is_opaque(self) -> bool {
    self.a >= 1.0
  }

  /// Returns this color with a different alpha
  pub fn with_alpha(self, alpha: f32) -> Self {
    Self {
      a: alpha.clamp(0.0, 1.0),
      ..self
    }
  }

  /// Parses a CSS color string (`#rgb`, `#rrggbb`, `rgb()`, `rgba()`,
  /// `hsl()`, named colors).
  ///
  /// Returns `None` when the input is not a color, so callers can keep
  /// probing other value forms.
  ///
  /// # Examples
  ///
  /// ```
  /// use faststyle::Rgba;
  ///
  /// assert_eq!(Rgba::parse("#ff0000"), Some(Rgba::rgb(255, 0, 0)));
  /// assert_eq!(Rgba::parse("transparent"), Some(Rgba::TRANSPARENT));
  /// assert_eq!(Rgba::parse("4px"), None);
  /// ```
  pub fn parse(input: &str) -> Option<Self> {
    let color = csscolorparser::parse(input.trim()).ok()?;
    let [r, g, b, a] = color.to_rgba8();
    Some(Self::new(r, g, b, a as f32 / 255.0))
  }
}

impl Hash for Rgba {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.r.hash(state);
    self.g.hash(state);
    self.b.hash(state);
    self.a.to_bits().hash(state);
  }
}

impl fmt::Display for Rgba {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_opaque() {
      write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    } else {
      write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_hex() {
    assert_eq!(Rgba::parse("#ff0000"), Some(Rgba::rgb(255, 0, 0)));
    assert_eq!(Rgba::parse("#000"), Some(Rgba::BLACK));
  }

  #[test]
  fn test_parse_functional() {
    assert_eq!(Rgba::parse("rgb(0, 255, 0)"), Some(Rgba::rgb(0, 255, 0)));
    let semi = Rgba::parse("rgba(0, 0, 255, 0.5)").unwrap();
    assert_eq!((semi.r, semi.g, semi.b), (0, 0, 255));
    assert!((semi.a - 0.5).abs() < 0.01);
  }

  #[test]
  fn test_parse_named() {
    assert_eq!(Rgba::parse("white"), Some(Rgba::WHITE));
    assert_eq!(Rgba::parse("transparent"), Some(Rgba::TRANSPARENT));
  }

  #[test]
  fn test_parse_rejects_non_colors() {
    assert_eq!(Rgba::parse("solid"), None);
    assert_eq!(Rgba::parse("12px"), None);
    assert_eq!(Rgba::parse(""), None);
  }

  #[test]
  fn test_display() {
    assert_eq!(format!("{}", Rgba::rgb(255, 0, 0)), "#ff0000");
  }

  #[test]
  fn test_with_alpha_clamps() {
    assert_eq!(Rgba::BLACK.with_alpha(2.0).a, 1.0);
    assert_eq!(Rgba::BLACK.with_alpha(-1.0).a, 0.0);
  }
}
