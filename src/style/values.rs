//! Length values
//!
//! Typed lengths as stored in the property table. The engine keeps values
//! in their declared unit; consumers resolve them against whatever base is
//! appropriate (font size, viewport, containing box) at layout time.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Length units understood by the value grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthUnit {
  /// Pixels (px) - reference unit; bare numbers parse as px
  Px,
  /// Points (pt) - 1/72nd of an inch
  Pt,
  /// Em units - relative to the element's font size
  Em,
  /// Rem units - relative to the root font size
  Rem,
  /// Viewport width percentage (vw)
  Vw,
  /// Viewport height percentage (vh)
  Vh,
  /// Percentage (%) - relative to a caller-provided base
  Percent,
}

impl LengthUnit {
  /// Returns true for units with a fixed physical size (px, pt)
  pub fn is_absolute(self) -> bool {
    matches!(self, Self::Px | Self::Pt)
  }

  /// Returns true for em/rem
  pub fn is_font_relative(self) -> bool {
    matches!(self, Self::Em | Self::Rem)
  }

  /// Returns true for vw/vh
  pub fn is_viewport_relative(self) -> bool {
    matches!(self, Self::Vw | Self::Vh)
  }

  /// Canonical unit suffix
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Px => "px",
      Self::Pt => "pt",
      Self::Em => "em",
      Self::Rem => "rem",
      Self::Vw => "vw",
      Self::Vh => "vh",
      Self::Percent => "%",
    }
  }
}

impl fmt::Display for LengthUnit {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// A length value with its declared unit.
///
/// # Examples
///
/// ```
/// use faststyle::Length;
///
/// let length = Length::px(100.0);
/// assert_eq!(length.to_px(), 100.0);
///
/// let percent = Length::percent(50.0);
/// assert_eq!(percent.resolve_against(200.0), Some(100.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
  /// The numeric value
  pub value: f32,
  /// The unit
  pub unit: LengthUnit,
}

impl Length {
  /// Creates a new length with the given value and unit
  pub const fn new(value: f32, unit: LengthUnit) -> Self {
    Self { value, unit }
  }

  /// Creates a length in pixels
  pub const fn px(value: f32) -> Self {
    Self::new(value, LengthUnit::Px)
  }

  /// Creates a length in points
  pub const fn pt(value: f32) -> Self {
    Self::new(value, LengthUnit::Pt)
  }

  /// Creates a length in em units
  pub const fn em(value: f32) -> Self {
    Self::new(value, LengthUnit::Em)
  }

  /// Creates a length in rem units
  pub const fn rem(value: f32) -> Self {
    Self::new(value, LengthUnit::Rem)
  }

  /// Creates a percentage value
  pub const fn percent(value: f32) -> Self {
    Self::new(value, LengthUnit::Percent)
  }

  /// Zero pixels
  pub const fn zero() -> Self {
    Self::px(0.0)
  }

  /// Converts this length to pixels.
  ///
  /// Absolute units convert exactly; relative units fall back to the raw
  /// numeric value when no context is available. Use the resolve helpers
  /// for context-aware resolution.
  pub fn to_px(self) -> f32 {
    match self.unit {
      LengthUnit::Px => self.value,
      LengthUnit::Pt => self.value * (96.0 / 72.0),
      _ => self.value,
    }
  }

  /// Resolves this length against a percentage base.
  ///
  /// Returns `None` when the unit needs different context (font size,
  /// viewport).
  pub fn resolve_against(self, percentage_base: f32) -> Option<f32> {
    match self.unit {
      LengthUnit::Percent => Some((self.value / 100.0) * percentage_base),
      _ if self.unit.is_absolute() => Some(self.to_px()),
      _ => None,
    }
  }

  /// Resolves this length using a font size (for em/rem units)
  pub fn resolve_with_font_size(self, font_size_px: f32) -> Option<f32> {
    match self.unit {
      LengthUnit::Em | LengthUnit::Rem => Some(self.value * font_size_px),
      _ if self.unit.is_absolute() => Some(self.to_px()),
      _ => None,
    }
  }

  /// Resolves this length using viewport dimensions
  pub fn resolve_with_viewport(self, viewport_width: f32, viewport_height: f32) -> Option<f32> {
    match self.unit {
      LengthUnit::Vw => Some((self.value / 100.0) * viewport_width),
      LengthUnit::Vh => Some((self.value / 100.0) * viewport_height),
      _ if self.unit.is_absolute() => Some(self.to_px()),
      _ => None,
    }
  }

  /// Returns true if this is a zero length
  pub fn is_zero(self) -> bool {
    self.value == 0.0
  }
}

impl Hash for Length {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.value.to_bits().hash(state);
    self.unit.hash(state);
  }
}

impl fmt::Display for Length {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}{}", self.value, self.unit)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_unit_classification() {
    assert!(LengthUnit::Px.is_absolute());
    assert!(LengthUnit::Pt.is_absolute());
    assert!(LengthUnit::Em.is_font_relative());
    assert!(LengthUnit::Rem.is_font_relative());
    assert!(LengthUnit::Vw.is_viewport_relative());
    assert!(!LengthUnit::Percent.is_absolute());
  }

  #[test]
  fn test_to_px() {
    assert_eq!(Length::px(100.0).to_px(), 100.0);
    assert!((Length::pt(72.0).to_px() - 96.0).abs() < 0.01);
  }

  #[test]
  fn test_percentage_resolution() {
    assert_eq!(Length::percent(50.0).resolve_against(200.0), Some(100.0));
    assert_eq!(Length::px(75.0).resolve_against(200.0), Some(75.0));
    assert_eq!(Length::em(2.0).resolve_against(200.0), None);
  }

  #[test]
  fn test_font_size_resolution() {
    assert_eq!(Length::em(2.0).resolve_with_font_size(16.0), Some(32.0));
    assert_eq!(Length::rem(1.5).resolve_with_font_size(16.0), Some(24.0));
  }

  #[test]
  fn test_viewport_resolution() {
    let vw = Length::new(50.0, LengthUnit::Vw);
    assert_eq!(vw.resolve_with_viewport(800.0, 600.0), Some(400.0));
    let vh = Length::new(50.0, LengthUnit::Vh);
    assert_eq!(vh.resolve_with_viewport(800.0, 600.0), Some(300.0));
  }

  #[test]
  fn test_display() {
    assert_eq!(format!("{}", Length::px(100.0)), "100px");
    assert_eq!(format!("{}", Length::percent(50.0)), "50%");
  }
}
