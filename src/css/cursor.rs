//! Token-level value parsing
//!
//! Property values arrive as raw strings. This module splits them into
//! coarse tokens (words, lengths, colors, `name(...)` function calls) and
//! offers a small cursor with try-parse readers: each reader consumes the
//! current token only when it parses, so shorthand handlers can probe the
//! same token for several value shapes and accumulate by type rather than
//! by position.
//!
//! Function calls are kept as single tokens by tracking parenthesis depth,
//! so commas and whitespace inside `linear-gradient(...)` never split the
//! outer value.

use tracing::warn;

use crate::style::color::Rgba;
use crate::style::types::{ColorStop, Gradient};
use crate::style::values::{Length, LengthUnit};

/// Splits a raw value into top-level tokens.
///
/// Whitespace separates tokens; `,` and `/` become standalone tokens; a
/// balanced `name(...)` group stays one token regardless of its contents.
pub fn tokenize_value(input: &str) -> Vec<String> {
  let mut tokens = Vec::new();
  let mut current = String::new();
  let mut depth = 0usize;
  for ch in input.chars() {
    match ch {
      '(' => {
        depth += 1;
        current.push(ch);
      }
      ')' => {
        depth = depth.saturating_sub(1);
        current.push(ch);
      }
      ',' | '/' if depth == 0 => {
        if !current.trim().is_empty() {
          tokens.push(current.trim().to_string());
        }
        current.clear();
        tokens.push(ch.to_string());
      }
      ch if ch.is_whitespace() && depth == 0 => {
        if !current.trim().is_empty() {
          tokens.push(current.trim().to_string());
        }
        current.clear();
      }
      _ => current.push(ch),
    }
  }
  if !current.trim().is_empty() {
    tokens.push(current.trim().to_string());
  }
  tokens
}

/// Splits on commas that are not nested inside parentheses.
pub fn split_top_level_commas(input: &str) -> Vec<&str> {
  let mut parts = Vec::new();
  let mut depth = 0usize;
  let mut start = 0usize;
  for (index, ch) in input.char_indices() {
    match ch {
      '(' => depth += 1,
      ')' => depth = depth.saturating_sub(1),
      ',' if depth == 0 => {
        parts.push(input[start..index].trim());
        start = index + 1;
      }
      _ => {}
    }
  }
  parts.push(input[start..].trim());
  parts.retain(|p| !p.is_empty());
  parts
}

/// Parses a length token: `12px`, `1.5em`, `50%`, or a bare number (pixels).
pub fn parse_length(input: &str) -> Option<Length> {
  let lower = input.trim().to_ascii_lowercase();
  if lower.is_empty() {
    return None;
  }
  for (suffix, unit) in [
    ("rem", LengthUnit::Rem),
    ("em", LengthUnit::Em),
    ("px", LengthUnit::Px),
    ("pt", LengthUnit::Pt),
    ("vw", LengthUnit::Vw),
    ("vh", LengthUnit::Vh),
    ("%", LengthUnit::Percent),
  ] {
    if let Some(rest) = lower.strip_suffix(suffix) {
      if let Ok(value) = rest.trim().parse::<f32>() {
        if value.is_finite() {
          return Some(Length::new(value, unit));
        }
      }
    }
  }
  // Bare numbers read as pixels
  match lower.parse::<f32>() {
    Ok(value) if value.is_finite() => Some(Length::px(value)),
    _ => None,
  }
}

/// Parses a duration token into seconds: `0.3s`, `250ms`, or a bare number
/// of seconds.
pub fn parse_time(input: &str) -> Option<f32> {
  let lower = input.trim().to_ascii_lowercase();
  if let Some(rest) = lower.strip_suffix("ms") {
    return match rest.trim().parse::<f32>() {
      Ok(v) if v.is_finite() => Some(v / 1000.0),
      _ => None,
    };
  }
  if let Some(rest) = lower.strip_suffix('s') {
    return match rest.trim().parse::<f32>() {
      Ok(v) if v.is_finite() => Some(v),
      _ => None,
    };
  }
  None
}

/// Parses a textual angle token (`45deg`, bare number in degrees) into the
/// text convention where 0 degrees points up.
pub fn parse_angle_degrees(input: &str) -> Option<f32> {
  let lower = input.trim().to_ascii_lowercase();
  let rest = lower.strip_suffix("deg").unwrap_or(&lower);
  match rest.trim().parse::<f32>() {
    Ok(v) if v.is_finite() => Some(v),
    _ => None,
  }
}

/// Converts a text-convention angle (0 degrees = up, clockwise) to storage
/// radians (0 = local +X), normalized to [0, 2pi).
pub fn text_angle_to_radians(degrees: f32) -> f32 {
  (90.0 - degrees).rem_euclid(360.0).to_radians()
}

/// Storage radians for `to top|right|bottom|left`: the fixed cardinal
/// table 90/0/270/180 degrees.
pub fn direction_angle(word: &str) -> Option<f32> {
  let degrees = match word {
    w if w.eq_ignore_ascii_case("top") => 90.0,
    w if w.eq_ignore_ascii_case("right") => 0.0,
    w if w.eq_ignore_ascii_case("bottom") => 270.0,
    w if w.eq_ignore_ascii_case("left") => 180.0,
    _ => return None,
  };
  Some((degrees as f32).to_radians())
}

/// Cursor over the tokens of one raw value.
///
/// Readers consume the current token only on a successful parse, which is
/// what lets shorthand handlers accumulate values by type in any order.
#[derive(Debug)]
pub struct ValueCursor {
  tokens: Vec<String>,
  index: usize,
}

impl ValueCursor {
  pub fn new(input: &str) -> Self {
    Self {
      tokens: tokenize_value(input),
      index: 0,
    }
  }

  /// True once every token has been consumed.
  pub fn is_exhausted(&self) -> bool {
    self.index >= self.tokens.len()
  }

  /// The current token without consuming it.
  pub fn peek(&self) -> Option<&str> {
    self.tokens.get(self.index).map(|s| s.as_str())
  }

  /// Skips the current token.
  pub fn advance(&mut self) {
    self.index += 1;
  }

  /// Consumes and returns the current token.
  pub fn read_word(&mut self) -> Option<String> {
    let token = self.tokens.get(self.index)?.clone();
    self.index += 1;
    Some(token)
  }

  /// True when the current token equals `keyword` (ASCII case-insensitive).
  pub fn peek_keyword(&self, keyword: &str) -> bool {
    self.peek().map_or(false, |t| t.eq_ignore_ascii_case(keyword))
  }

  /// Consumes the current token when it equals `keyword`.
  pub fn read_keyword(&mut self, keyword: &str) -> bool {
    if self.peek_keyword(keyword) {
      self.index += 1;
      true
    } else {
      false
    }
  }

  /// Consumes the current token when it is one of `set`, returning the
  /// canonical `'static` spelling.
  pub fn read_keyword_of(&mut self, set: &'static [&'static str]) -> Option<&'static str> {
    let token = self.peek()?;
    let found = set.iter().copied().find(|k| token.eq_ignore_ascii_case(k))?;
    self.index += 1;
    Some(found)
  }

  /// Consumes the current token when it parses as a length.
  pub fn read_length(&mut self) -> Option<Length> {
    let length = parse_length(self.peek()?)?;
    self.index += 1;
    Some(length)
  }

  /// Consumes the current token when it parses as a bare float (no unit).
  pub fn read_float(&mut self) -> Option<f32> {
    let value = self.peek()?.parse::<f32>().ok().filter(|v| v.is_finite())?;
    self.index += 1;
    Some(value)
  }

  /// Consumes the current token when it parses as a duration with a unit.
  pub fn read_time(&mut self) -> Option<f32> {
    let seconds = parse_time(self.peek()?)?;
    self.index += 1;
    Some(seconds)
  }

  /// Consumes the current token when it parses as a color.
  pub fn read_color(&mut self) -> Option<Rgba> {
    let color = Rgba::parse(self.peek()?)?;
    self.index += 1;
    Some(color)
  }

  /// Consumes a standalone `/` separator.
  pub fn read_slash(&mut self) -> bool {
    if self.peek() == Some("/") {
      self.index += 1;
      true
    } else {
      false
    }
  }

  /// Consumes the current token when it has the shape `name(args)`,
  /// returning the lowercased name and the raw argument text.
  pub fn read_function(&mut self) -> Option<(String, String)> {
    let token = self.peek()?;
    let open = token.find('(')?;
    if !token.ends_with(')') {
      return None;
    }
    let name = token[..open].trim().to_ascii_lowercase();
    if name.is_empty() {
      return None;
    }
    let args = token[open + 1..token.len() - 1].to_string();
    self.index += 1;
    Some((name, args))
  }
}

/// Parses a gradient function value.
///
/// Supports `linear-gradient(...)`, `radial-gradient(...)` and their
/// `repeating-` forms. Linear gradients accept a leading `to <side>`
/// direction or a textual angle; everything else is read as color stops
/// (`<color> [position]`). Returns `None` with a warning when fewer than
/// two stops parse.
pub fn parse_gradient(input: &str) -> Option<Gradient> {
  let trimmed = input.trim();
  let lower = trimmed.to_ascii_lowercase();
  let (inner, radial, repeating) = if let Some(rest) = strip_call(&lower, "linear-gradient") {
    (rest, false, false)
  } else if let Some(rest) = strip_call(&lower, "repeating-linear-gradient") {
    (rest, false, true)
  } else if let Some(rest) = strip_call(&lower, "radial-gradient") {
    (rest, true, false)
  } else if let Some(rest) = strip_call(&lower, "repeating-radial-gradient") {
    (rest, true, true)
  } else {
    return None;
  };

  let parts = split_top_level_commas(inner);
  if parts.is_empty() {
    return None;
  }

  let mut stops = Vec::new();
  let mut angle = text_angle_to_radians(180.0); // default: to bottom
  let mut first_is_stop = true;

  if !radial {
    let mut cursor = ValueCursor::new(parts[0]);
    if cursor.read_keyword("to") {
      if let Some(dir) = cursor.read_word().as_deref().and_then(direction_angle) {
        angle = dir;
        first_is_stop = false;
      } else {
        warn!(part = parts[0], "unsupported gradient direction");
        first_is_stop = false; // consume the malformed direction part
      }
    } else if let Some(degrees) = parse_angle_degrees(parts[0]) {
      angle = text_angle_to_radians(degrees);
      first_is_stop = false;
    }
  } else {
    // Skip a leading shape/size part that holds no color.
    let mut probe = ValueCursor::new(parts[0]);
    if probe.read_color().is_none() {
      first_is_stop = false;
    }
  }

  let stop_parts = if first_is_stop { &parts[..] } else { &parts[1..] };
  for part in stop_parts {
    let mut cursor = ValueCursor::new(part);
    let Some(color) = cursor.read_color() else {
      warn!(part, "skipping gradient stop with unparsable color");
      continue;
    };
    let position = cursor.read_length();
    stops.push(ColorStop { color, position });
  }

  if stops.len() < 2 {
    warn!(value = trimmed, "gradient needs at least two color stops");
    return None;
  }

  Some(if radial {
    Gradient::Radial { stops, repeating }
  } else {
    Gradient::Linear {
      angle,
      stops,
      repeating,
    }
  })
}

fn strip_call<'a>(input: &'a str, name: &str) -> Option<&'a str> {
  let rest = input.strip_prefix(name)?;
  let rest = rest.strip_prefix('(')?;
  rest.strip_suffix(')')
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_tokenize_splits_on_whitespace() {
    assert_eq!(tokenize_value("4px  8px"), vec!["4px", "8px"]);
  }

  #[test]
  fn test_tokenize_keeps_functions_whole() {
    let tokens = tokenize_value("url(a.png) linear-gradient(to right, red, blue)");
    assert_eq!(tokens.len(), 2);
    assert!(tokens[1].starts_with("linear-gradient("));
  }

  #[test]
  fn test_tokenize_emits_separators() {
    assert_eq!(tokenize_value("4px 4px / 50% auto"), vec!["4px", "4px", "/", "50%", "auto"]);
    assert_eq!(tokenize_value("a, b"), vec!["a", ",", "b"]);
  }

  #[test]
  fn test_split_top_level_commas_respects_depth() {
    let parts = split_top_level_commas("rgb(1, 2, 3), red 10%");
    assert_eq!(parts, vec!["rgb(1, 2, 3)", "red 10%"]);
  }

  #[test]
  fn test_parse_length_units() {
    assert_eq!(parse_length("12px"), Some(Length::px(12.0)));
    assert_eq!(parse_length("1.5em"), Some(Length::em(1.5)));
    assert_eq!(parse_length("50%"), Some(Length::percent(50.0)));
    assert_eq!(parse_length("7"), Some(Length::px(7.0)));
    assert_eq!(parse_length("1.5rem"), Some(Length::rem(1.5)));
    assert_eq!(parse_length("wat"), None);
  }

  #[test]
  fn test_parse_time() {
    assert_eq!(parse_time("0.3s"), Some(0.3));
    assert_eq!(parse_time("250ms"), Some(0.25));
    assert_eq!(parse_time("1s"), Some(1.0));
    assert_eq!(parse_time("fast"), None);
  }

  #[test]
  fn test_angle_conversion_matches_cardinal_table() {
    // The cardinal table is the fixed-correction formula applied to the
    // four text-convention cardinals.
    assert!((text_angle_to_radians(0.0) - direction_angle("top").unwrap()).abs() < 1e-6);
    assert!((text_angle_to_radians(90.0) - direction_angle("right").unwrap()).abs() < 1e-6);
    assert!((text_angle_to_radians(180.0) - direction_angle("bottom").unwrap()).abs() < 1e-6);
    assert!((text_angle_to_radians(270.0) - direction_angle("left").unwrap()).abs() < 1e-6);
  }

  #[test]
  fn test_cursor_try_parse_consumes_only_on_success() {
    let mut cursor = ValueCursor::new("solid 2px red");
    assert_eq!(cursor.read_length(), None);
    assert_eq!(cursor.read_keyword_of(&["none", "solid"]), Some("solid"));
    assert_eq!(cursor.read_length(), Some(Length::px(2.0)));
    assert_eq!(cursor.read_color(), Some(crate::style::color::Rgba::rgb(255, 0, 0)));
    assert!(cursor.is_exhausted());
  }

  #[test]
  fn test_cursor_read_function() {
    let mut cursor = ValueCursor::new("translate(4px, 8px) rotate(45deg)");
    let (name, args) = cursor.read_function().unwrap();
    assert_eq!(name, "translate");
    assert_eq!(args, "4px, 8px");
    let (name, _) = cursor.read_function().unwrap();
    assert_eq!(name, "rotate");
    assert!(cursor.is_exhausted());
  }

  #[test]
  fn test_parse_gradient_linear() {
    let gradient = parse_gradient("linear-gradient(to right, red, blue 80%)").unwrap();
    match gradient {
      Gradient::Linear { angle, stops, repeating } => {
        assert!((angle - 0.0).abs() < 1e-6);
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[1].position, Some(Length::percent(80.0)));
        assert!(!repeating);
      }
      _ => panic!("expected linear gradient"),
    }
  }

  #[test]
  fn test_parse_gradient_requires_two_stops() {
    assert!(parse_gradient("linear-gradient(red)").is_none());
    assert!(parse_gradient("not-a-gradient(red, blue)").is_none());
  }

  #[test]
  fn test_parse_gradient_radial() {
    let gradient = parse_gradient("radial-gradient(circle, #fff, #000)").unwrap();
    assert!(matches!(gradient, Gradient::Radial { ref stops, .. } if stops.len() == 2));
  }
}
