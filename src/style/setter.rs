//! Property assignment
//!
//! `set_property` turns one `(name, raw text)` pair into typed values in a
//! [`StyleValues`] table. Dispatch is a static name→handler map built once:
//! simple properties parse by their schema kind, shorthand properties walk
//! the raw text with a [`ValueCursor`] and expand into several stored
//! values.
//!
//! The contract follows the resolution rules of the engine:
//! - Unknown names and unparsable simple values return `false` and leave
//!   the table untouched.
//! - Shorthands apply best-effort: whatever sub-values parsed are kept and
//!   the call reports success if at least one applied.
//! - Every call appends a raw diagnostic record, parsed or not.

use std::sync::OnceLock;

use rustc_hash::FxHashMap;
use tracing::{trace, warn};

use crate::css::cursor::{parse_gradient, parse_length, parse_time, split_top_level_commas, ValueCursor};
use crate::style::color::Rgba;
use crate::style::properties::{
  resolve_alias, slot_by_name, PropertyId, PropertyKind, PropertyValue, StyleValues,
  BACKGROUND_REPEATS, BORDER_STYLES, PROPERTIES,
};
use crate::style::types::{
  AnimationDirection, AnimationSpec, FillMode, IterationCount, PlayState, RawProperty, Shadow,
  TransformOp, TransitionSpec, TransitionTarget,
};
use crate::style::values::Length;

enum Handler {
  Simple(PropertyId),
  Shorthand(fn(&mut StyleValues, &str) -> usize),
}

fn handlers() -> &'static FxHashMap<&'static str, Handler> {
  static HANDLERS: OnceLock<FxHashMap<&'static str, Handler>> = OnceLock::new();
  HANDLERS.get_or_init(|| {
    let mut map = FxHashMap::default();
    for meta in PROPERTIES {
      map.insert(meta.name, Handler::Simple(meta.id));
    }
    let shorthands: &[(&'static str, fn(&mut StyleValues, &str) -> usize)] = &[
      ("margin", expand_margin),
      ("padding", expand_padding),
      ("border", expand_border),
      ("border-radius", expand_border_radius),
      ("background", expand_background),
      ("background-position", expand_background_position),
      ("background-size", expand_background_size),
      ("background-image", set_background_image),
      ("flex", expand_flex),
      ("transition", expand_transition),
      ("animation", expand_animation),
      ("animation-name", set_animation_name),
      ("animation-duration", set_animation_duration),
      ("animation-delay", set_animation_delay),
      ("animation-iteration-count", set_animation_iteration_count),
      ("animation-direction", set_animation_direction),
      ("animation-fill-mode", set_animation_fill_mode),
      ("animation-play-state", set_animation_play_state),
      ("animation-timing-function", set_animation_timing),
      ("box-shadow", expand_box_shadow),
      ("text-shadow", expand_text_shadow),
      ("transform", expand_transform),
      ("font-weight", set_font_weight),
    ];
    for (name, handler) in shorthands {
      map.insert(*name, Handler::Shorthand(*handler));
    }
    map
  })
}

/// Assigns one property from raw text. See the module docs for the
/// success/failure contract.
pub fn set_property(style: &mut StyleValues, name: &str, raw: &str) -> bool {
  set_property_at(style, name, raw, 0)
}

/// Like [`set_property`], recording `line` in the raw diagnostic record.
pub fn set_property_at(style: &mut StyleValues, name: &str, raw: &str, line: u32) -> bool {
  let lowered = name.trim().to_ascii_lowercase();
  let canonical = resolve_alias(&lowered);
  let applied = match handlers().get(canonical) {
    Some(Handler::Simple(id)) => apply_simple(style, *id, raw),
    Some(Handler::Shorthand(expand)) => expand(style, raw) > 0,
    None => {
      trace!(property = %name, "unknown property");
      false
    }
  };
  style.push_raw(RawProperty {
    name: name.trim().to_string(),
    value: raw.trim().to_string(),
    parsed: applied,
    line,
  });
  applied
}

fn apply_simple(style: &mut StyleValues, id: PropertyId, raw: &str) -> bool {
  match parse_simple_value(&id.meta().kind, raw) {
    Some(value) => {
      style.set(id, value);
      true
    }
    None => false,
  }
}

fn parse_simple_value(kind: &PropertyKind, raw: &str) -> Option<PropertyValue> {
  let raw = raw.trim();
  if raw.is_empty() {
    return None;
  }
  match kind {
    PropertyKind::Length => parse_length(raw).map(PropertyValue::Length),
    PropertyKind::LengthOrAuto => {
      if raw.eq_ignore_ascii_case("auto") {
        Some(PropertyValue::Auto)
      } else {
        parse_length(raw).map(PropertyValue::Length)
      }
    }
    PropertyKind::Color => Rgba::parse(raw).map(PropertyValue::Color),
    PropertyKind::Float => raw
      .parse::<f32>()
      .ok()
      .filter(|v| v.is_finite())
      .map(PropertyValue::Float),
    PropertyKind::Int => raw.parse::<i32>().ok().map(PropertyValue::Int),
    PropertyKind::Str => Some(PropertyValue::Str(unquote(raw).to_string())),
    PropertyKind::Keyword(set) => set
      .iter()
      .copied()
      .find(|k| raw.eq_ignore_ascii_case(k))
      .map(PropertyValue::Keyword),
  }
}

fn unquote(raw: &str) -> &str {
  let raw = raw.trim();
  raw
    .strip_prefix('"')
    .and_then(|r| r.strip_suffix('"'))
    .or_else(|| raw.strip_prefix('\'').and_then(|r| r.strip_suffix('\'')))
    .unwrap_or(raw)
}

/// Reads up to `max` lengths from the value, ignoring trailing tokens.
fn collect_lengths(raw: &str, max: usize) -> Vec<Length> {
  let mut cursor = ValueCursor::new(raw);
  let mut lengths = Vec::new();
  while lengths.len() < max {
    match cursor.read_length() {
      Some(length) => lengths.push(length),
      None => break,
    }
  }
  lengths
}

/// 1/2/3/4-value expansion to `[top, right, bottom, left]`.
fn expand_edges(lengths: &[Length]) -> Option<[Length; 4]> {
  match lengths {
    [all] => Some([*all; 4]),
    [vertical, horizontal] => Some([*vertical, *horizontal, *vertical, *horizontal]),
    [top, horizontal, bottom] => Some([*top, *horizontal, *bottom, *horizontal]),
    [top, right, bottom, left] => Some([*top, *right, *bottom, *left]),
    _ => None,
  }
}

/// 1/2/3/4-value expansion to `[top-left, top-right, bottom-right,
/// bottom-left]`, clockwise from the top-left corner.
fn expand_corners(lengths: &[Length]) -> Option<[Length; 4]> {
  match lengths {
    [all] => Some([*all; 4]),
    [a, b] => Some([*a, *b, *a, *b]),
    [a, b, c] => Some([*a, *b, *c, *b]),
    [a, b, c, d] => Some([*a, *b, *c, *d]),
    _ => None,
  }
}

fn expand_margin(style: &mut StyleValues, raw: &str) -> usize {
  let Some([top, right, bottom, left]) = expand_edges(&collect_lengths(raw, 4)) else {
    return 0;
  };
  style.set(PropertyId::MarginTop, PropertyValue::Length(top));
  style.set(PropertyId::MarginRight, PropertyValue::Length(right));
  style.set(PropertyId::MarginBottom, PropertyValue::Length(bottom));
  style.set(PropertyId::MarginLeft, PropertyValue::Length(left));
  4
}

fn expand_padding(style: &mut StyleValues, raw: &str) -> usize {
  let Some([top, right, bottom, left]) = expand_edges(&collect_lengths(raw, 4)) else {
    return 0;
  };
  style.set(PropertyId::PaddingTop, PropertyValue::Length(top));
  style.set(PropertyId::PaddingRight, PropertyValue::Length(right));
  style.set(PropertyId::PaddingBottom, PropertyValue::Length(bottom));
  style.set(PropertyId::PaddingLeft, PropertyValue::Length(left));
  4
}

fn expand_border_radius(style: &mut StyleValues, raw: &str) -> usize {
  let Some([tl, tr, br, bl]) = expand_corners(&collect_lengths(raw, 4)) else {
    return 0;
  };
  style.set(PropertyId::BorderTopLeftRadius, PropertyValue::Length(tl));
  style.set(PropertyId::BorderTopRightRadius, PropertyValue::Length(tr));
  style.set(PropertyId::BorderBottomRightRadius, PropertyValue::Length(br));
  style.set(PropertyId::BorderBottomLeftRadius, PropertyValue::Length(bl));
  4
}

fn expand_border(style: &mut StyleValues, raw: &str) -> usize {
  let mut cursor = ValueCursor::new(raw);
  let mut applied = 0;
  while !cursor.is_exhausted() {
    if let Some(width) = cursor.read_length() {
      style.set(PropertyId::BorderTopWidth, PropertyValue::Length(width));
      style.set(PropertyId::BorderRightWidth, PropertyValue::Length(width));
      style.set(PropertyId::BorderBottomWidth, PropertyValue::Length(width));
      style.set(PropertyId::BorderLeftWidth, PropertyValue::Length(width));
      applied += 4;
      continue;
    }
    if let Some(border_style) = cursor.read_keyword_of(BORDER_STYLES) {
      style.set(PropertyId::BorderStyle, PropertyValue::Keyword(border_style));
      applied += 1;
      continue;
    }
    if let Some(color) = cursor.read_color() {
      style.set(PropertyId::BorderColor, PropertyValue::Color(color));
      applied += 1;
      continue;
    }
    warn!(token = ?cursor.peek(), "unrecognized border token");
    cursor.advance();
  }
  applied
}

const POSITION_KEYWORDS: &[&str] = &["left", "center", "right", "top", "bottom"];

fn position_from_keyword(keyword: &str, x: &mut Option<Length>, y: &mut Option<Length>) {
  match keyword {
    "left" => *x = Some(Length::percent(0.0)),
    "right" => *x = Some(Length::percent(100.0)),
    "top" => *y = Some(Length::percent(0.0)),
    "bottom" => *y = Some(Length::percent(100.0)),
    "center" => {
      if x.is_none() {
        *x = Some(Length::percent(50.0));
      } else {
        *y = Some(Length::percent(50.0));
      }
    }
    _ => {}
  }
}

fn expand_background(style: &mut StyleValues, raw: &str) -> usize {
  let mut cursor = ValueCursor::new(raw);
  let mut applied = 0;
  let mut after_slash = false;
  let mut position_x: Option<Length> = None;
  let mut position_y: Option<Length> = None;
  let mut size_count = 0;

  while !cursor.is_exhausted() {
    if cursor.read_slash() {
      after_slash = true;
      continue;
    }
    if let Some(token) = cursor.peek() {
      if token.contains("gradient(") {
        if let Some(gradient) = parse_gradient(token) {
          style.background_gradient = Some(gradient);
          style.mark_dirty();
          applied += 1;
        }
        cursor.advance();
        continue;
      }
    }
    if let Some((name, args)) = cursor.read_function() {
      if name == "url" {
        style.set(
          PropertyId::BackgroundImage,
          PropertyValue::Str(unquote(&args).to_string()),
        );
        applied += 1;
      } else {
        warn!(function = %name, "unrecognized background function");
      }
      continue;
    }
    if let Some(repeat) = cursor.read_keyword_of(BACKGROUND_REPEATS) {
      style.set(PropertyId::BackgroundRepeat, PropertyValue::Keyword(repeat));
      applied += 1;
      continue;
    }
    if after_slash && cursor.read_keyword("auto") {
      let id = if size_count == 0 {
        PropertyId::BackgroundSizeX
      } else {
        PropertyId::BackgroundSizeY
      };
      style.set(id, PropertyValue::Auto);
      size_count += 1;
      applied += 1;
      continue;
    }
    if !after_slash {
      if let Some(keyword) = cursor.read_keyword_of(POSITION_KEYWORDS) {
        position_from_keyword(keyword, &mut position_x, &mut position_y);
        applied += 1;
        continue;
      }
    }
    if let Some(length) = cursor.read_length() {
      if after_slash {
        let id = if size_count == 0 {
          PropertyId::BackgroundSizeX
        } else {
          PropertyId::BackgroundSizeY
        };
        style.set(id, PropertyValue::Length(length));
        size_count += 1;
      } else if position_x.is_none() {
        position_x = Some(length);
      } else {
        position_y = Some(length);
      }
      applied += 1;
      continue;
    }
    if let Some(color) = cursor.read_color() {
      style.set(PropertyId::BackgroundColor, PropertyValue::Color(color));
      applied += 1;
      continue;
    }
    warn!(token = ?cursor.peek(), "unrecognized background token");
    cursor.advance();
  }

  if let Some(x) = position_x {
    style.set(PropertyId::BackgroundPositionX, PropertyValue::Length(x));
  }
  if let Some(y) = position_y {
    style.set(PropertyId::BackgroundPositionY, PropertyValue::Length(y));
  }
  applied
}

fn expand_background_position(style: &mut StyleValues, raw: &str) -> usize {
  let mut cursor = ValueCursor::new(raw);
  let mut x: Option<Length> = None;
  let mut y: Option<Length> = None;
  while !cursor.is_exhausted() {
    if let Some(keyword) = cursor.read_keyword_of(POSITION_KEYWORDS) {
      position_from_keyword(keyword, &mut x, &mut y);
      continue;
    }
    if let Some(length) = cursor.read_length() {
      if x.is_none() {
        x = Some(length);
      } else {
        y = Some(length);
      }
      continue;
    }
    warn!(token = ?cursor.peek(), "unrecognized background-position token");
    cursor.advance();
  }
  let mut applied = 0;
  if let Some(x) = x {
    style.set(PropertyId::BackgroundPositionX, PropertyValue::Length(x));
    applied += 1;
  }
  if let Some(y) = y.or(if applied > 0 { Some(Length::percent(50.0)) } else { None }) {
    style.set(PropertyId::BackgroundPositionY, PropertyValue::Length(y));
    applied += 1;
  }
  applied
}

fn expand_background_size(style: &mut StyleValues, raw: &str) -> usize {
  let mut cursor = ValueCursor::new(raw);
  let mut components: Vec<PropertyValue> = Vec::new();
  while !cursor.is_exhausted() && components.len() < 2 {
    if cursor.read_keyword("auto") {
      components.push(PropertyValue::Auto);
      continue;
    }
    if let Some(length) = cursor.read_length() {
      components.push(PropertyValue::Length(length));
      continue;
    }
    break;
  }
  if components.is_empty() {
    return 0;
  }
  let x = components[0].clone();
  let y = components.get(1).cloned().unwrap_or(PropertyValue::Auto);
  style.set(PropertyId::BackgroundSizeX, x);
  style.set(PropertyId::BackgroundSizeY, y);
  2
}

fn set_background_image(style: &mut StyleValues, raw: &str) -> usize {
  let trimmed = raw.trim();
  if trimmed.eq_ignore_ascii_case("none") {
    style.set(PropertyId::BackgroundImage, PropertyValue::Str(String::new()));
    return 1;
  }
  if let Some(gradient) = parse_gradient(trimmed) {
    style.background_gradient = Some(gradient);
    style.mark_dirty();
    return 1;
  }
  let mut cursor = ValueCursor::new(trimmed);
  if let Some((name, args)) = cursor.read_function() {
    if name == "url" {
      style.set(
        PropertyId::BackgroundImage,
        PropertyValue::Str(unquote(&args).to_string()),
      );
      return 1;
    }
  }
  0
}

fn expand_flex(style: &mut StyleValues, raw: &str) -> usize {
  let trimmed = raw.trim();
  // The bare `1` form is the ergonomic default: grow and shrink both 1
  // with a zero basis.
  if trimmed == "1" {
    style.set(PropertyId::FlexGrow, PropertyValue::Float(1.0));
    style.set(PropertyId::FlexShrink, PropertyValue::Float(1.0));
    style.set(PropertyId::FlexBasis, PropertyValue::Length(Length::zero()));
    return 3;
  }
  if trimmed.eq_ignore_ascii_case("none") {
    style.set(PropertyId::FlexGrow, PropertyValue::Float(0.0));
    style.set(PropertyId::FlexShrink, PropertyValue::Float(0.0));
    style.set(PropertyId::FlexBasis, PropertyValue::Auto);
    return 3;
  }

  let mut cursor = ValueCursor::new(trimmed);
  let mut applied = 0;
  let mut grow_set = false;
  let mut shrink_set = false;
  while !cursor.is_exhausted() {
    // Bare numbers fill grow then shrink; after both, numbers read as the
    // basis length like any other unit-less value.
    if !(grow_set && shrink_set) {
      if let Some(value) = cursor.read_float() {
        if !grow_set {
          style.set(PropertyId::FlexGrow, PropertyValue::Float(value));
          grow_set = true;
        } else {
          style.set(PropertyId::FlexShrink, PropertyValue::Float(value));
          shrink_set = true;
        }
        applied += 1;
        continue;
      }
    }
    if cursor.read_keyword("auto") {
      style.set(PropertyId::FlexBasis, PropertyValue::Auto);
      applied += 1;
      continue;
    }
    if let Some(basis) = cursor.read_length() {
      style.set(PropertyId::FlexBasis, PropertyValue::Length(basis));
      applied += 1;
      continue;
    }
    warn!(token = ?cursor.peek(), "unrecognized flex token");
    cursor.advance();
  }
  applied
}

fn expand_transition(style: &mut StyleValues, raw: &str) -> usize {
  let trimmed = raw.trim();
  if trimmed.eq_ignore_ascii_case("none") {
    style.transitions = Some(Vec::new());
    style.mark_dirty();
    return 1;
  }
  let mut specs = Vec::new();
  for part in split_top_level_commas(trimmed) {
    let mut cursor = ValueCursor::new(part);
    let Some(word) = cursor.read_word() else {
      continue;
    };
    let lowered = word.to_ascii_lowercase();
    let target = if lowered == "all" {
      TransitionTarget::All
    } else if let Some(slot) = slot_by_name(&lowered) {
      TransitionTarget::Slot(slot)
    } else {
      warn!(property = %word, "transition references unknown property");
      continue;
    };
    let Some(duration) = cursor.read_time() else {
      warn!(part, "transition is missing a duration");
      continue;
    };
    let mut delay = 0.0;
    let mut easing = String::from("linear");
    while !cursor.is_exhausted() {
      if let Some(seconds) = cursor.read_time() {
        delay = seconds;
        continue;
      }
      match cursor.read_word() {
        Some(word) => easing = word.to_ascii_lowercase(),
        None => break,
      }
    }
    specs.push(TransitionSpec {
      target,
      duration,
      delay,
      easing,
    });
  }
  if specs.is_empty() {
    return 0;
  }
  let count = specs.len();
  style.transitions = Some(specs);
  style.mark_dirty();
  count
}

fn is_timing_name(word: &str) -> bool {
  matches!(word, "linear" | "ease" | "ease-in" | "ease-out" | "ease-in-out")
    || word.starts_with("cubic-bezier(")
}

fn expand_animation(style: &mut StyleValues, raw: &str) -> usize {
  let trimmed = raw.trim();
  if trimmed.eq_ignore_ascii_case("none") {
    style.set_animation(None);
    return 1;
  }
  let mut spec = AnimationSpec::default();
  let mut cursor = ValueCursor::new(trimmed);
  let mut have_duration = false;
  let mut have_delay = false;
  let mut any = false;
  while !cursor.is_exhausted() {
    if let Some(seconds) = cursor.read_time() {
      if !have_duration {
        spec.duration = seconds;
        have_duration = true;
      } else if !have_delay {
        spec.delay = seconds;
        have_delay = true;
      } else {
        warn!(part = trimmed, "extra duration in animation shorthand");
      }
      any = true;
      continue;
    }
    if cursor.read_keyword("infinite") {
      spec.iterations = IterationCount::Infinite;
      any = true;
      continue;
    }
    if let Some(count) = cursor.read_float() {
      spec.iterations = IterationCount::Finite(count.max(0.0));
      any = true;
      continue;
    }
    let Some(word) = cursor.read_word() else {
      break;
    };
    let lowered = word.to_ascii_lowercase();
    if let Some(direction) = AnimationDirection::from_keyword(&lowered) {
      spec.direction = direction;
    } else if let Some(fill) = FillMode::from_keyword(&lowered) {
      spec.fill_mode = fill;
    } else if let Some(play_state) = PlayState::from_keyword(&lowered) {
      spec.play_state = play_state;
    } else if is_timing_name(&lowered) {
      spec.timing = lowered;
    } else if spec.name.is_empty() {
      spec.name = word;
    } else {
      warn!(token = %word, "unrecognized animation component");
    }
    any = true;
  }
  if !any {
    return 0;
  }
  style.set_animation(Some(spec));
  1
}

fn update_animation(style: &mut StyleValues, update: impl FnOnce(&mut AnimationSpec)) {
  let mut spec = style.animation().cloned().unwrap_or_default();
  update(&mut spec);
  style.set_animation(Some(spec));
}

fn set_animation_name(style: &mut StyleValues, raw: &str) -> usize {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return 0;
  }
  if trimmed.eq_ignore_ascii_case("none") {
    update_animation(style, |spec| spec.name.clear());
  } else {
    let name = unquote(trimmed).to_string();
    update_animation(style, |spec| spec.name = name);
  }
  1
}

fn set_animation_duration(style: &mut StyleValues, raw: &str) -> usize {
  match parse_time(raw) {
    Some(seconds) => {
      update_animation(style, |spec| spec.duration = seconds);
      1
    }
    None => 0,
  }
}

fn set_animation_delay(style: &mut StyleValues, raw: &str) -> usize {
  match parse_time(raw) {
    Some(seconds) => {
      update_animation(style, |spec| spec.delay = seconds);
      1
    }
    None => 0,
  }
}

fn set_animation_iteration_count(style: &mut StyleValues, raw: &str) -> usize {
  let trimmed = raw.trim();
  let iterations = if trimmed.eq_ignore_ascii_case("infinite") {
    IterationCount::Infinite
  } else {
    match trimmed.parse::<f32>() {
      Ok(count) if count.is_finite() && count >= 0.0 => IterationCount::Finite(count),
      _ => return 0,
    }
  };
  update_animation(style, |spec| spec.iterations = iterations);
  1
}

fn set_animation_direction(style: &mut StyleValues, raw: &str) -> usize {
  match AnimationDirection::from_keyword(raw.trim()) {
    Some(direction) => {
      update_animation(style, |spec| spec.direction = direction);
      1
    }
    None => 0,
  }
}

fn set_animation_fill_mode(style: &mut StyleValues, raw: &str) -> usize {
  match FillMode::from_keyword(raw.trim()) {
    Some(fill) => {
      update_animation(style, |spec| spec.fill_mode = fill);
      1
    }
    None => 0,
  }
}

fn set_animation_play_state(style: &mut StyleValues, raw: &str) -> usize {
  match PlayState::from_keyword(raw.trim()) {
    Some(play_state) => {
      update_animation(style, |spec| spec.play_state = play_state);
      1
    }
    None => 0,
  }
}

fn set_animation_timing(style: &mut StyleValues, raw: &str) -> usize {
  let trimmed = raw.trim().to_ascii_lowercase();
  if trimmed.is_empty() {
    return 0;
  }
  update_animation(style, |spec| spec.timing = trimmed);
  1
}

fn parse_shadow_list(raw: &str) -> Option<Vec<Shadow>> {
  let trimmed = raw.trim();
  if trimmed.eq_ignore_ascii_case("none") {
    return Some(Vec::new());
  }
  let mut layers = Vec::new();
  for part in split_top_level_commas(trimmed) {
    let mut cursor = ValueCursor::new(part);
    let mut lengths: Vec<Length> = Vec::new();
    let mut color: Option<Rgba> = None;
    while !cursor.is_exhausted() {
      if lengths.len() < 4 {
        if let Some(length) = cursor.read_length() {
          lengths.push(length);
          continue;
        }
      }
      if color.is_none() {
        if let Some(c) = cursor.read_color() {
          color = Some(c);
          continue;
        }
      }
      warn!(token = ?cursor.peek(), "unrecognized shadow token");
      cursor.advance();
    }
    if lengths.len() < 2 {
      warn!(part, "shadow layer needs at least two offsets");
      continue;
    }
    layers.push(Shadow {
      offset_x: lengths[0],
      offset_y: lengths[1],
      blur: lengths.get(2).copied().unwrap_or(Length::zero()),
      spread: lengths.get(3).copied().unwrap_or(Length::zero()),
      color: color.unwrap_or(Rgba::BLACK),
    });
  }
  if layers.is_empty() {
    None
  } else {
    Some(layers)
  }
}

fn expand_box_shadow(style: &mut StyleValues, raw: &str) -> usize {
  match parse_shadow_list(raw) {
    Some(layers) => {
      let count = layers.len().max(1);
      style.box_shadows = Some(layers);
      style.mark_dirty();
      count
    }
    None => 0,
  }
}

fn expand_text_shadow(style: &mut StyleValues, raw: &str) -> usize {
  match parse_shadow_list(raw) {
    Some(layers) => {
      let count = layers.len().max(1);
      style.text_shadows = Some(layers);
      style.mark_dirty();
      count
    }
    None => 0,
  }
}

fn parse_transform_args_lengths(args: &str) -> Vec<Length> {
  split_top_level_commas(args)
    .iter()
    .filter_map(|part| parse_length(part))
    .collect()
}

fn parse_transform_args_floats(args: &str) -> Vec<f32> {
  split_top_level_commas(args)
    .iter()
    .filter_map(|part| part.trim().parse::<f32>().ok())
    .filter(|v| v.is_finite())
    .collect()
}

fn parse_transform_args_angles(args: &str) -> Vec<f32> {
  split_top_level_commas(args)
    .iter()
    .filter_map(|part| crate::css::cursor::parse_angle_degrees(part))
    .map(f32::to_radians)
    .collect()
}

fn expand_transform(style: &mut StyleValues, raw: &str) -> usize {
  let trimmed = raw.trim();
  if trimmed.eq_ignore_ascii_case("none") {
    style.transform = Some(Vec::new());
    style.mark_dirty();
    return 1;
  }
  let mut cursor = ValueCursor::new(trimmed);
  let mut ops = Vec::new();
  while !cursor.is_exhausted() {
    let Some((name, args)) = cursor.read_function() else {
      warn!(token = ?cursor.peek(), "expected transform function");
      cursor.advance();
      continue;
    };
    let op = match name.as_str() {
      "translate" => {
        let lengths = parse_transform_args_lengths(&args);
        match lengths.as_slice() {
          [x] => Some(TransformOp::Translate(*x, Length::zero())),
          [x, y, ..] => Some(TransformOp::Translate(*x, *y)),
          _ => None,
        }
      }
      "translatex" => parse_length(&args).map(|x| TransformOp::Translate(x, Length::zero())),
      "translatey" => parse_length(&args).map(|y| TransformOp::Translate(Length::zero(), y)),
      "translate3d" => {
        let lengths = parse_transform_args_lengths(&args);
        match lengths.as_slice() {
          [x, y, z, ..] => Some(TransformOp::Translate3d(*x, *y, *z)),
          _ => None,
        }
      }
      "scale" => {
        let floats = parse_transform_args_floats(&args);
        match floats.as_slice() {
          [uniform] => Some(TransformOp::Scale(*uniform, *uniform)),
          [x, y, ..] => Some(TransformOp::Scale(*x, *y)),
          _ => None,
        }
      }
      "scalex" => args.trim().parse::<f32>().ok().map(|x| TransformOp::Scale(x, 1.0)),
      "scaley" => args.trim().parse::<f32>().ok().map(|y| TransformOp::Scale(1.0, y)),
      "scale3d" => {
        let floats = parse_transform_args_floats(&args);
        match floats.as_slice() {
          [x, y, z, ..] => Some(TransformOp::Scale3d(*x, *y, *z)),
          _ => None,
        }
      }
      "rotate" | "rotatez" => parse_transform_args_angles(&args)
        .first()
        .map(|a| TransformOp::Rotate(*a)),
      "rotatex" => parse_transform_args_angles(&args)
        .first()
        .map(|a| TransformOp::RotateX(*a)),
      "rotatey" => parse_transform_args_angles(&args)
        .first()
        .map(|a| TransformOp::RotateY(*a)),
      "skew" => {
        let angles = parse_transform_args_angles(&args);
        match angles.as_slice() {
          [x] => Some(TransformOp::Skew(*x, 0.0)),
          [x, y, ..] => Some(TransformOp::Skew(*x, *y)),
          _ => None,
        }
      }
      "skewx" => parse_transform_args_angles(&args)
        .first()
        .map(|a| TransformOp::Skew(*a, 0.0)),
      "skewy" => parse_transform_args_angles(&args)
        .first()
        .map(|a| TransformOp::Skew(0.0, *a)),
      _ => None,
    };
    match op {
      Some(op) => ops.push(op),
      None => warn!(function = %name, "unrecognized transform function"),
    }
  }
  if ops.is_empty() {
    return 0;
  }
  let count = ops.len();
  style.transform = Some(ops);
  style.mark_dirty();
  count
}

fn set_font_weight(style: &mut StyleValues, raw: &str) -> usize {
  let trimmed = raw.trim();
  let weight = if trimmed.eq_ignore_ascii_case("normal") {
    400
  } else if trimmed.eq_ignore_ascii_case("bold") {
    700
  } else {
    match trimmed.parse::<i32>() {
      Ok(value) if (1..=1000).contains(&value) => value,
      _ => return 0,
    }
  };
  style.set(PropertyId::FontWeight, PropertyValue::Int(weight));
  1
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::style::properties::StyleSlot;

  #[test]
  fn test_simple_length_property() {
    let mut style = StyleValues::new();
    assert!(set_property(&mut style, "width", "120px"));
    assert_eq!(
      style.get(PropertyId::Width),
      Some(&PropertyValue::Length(Length::px(120.0)))
    );
  }

  #[test]
  fn test_unknown_property_is_rejected() {
    let mut style = StyleValues::new();
    assert!(!set_property(&mut style, "frobnicate", "12px"));
    assert!(!style.take_dirty());
  }

  #[test]
  fn test_unparsable_value_leaves_previous() {
    let mut style = StyleValues::new();
    assert!(set_property(&mut style, "opacity", "0.5"));
    assert!(!set_property(&mut style, "opacity", "cloudy"));
    assert_eq!(style.get(PropertyId::Opacity), Some(&PropertyValue::Float(0.5)));
  }

  #[test]
  fn test_keyword_canonicalization() {
    let mut style = StyleValues::new();
    assert!(set_property(&mut style, "text-align", "CENTER"));
    assert_eq!(
      style.get(PropertyId::TextAlign),
      Some(&PropertyValue::Keyword("center"))
    );
  }

  #[test]
  fn test_alias_dispatch() {
    let mut style = StyleValues::new();
    assert!(set_property(&mut style, "overflow-x", "hidden"));
    assert_eq!(
      style.get(PropertyId::Overflow),
      Some(&PropertyValue::Keyword("hidden"))
    );
  }

  #[test]
  fn test_flex_one_special_case() {
    let mut style = StyleValues::new();
    assert!(set_property(&mut style, "flex", "1"));
    assert_eq!(style.get(PropertyId::FlexGrow), Some(&PropertyValue::Float(1.0)));
    assert_eq!(style.get(PropertyId::FlexShrink), Some(&PropertyValue::Float(1.0)));
    assert_eq!(
      style.get(PropertyId::FlexBasis),
      Some(&PropertyValue::Length(Length::zero()))
    );
  }

  #[test]
  fn test_flex_grow_shrink_basis_positions() {
    let mut style = StyleValues::new();
    assert!(set_property(&mut style, "flex", "2 3 10px"));
    assert_eq!(style.get(PropertyId::FlexGrow), Some(&PropertyValue::Float(2.0)));
    assert_eq!(style.get(PropertyId::FlexShrink), Some(&PropertyValue::Float(3.0)));
    assert_eq!(
      style.get(PropertyId::FlexBasis),
      Some(&PropertyValue::Length(Length::px(10.0)))
    );
  }

  #[test]
  fn test_transition_parse() {
    let mut style = StyleValues::new();
    assert!(set_property(
      &mut style,
      "transition",
      "width 0.5s ease-in 0.1s, all 1s"
    ));
    let transitions = style.transitions.as_ref().unwrap();
    assert_eq!(transitions.len(), 2);
    assert_eq!(
      transitions[0].target,
      TransitionTarget::Slot(StyleSlot::Prop(PropertyId::Width))
    );
    assert!((transitions[0].duration - 0.5).abs() < 1e-6);
    assert!((transitions[0].delay - 0.1).abs() < 1e-6);
    assert_eq!(transitions[0].easing, "ease-in");
    assert_eq!(transitions[1].target, TransitionTarget::All);
  }

  #[test]
  fn test_partial_shorthand_reports_success() {
    let mut style = StyleValues::new();
    // color fails to parse, width still applies
    assert!(set_property(&mut style, "border", "2px solid notacolor"));
    assert_eq!(
      style.get(PropertyId::BorderTopWidth),
      Some(&PropertyValue::Length(Length::px(2.0)))
    );
    assert!(style.get(PropertyId::BorderColor).is_none());
  }

  #[test]
  fn test_raw_records_capture_outcome() {
    let mut style = StyleValues::new();
    set_property(&mut style, "width", "10px");
    set_property(&mut style, "width", "???");
    let raw = style.raw_properties();
    assert_eq!(raw.len(), 2);
    assert!(raw[0].parsed);
    assert!(!raw[1].parsed);
    assert_eq!(raw[1].value, "???");
  }

  #[test]
  fn test_font_weight_keywords() {
    let mut style = StyleValues::new();
    assert!(set_property(&mut style, "font-weight", "bold"));
    assert_eq!(style.get(PropertyId::FontWeight), Some(&PropertyValue::Int(700)));
    assert!(set_property(&mut style, "font-weight", "250"));
    assert_eq!(style.get(PropertyId::FontWeight), Some(&PropertyValue::Int(250)));
    assert!(!set_property(&mut style, "font-weight", "heavy"));
  }

  #[test]
  fn test_transform_functions() {
    let mut style = StyleValues::new();
    assert!(set_property(&mut style, "transform", "translate(4px, 8px) scale(2) rotate(90deg)"));
    let ops = style.transform.as_ref().unwrap();
    assert_eq!(ops.len(), 3);
    assert_eq!(ops[0], TransformOp::Translate(Length::px(4.0), Length::px(8.0)));
    assert_eq!(ops[1], TransformOp::Scale(2.0, 2.0));
    match ops[2] {
      TransformOp::Rotate(angle) => assert!((angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6),
      _ => panic!("expected rotate"),
    }
  }

  #[test]
  fn test_box_shadow_layers() {
    let mut style = StyleValues::new();
    assert!(set_property(
      &mut style,
      "box-shadow",
      "0 2px 4px rgba(0, 0, 0, 0.4), inset 1px 1px red"
    ));
    let shadows = style.box_shadows.as_ref().unwrap();
    // the second layer's `inset` token is skipped, offsets still parse
    assert_eq!(shadows.len(), 2);
    assert_eq!(shadows[0].blur, Length::px(4.0));
  }

  #[test]
  fn test_background_shorthand() {
    let mut style = StyleValues::new();
    assert!(set_property(
      &mut style,
      "background",
      "url('img/panel.png') no-repeat center / 100% auto #202830"
    ));
    assert_eq!(
      style.get(PropertyId::BackgroundImage),
      Some(&PropertyValue::Str("img/panel.png".to_string()))
    );
    assert_eq!(
      style.get(PropertyId::BackgroundRepeat),
      Some(&PropertyValue::Keyword("no-repeat"))
    );
    assert_eq!(
      style.get(PropertyId::BackgroundPositionX),
      Some(&PropertyValue::Length(Length::percent(50.0)))
    );
    assert_eq!(
      style.get(PropertyId::BackgroundSizeX),
      Some(&PropertyValue::Length(Length::percent(100.0)))
    );
    assert_eq!(style.get(PropertyId::BackgroundSizeY), Some(&PropertyValue::Auto));
    assert_eq!(
      style.get(PropertyId::BackgroundColor),
      Some(&PropertyValue::Color(Rgba::rgb(0x20, 0x28, 0x30)))
    );
  }

  #[test]
  fn test_animation_shorthand() {
    let mut style = StyleValues::new();
    assert!(set_property(
      &mut style,
      "animation",
      "pulse 2s ease-in-out 0.5s infinite alternate both"
    ));
    let spec = style.animation().unwrap();
    assert_eq!(spec.name, "pulse");
    assert!((spec.duration - 2.0).abs() < 1e-6);
    assert!((spec.delay - 0.5).abs() < 1e-6);
    assert_eq!(spec.iterations, IterationCount::Infinite);
    assert_eq!(spec.direction, AnimationDirection::Alternate);
    assert_eq!(spec.fill_mode, FillMode::Both);
    assert_eq!(spec.timing, "ease-in-out");
  }
}
