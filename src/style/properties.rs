//! Property schema and the style value table
//!
//! The schema is one declarative table: each property contributes a row
//! with its name, storage kind, static default, and whether it cascades
//! from the parent. Every table-wide operation (fill-defaults, is-default,
//! selective-merge, clone, hash) iterates the table instead of being spelled
//! out per property.
//!
//! A [`StyleValues`] holds one optional slot per schema property plus a
//! small set of hand-maintained composite values (shadow lists, gradient,
//! transform, declared transitions/animation) that follow the same
//! contract. "Explicitly set" is exactly `Option::is_some` on the slot;
//! there are no sentinel values.

use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use rustc_hash::{FxHashMap, FxHasher};

use crate::error::{Result, StyleError};
use crate::style::color::Rgba;
use crate::style::types::{
  AnimationPlayback, AnimationSpec, Gradient, RawProperty, Shadow, TransformOp, TransitionSpec,
};
use crate::style::values::Length;

// Closed keyword sets. The parser canonicalizes matching input to the
// `'static` entry so stored keywords compare by pointer-free `==` cheaply.
pub const BORDER_STYLES: &[&str] = &["none", "solid"];
pub const FLEX_DIRECTIONS: &[&str] = &["row", "row-reverse", "column", "column-reverse"];
pub const FLEX_WRAPS: &[&str] = &["nowrap", "wrap", "wrap-reverse"];
pub const ALIGN_ITEMS_KEYWORDS: &[&str] = &["flex-start", "flex-end", "center", "stretch", "baseline"];
pub const JUSTIFY_CONTENT_KEYWORDS: &[&str] = &[
  "flex-start",
  "flex-end",
  "center",
  "space-between",
  "space-around",
  "space-evenly",
];
pub const POSITION_MODES: &[&str] = &["relative", "absolute", "fixed"];
pub const BACKGROUND_REPEATS: &[&str] = &["repeat", "repeat-x", "repeat-y", "no-repeat"];
pub const VISIBILITY_KEYWORDS: &[&str] = &["visible", "hidden", "collapse"];
pub const OVERFLOW_KEYWORDS: &[&str] = &["visible", "hidden", "scroll", "auto"];
pub const DISPLAY_KEYWORDS: &[&str] = &["flex", "block", "inline", "none"];
pub const FONT_STYLES: &[&str] = &["normal", "italic", "oblique"];
pub const TEXT_ALIGNS: &[&str] = &["left", "center", "right", "justify"];
pub const TEXT_TRANSFORMS: &[&str] = &["none", "uppercase", "lowercase", "capitalize"];
pub const TEXT_DECORATIONS: &[&str] = &["none", "underline", "line-through", "overline"];
pub const TEXT_OVERFLOWS: &[&str] = &["clip", "ellipsis"];
pub const WHITE_SPACE_KEYWORDS: &[&str] = &["normal", "nowrap", "pre", "pre-wrap"];
pub const CURSOR_KEYWORDS: &[&str] = &["auto", "default", "pointer", "text", "move", "not-allowed"];
pub const POINTER_EVENTS_KEYWORDS: &[&str] = &["auto", "none"];

/// Storage kind of one schema property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
  Length,
  /// Length or the `auto` keyword
  LengthOrAuto,
  Color,
  Float,
  Int,
  Str,
  /// One of a closed set of keywords
  Keyword(&'static [&'static str]),
}

/// Static default of one schema property, in const-constructible form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
  Length(Length),
  Auto,
  Color(Rgba),
  Float(f32),
  Int(i32),
  Str(&'static str),
  Keyword(&'static str),
}

impl DefaultValue {
  /// Materializes the default as a stored value.
  pub fn to_value(&self) -> PropertyValue {
    match *self {
      Self::Length(l) => PropertyValue::Length(l),
      Self::Auto => PropertyValue::Auto,
      Self::Color(c) => PropertyValue::Color(c),
      Self::Float(v) => PropertyValue::Float(v),
      Self::Int(v) => PropertyValue::Int(v),
      Self::Str(s) => PropertyValue::Str(s.to_string()),
      Self::Keyword(k) => PropertyValue::Keyword(k),
    }
  }
}

/// One row of the property schema.
#[derive(Debug)]
pub struct PropertyMeta {
  pub id: PropertyId,
  pub name: &'static str,
  pub kind: PropertyKind,
  pub default: DefaultValue,
  /// Whether the cascade copies this property from the parent when unset
  pub inherited: bool,
}

impl PropertyMeta {
  /// The property's static default as a stored value.
  pub fn default_value(&self) -> PropertyValue {
    self.default.to_value()
  }
}

macro_rules! declare_properties {
  ($($variant:ident => $name:literal, $kind:expr, $default:expr, $inherited:expr;)+) => {
    /// Identifier of one schema property. Doubles as the slot index.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum PropertyId {
      $($variant,)+
    }

    impl PropertyId {
      /// Number of schema properties.
      pub const COUNT: usize = [$(stringify!($variant)),+].len();
    }

    /// The property schema, indexed by `PropertyId as usize`.
    pub static PROPERTIES: &[PropertyMeta] = &[
      $(PropertyMeta {
        id: PropertyId::$variant,
        name: $name,
        kind: $kind,
        default: $default,
        inherited: $inherited,
      },)+
    ];
  };
}

use self::DefaultValue as D;
use self::PropertyKind as K;

declare_properties! {
  Width => "width", K::LengthOrAuto, D::Auto, false;
  Height => "height", K::LengthOrAuto, D::Auto, false;
  MinWidth => "min-width", K::Length, D::Length(Length::px(0.0)), false;
  MinHeight => "min-height", K::Length, D::Length(Length::px(0.0)), false;
  MaxWidth => "max-width", K::LengthOrAuto, D::Auto, false;
  MaxHeight => "max-height", K::LengthOrAuto, D::Auto, false;
  MarginTop => "margin-top", K::Length, D::Length(Length::px(0.0)), false;
  MarginRight => "margin-right", K::Length, D::Length(Length::px(0.0)), false;
  MarginBottom => "margin-bottom", K::Length, D::Length(Length::px(0.0)), false;
  MarginLeft => "margin-left", K::Length, D::Length(Length::px(0.0)), false;
  PaddingTop => "padding-top", K::Length, D::Length(Length::px(0.0)), false;
  PaddingRight => "padding-right", K::Length, D::Length(Length::px(0.0)), false;
  PaddingBottom => "padding-bottom", K::Length, D::Length(Length::px(0.0)), false;
  PaddingLeft => "padding-left", K::Length, D::Length(Length::px(0.0)), false;
  BorderTopWidth => "border-top-width", K::Length, D::Length(Length::px(0.0)), false;
  BorderRightWidth => "border-right-width", K::Length, D::Length(Length::px(0.0)), false;
  BorderBottomWidth => "border-bottom-width", K::Length, D::Length(Length::px(0.0)), false;
  BorderLeftWidth => "border-left-width", K::Length, D::Length(Length::px(0.0)), false;
  BorderColor => "border-color", K::Color, D::Color(Rgba::BLACK), false;
  BorderStyle => "border-style", K::Keyword(BORDER_STYLES), D::Keyword("none"), false;
  BorderTopLeftRadius => "border-top-left-radius", K::Length, D::Length(Length::px(0.0)), false;
  BorderTopRightRadius => "border-top-right-radius", K::Length, D::Length(Length::px(0.0)), false;
  BorderBottomRightRadius => "border-bottom-right-radius", K::Length, D::Length(Length::px(0.0)), false;
  BorderBottomLeftRadius => "border-bottom-left-radius", K::Length, D::Length(Length::px(0.0)), false;
  FlexGrow => "flex-grow", K::Float, D::Float(0.0), false;
  FlexShrink => "flex-shrink", K::Float, D::Float(1.0), false;
  FlexBasis => "flex-basis", K::LengthOrAuto, D::Auto, false;
  FlexDirection => "flex-direction", K::Keyword(FLEX_DIRECTIONS), D::Keyword("row"), false;
  FlexWrap => "flex-wrap", K::Keyword(FLEX_WRAPS), D::Keyword("nowrap"), false;
  AlignItems => "align-items", K::Keyword(ALIGN_ITEMS_KEYWORDS), D::Keyword("stretch"), false;
  JustifyContent => "justify-content", K::Keyword(JUSTIFY_CONTENT_KEYWORDS), D::Keyword("flex-start"), false;
  Position => "position", K::Keyword(POSITION_MODES), D::Keyword("relative"), false;
  InsetTop => "top", K::LengthOrAuto, D::Auto, false;
  InsetRight => "right", K::LengthOrAuto, D::Auto, false;
  InsetBottom => "bottom", K::LengthOrAuto, D::Auto, false;
  InsetLeft => "left", K::LengthOrAuto, D::Auto, false;
  BackgroundColor => "background-color", K::Color, D::Color(Rgba::TRANSPARENT), false;
  BackgroundImage => "background-image", K::Str, D::Str(""), false;
  BackgroundPositionX => "background-position-x", K::Length, D::Length(Length::percent(0.0)), false;
  BackgroundPositionY => "background-position-y", K::Length, D::Length(Length::percent(0.0)), false;
  BackgroundSizeX => "background-size-x", K::LengthOrAuto, D::Auto, false;
  BackgroundSizeY => "background-size-y", K::LengthOrAuto, D::Auto, false;
  BackgroundRepeat => "background-repeat", K::Keyword(BACKGROUND_REPEATS), D::Keyword("repeat"), false;
  Opacity => "opacity", K::Float, D::Float(1.0), false;
  Visibility => "visibility", K::Keyword(VISIBILITY_KEYWORDS), D::Keyword("visible"), false;
  Overflow => "overflow", K::Keyword(OVERFLOW_KEYWORDS), D::Keyword("visible"), false;
  Display => "display", K::Keyword(DISPLAY_KEYWORDS), D::Keyword("flex"), false;
  ZIndex => "z-index", K::Int, D::Int(0), false;
  FontFamily => "font-family", K::Str, D::Str("sans-serif"), true;
  FontSize => "font-size", K::Length, D::Length(Length::px(16.0)), true;
  FontWeight => "font-weight", K::Int, D::Int(400), true;
  FontStyle => "font-style", K::Keyword(FONT_STYLES), D::Keyword("normal"), true;
  Color => "color", K::Color, D::Color(Rgba::BLACK), true;
  LineHeight => "line-height", K::LengthOrAuto, D::Auto, true;
  LetterSpacing => "letter-spacing", K::Length, D::Length(Length::px(0.0)), true;
  TextAlign => "text-align", K::Keyword(TEXT_ALIGNS), D::Keyword("left"), true;
  TextTransform => "text-transform", K::Keyword(TEXT_TRANSFORMS), D::Keyword("none"), true;
  TextDecoration => "text-decoration", K::Keyword(TEXT_DECORATIONS), D::Keyword("none"), true;
  TextOverflow => "text-overflow", K::Keyword(TEXT_OVERFLOWS), D::Keyword("clip"), false;
  WhiteSpace => "white-space", K::Keyword(WHITE_SPACE_KEYWORDS), D::Keyword("normal"), true;
  Cursor => "cursor", K::Keyword(CURSOR_KEYWORDS), D::Keyword("auto"), true;
  PointerEvents => "pointer-events", K::Keyword(POINTER_EVENTS_KEYWORDS), D::Keyword("auto"), true;
  TextStrokeWidth => "text-stroke-width", K::Length, D::Length(Length::px(0.0)), true;
  TextStrokeColor => "text-stroke-color", K::Color, D::Color(Rgba::TRANSPARENT), true;
}

/// Alternate accepted names, resolved before dispatch.
pub static ALIASES: &[(&str, &str)] = &[
  ("overflow-x", "overflow"),
  ("overflow-y", "overflow"),
  ("text-decoration-line", "text-decoration"),
];

impl PropertyId {
  /// Slot index of this property.
  #[inline]
  pub fn index(self) -> usize {
    self as usize
  }

  /// Schema row for this property.
  pub fn meta(self) -> &'static PropertyMeta {
    &PROPERTIES[self as usize]
  }

  /// Canonical name of this property.
  pub fn name(self) -> &'static str {
    self.meta().name
  }
}

fn name_map() -> &'static FxHashMap<&'static str, &'static PropertyMeta> {
  static MAP: OnceLock<FxHashMap<&'static str, &'static PropertyMeta>> = OnceLock::new();
  MAP.get_or_init(|| {
    let mut map = FxHashMap::default();
    for meta in PROPERTIES {
      map.insert(meta.name, meta);
    }
    map
  })
}

/// Maps an accepted property name to its canonical name.
pub fn resolve_alias(name: &str) -> &str {
  ALIASES
    .iter()
    .find(|(alias, _)| *alias == name)
    .map(|(_, canonical)| *canonical)
    .unwrap_or(name)
}

/// Looks up a schema property by canonical or aliased name.
///
/// Names are matched case-sensitively against the lowercase schema; callers
/// normalize case first.
pub fn property_by_name(name: &str) -> Option<&'static PropertyMeta> {
  name_map().get(resolve_alias(name)).copied()
}

/// One addressable slot of a value table: a schema property or one of the
/// hand-maintained composites. Transition entries and the interpolator
/// address values at this granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleSlot {
  Prop(PropertyId),
  BoxShadows,
  TextShadows,
  BackgroundGradient,
  Transform,
}

/// Resolves a property name (schema or composite) to a slot.
pub fn slot_by_name(name: &str) -> Option<StyleSlot> {
  match name {
    "box-shadow" => Some(StyleSlot::BoxShadows),
    "text-shadow" => Some(StyleSlot::TextShadows),
    "transform" => Some(StyleSlot::Transform),
    _ => property_by_name(name).map(|meta| StyleSlot::Prop(meta.id)),
  }
}

/// One stored, typed property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
  Length(Length),
  /// The `auto` keyword for length-typed properties
  Auto,
  Color(Rgba),
  Float(f32),
  Int(i32),
  Str(String),
  Keyword(&'static str),
}

impl PropertyValue {
  pub fn as_length(&self) -> Option<Length> {
    match self {
      Self::Length(l) => Some(*l),
      _ => None,
    }
  }

  pub fn as_color(&self) -> Option<Rgba> {
    match self {
      Self::Color(c) => Some(*c),
      _ => None,
    }
  }

  pub fn as_float(&self) -> Option<f32> {
    match self {
      Self::Float(v) => Some(*v),
      _ => None,
    }
  }

  pub fn as_int(&self) -> Option<i32> {
    match self {
      Self::Int(v) => Some(*v),
      _ => None,
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Self::Str(s) => Some(s),
      _ => None,
    }
  }

  pub fn as_keyword(&self) -> Option<&'static str> {
    match self {
      Self::Keyword(k) => Some(k),
      _ => None,
    }
  }

  pub fn is_auto(&self) -> bool {
    matches!(self, Self::Auto)
  }

  /// Whether this value is storable under the given kind.
  pub fn matches_kind(&self, kind: &PropertyKind) -> bool {
    match (self, kind) {
      (Self::Length(_), PropertyKind::Length | PropertyKind::LengthOrAuto) => true,
      (Self::Auto, PropertyKind::LengthOrAuto) => true,
      (Self::Color(_), PropertyKind::Color) => true,
      (Self::Float(_), PropertyKind::Float) => true,
      (Self::Int(_), PropertyKind::Int) => true,
      (Self::Str(_), PropertyKind::Str) => true,
      (Self::Keyword(k), PropertyKind::Keyword(set)) => set.contains(k),
      _ => false,
    }
  }
}

impl Hash for PropertyValue {
  fn hash<H: Hasher>(&self, state: &mut H) {
    std::mem::discriminant(self).hash(state);
    match self {
      Self::Length(l) => l.hash(state),
      Self::Auto => {}
      Self::Color(c) => c.hash(state),
      Self::Float(v) => v.to_bits().hash(state),
      Self::Int(v) => v.hash(state),
      Self::Str(s) => s.hash(state),
      Self::Keyword(k) => k.hash(state),
    }
  }
}

/// The full set of style values for one UI element.
///
/// Slots are unset until assigned; [`StyleValues::fill_defaults`] replaces
/// unset slots with their schema defaults. The composites (shadows,
/// gradient, transform, declared transitions/animation) are "default" while
/// absent.
#[derive(Debug, Clone)]
pub struct StyleValues {
  slots: Vec<Option<PropertyValue>>,
  pub box_shadows: Option<Vec<Shadow>>,
  pub text_shadows: Option<Vec<Shadow>>,
  pub background_gradient: Option<Gradient>,
  pub transform: Option<Vec<TransformOp>>,
  /// Transitions declared on this element
  pub transitions: Option<Vec<TransitionSpec>>,
  animation: Option<AnimationSpec>,
  /// Playback state for the declared animation; reset on name change
  pub animation_playback: Option<AnimationPlayback>,
  raw: Vec<RawProperty>,
  dirty: bool,
}

impl Default for StyleValues {
  fn default() -> Self {
    Self::new()
  }
}

impl StyleValues {
  /// Creates an empty table with every property unset.
  pub fn new() -> Self {
    Self {
      slots: vec![None; PropertyId::COUNT],
      box_shadows: None,
      text_shadows: None,
      background_gradient: None,
      transform: None,
      transitions: None,
      animation: None,
      animation_playback: None,
      raw: Vec::new(),
      dirty: false,
    }
  }

  /// Returns the stored value for a property, or `None` when unset.
  pub fn get(&self, id: PropertyId) -> Option<&PropertyValue> {
    self.slots[id.index()].as_ref()
  }

  /// Returns true when the property has been explicitly set.
  pub fn is_set(&self, id: PropertyId) -> bool {
    self.slots[id.index()].is_some()
  }

  /// Stores a value, marking the table dirty when the value changed.
  pub fn set(&mut self, id: PropertyId, value: PropertyValue) {
    debug_assert!(
      value.matches_kind(&id.meta().kind),
      "{:?} cannot store {:?}",
      id,
      value
    );
    let slot = &mut self.slots[id.index()];
    if slot.as_ref() != Some(&value) {
      *slot = Some(value);
      self.dirty = true;
    }
  }

  /// Returns a property to the unset state.
  pub fn clear(&mut self, id: PropertyId) {
    if self.slots[id.index()].take().is_some() {
      self.dirty = true;
    }
  }

  /// Replaces every unset slot with its schema default.
  ///
  /// Composites are left alone: an absent composite already is its default.
  pub fn fill_defaults(&mut self) {
    for meta in PROPERTIES {
      let slot = &mut self.slots[meta.id.index()];
      if slot.is_none() {
        *slot = Some(meta.default_value());
        self.dirty = true;
      }
    }
  }

  /// Whether the named property currently holds its static default.
  ///
  /// Unset counts as default. Unknown names are a hard error: they indicate
  /// a schema or caller bug, not bad user input.
  pub fn is_default(&self, name: &str) -> Result<bool> {
    if let Some(slot) = slot_by_name(name) {
      let result = match slot {
        StyleSlot::Prop(id) => match self.get(id) {
          None => true,
          Some(value) => *value == id.meta().default_value(),
        },
        StyleSlot::BoxShadows => self.box_shadows.as_ref().map_or(true, |s| s.is_empty()),
        StyleSlot::TextShadows => self.text_shadows.as_ref().map_or(true, |s| s.is_empty()),
        StyleSlot::BackgroundGradient => self.background_gradient.is_none(),
        StyleSlot::Transform => self.transform.as_ref().map_or(true, |t| t.is_empty()),
      };
      return Ok(result);
    }
    Err(
      StyleError::UnknownProperty {
        name: name.to_string(),
      }
      .into(),
    )
  }

  /// Copies every property `other` has explicitly set into this table.
  ///
  /// Properties `other` left unset are never touched, which makes this the
  /// operation for applying animation/transition overlays and mixins.
  pub fn selective_merge_from(&mut self, other: &StyleValues) {
    for (index, slot) in other.slots.iter().enumerate() {
      if let Some(value) = slot {
        if self.slots[index].as_ref() != Some(value) {
          self.slots[index] = Some(value.clone());
          self.dirty = true;
        }
      }
    }
    if other.box_shadows.is_some() && self.box_shadows != other.box_shadows {
      self.box_shadows = other.box_shadows.clone();
      self.dirty = true;
    }
    if other.text_shadows.is_some() && self.text_shadows != other.text_shadows {
      self.text_shadows = other.text_shadows.clone();
      self.dirty = true;
    }
    if other.background_gradient.is_some() && self.background_gradient != other.background_gradient
    {
      self.background_gradient = other.background_gradient.clone();
      self.dirty = true;
    }
    if other.transform.is_some() && self.transform != other.transform {
      self.transform = other.transform.clone();
      self.dirty = true;
    }
    if other.transitions.is_some() && self.transitions != other.transitions {
      self.transitions = other.transitions.clone();
      self.dirty = true;
    }
    if other.animation.is_some() && self.animation != other.animation {
      self.set_animation(other.animation.clone());
    }
  }

  /// Overwrites every property (set and unset) from `other`.
  ///
  /// Used to snapshot "from"/"to" states when a transition starts. Raw
  /// diagnostic records are not copied.
  pub fn full_copy_from(&mut self, other: &StyleValues) {
    self.slots = other.slots.clone();
    self.box_shadows = other.box_shadows.clone();
    self.text_shadows = other.text_shadows.clone();
    self.background_gradient = other.background_gradient.clone();
    self.transform = other.transform.clone();
    self.transitions = other.transitions.clone();
    self.animation = other.animation.clone();
    self.animation_playback = other.animation_playback;
    self.dirty = true;
  }

  /// Stable hash over every stored value.
  ///
  /// Covers the slot schema and the visual composites; declared
  /// transitions/animation and diagnostics do not participate. The
  /// transition scheduler keys its deduplication on this.
  pub fn value_hash(&self) -> u64 {
    let mut hasher = FxHasher::default();
    for slot in &self.slots {
      match slot {
        None => 0u8.hash(&mut hasher),
        Some(value) => {
          1u8.hash(&mut hasher);
          value.hash(&mut hasher);
        }
      }
    }
    self.box_shadows.hash(&mut hasher);
    self.text_shadows.hash(&mut hasher);
    self.background_gradient.hash(&mut hasher);
    self.transform.hash(&mut hasher);
    hasher.finish()
  }

  /// The declared animation, if any.
  pub fn animation(&self) -> Option<&AnimationSpec> {
    self.animation.as_ref()
  }

  /// Declares (or clears) the animation. Playback state resets whenever the
  /// referenced keyframe name changes or the animation is cleared, so the
  /// next evaluation re-arms from its own clock.
  pub fn set_animation(&mut self, spec: Option<AnimationSpec>) {
    let name_changed = match (&self.animation, &spec) {
      (Some(old), Some(new)) => old.name != new.name,
      (None, None) => false,
      _ => true,
    };
    if name_changed {
      self.animation_playback = None;
    }
    if self.animation != spec {
      self.animation = spec;
      self.dirty = true;
    }
  }

  /// Appends a raw diagnostic record for one property assignment.
  pub fn push_raw(&mut self, record: RawProperty) {
    self.raw.push(record);
  }

  /// The raw text of every property assignment seen so far.
  pub fn raw_properties(&self) -> &[RawProperty] {
    &self.raw
  }

  /// Returns and clears the dirty bit. The owner polls this after a batch
  /// of sets to decide whether to schedule a re-layout/re-paint.
  pub fn take_dirty(&mut self) -> bool {
    std::mem::take(&mut self.dirty)
  }

  /// Marks the table dirty. Handlers that write the composite fields
  /// directly call this; `set` does it on their behalf for slots.
  pub fn mark_dirty(&mut self) {
    self.dirty = true;
  }
}
