//! Composite style values and playback descriptors
//!
//! Everything here is either a hand-maintained composite value (shadow
//! lists, gradients, transforms) that lives alongside the generated slot
//! schema, or a descriptor consumed by the transition scheduler and
//! animation evaluator.

use std::hash::{Hash, Hasher};

use crate::style::color::Rgba;
use crate::style::properties::StyleSlot;
use crate::style::values::Length;

/// One drop/text shadow layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Shadow {
  pub offset_x: Length,
  pub offset_y: Length,
  pub blur: Length,
  pub spread: Length,
  pub color: Rgba,
}

impl Hash for Shadow {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.offset_x.hash(state);
    self.offset_y.hash(state);
    self.blur.hash(state);
    self.spread.hash(state);
    self.color.hash(state);
  }
}

/// One gradient color stop. A missing position means the stop is spaced
/// evenly between its neighbors by the consumer.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorStop {
  pub color: Rgba,
  pub position: Option<Length>,
}

impl Hash for ColorStop {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.color.hash(state);
    self.position.hash(state);
  }
}

/// A background gradient descriptor.
///
/// Linear gradient angles are stored in radians with 0 pointing along
/// local +X; see the angle helpers in [`crate::css::cursor`] for the
/// conversion from the text grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum Gradient {
  Linear {
    angle: f32,
    stops: Vec<ColorStop>,
    repeating: bool,
  },
  Radial {
    stops: Vec<ColorStop>,
    repeating: bool,
  },
}

impl Hash for Gradient {
  fn hash<H: Hasher>(&self, state: &mut H) {
    match self {
      Self::Linear {
        angle,
        stops,
        repeating,
      } => {
        0u8.hash(state);
        angle.to_bits().hash(state);
        stops.hash(state);
        repeating.hash(state);
      }
      Self::Radial { stops, repeating } => {
        1u8.hash(state);
        stops.hash(state);
        repeating.hash(state);
      }
    }
  }
}

/// One component of a transform list. Angles are radians.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformOp {
  Translate(Length, Length),
  Translate3d(Length, Length, Length),
  Scale(f32, f32),
  Scale3d(f32, f32, f32),
  Rotate(f32),
  RotateX(f32),
  RotateY(f32),
  Skew(f32, f32),
}

impl Hash for TransformOp {
  fn hash<H: Hasher>(&self, state: &mut H) {
    std::mem::discriminant(self).hash(state);
    match self {
      Self::Translate(x, y) => {
        x.hash(state);
        y.hash(state);
      }
      Self::Translate3d(x, y, z) => {
        x.hash(state);
        y.hash(state);
        z.hash(state);
      }
      Self::Scale(x, y) => {
        x.to_bits().hash(state);
        y.to_bits().hash(state);
      }
      Self::Scale3d(x, y, z) => {
        x.to_bits().hash(state);
        y.to_bits().hash(state);
        z.to_bits().hash(state);
      }
      Self::Rotate(a) | Self::RotateX(a) | Self::RotateY(a) => a.to_bits().hash(state),
      Self::Skew(x, y) => {
        x.to_bits().hash(state);
        y.to_bits().hash(state);
      }
    }
  }
}

/// What a declared transition applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionTarget {
  /// Blend every property that changed
  All,
  /// Blend one slot
  Slot(StyleSlot),
}

/// One declared transition: `<target> <duration> [easing] [delay]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionSpec {
  pub target: TransitionTarget,
  /// Seconds
  pub duration: f32,
  /// Seconds
  pub delay: f32,
  /// Easing curve name resolved through the easing registry
  pub easing: String,
}

/// Declared iteration count for an animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IterationCount {
  Finite(f32),
  Infinite,
}

/// Keyframe playback direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationDirection {
  Normal,
  Reverse,
  Alternate,
  AlternateReverse,
}

impl AnimationDirection {
  pub fn from_keyword(word: &str) -> Option<Self> {
    match word {
      w if w.eq_ignore_ascii_case("normal") => Some(Self::Normal),
      w if w.eq_ignore_ascii_case("reverse") => Some(Self::Reverse),
      w if w.eq_ignore_ascii_case("alternate") => Some(Self::Alternate),
      w if w.eq_ignore_ascii_case("alternate-reverse") => Some(Self::AlternateReverse),
      _ => None,
    }
  }
}

/// What value an animation presents before its delay elapses and after it
/// finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
  None,
  Forwards,
  Backwards,
  Both,
}

impl FillMode {
  pub fn from_keyword(word: &str) -> Option<Self> {
    match word {
      w if w.eq_ignore_ascii_case("none") => Some(Self::None),
      w if w.eq_ignore_ascii_case("forwards") => Some(Self::Forwards),
      w if w.eq_ignore_ascii_case("backwards") => Some(Self::Backwards),
      w if w.eq_ignore_ascii_case("both") => Some(Self::Both),
      _ => None,
    }
  }

  /// True when the animation should present phase 0 during its delay
  pub fn fills_backwards(self) -> bool {
    matches!(self, Self::Backwards | Self::Both)
  }

  /// True when the animation should hold phase 1 after finishing
  pub fn fills_forwards(self) -> bool {
    matches!(self, Self::Forwards | Self::Both)
  }
}

/// Whether a declared animation is advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
  Running,
  Paused,
}

impl PlayState {
  pub fn from_keyword(word: &str) -> Option<Self> {
    match word {
      w if w.eq_ignore_ascii_case("running") => Some(Self::Running),
      w if w.eq_ignore_ascii_case("paused") => Some(Self::Paused),
      _ => None,
    }
  }
}

/// A declared keyframe animation and its playback parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSpec {
  /// Keyframe sequence name, resolved through the owning panel's provider
  pub name: String,
  /// Seconds per iteration
  pub duration: f32,
  /// Seconds before the first iteration starts
  pub delay: f32,
  pub iterations: IterationCount,
  pub direction: AnimationDirection,
  pub fill_mode: FillMode,
  pub play_state: PlayState,
  /// Timing function name resolved through the easing registry
  pub timing: String,
}

impl Default for AnimationSpec {
  fn default() -> Self {
    Self {
      name: String::new(),
      duration: 0.0,
      delay: 0.0,
      iterations: IterationCount::Finite(1.0),
      direction: AnimationDirection::Normal,
      fill_mode: FillMode::None,
      play_state: PlayState::Running,
      timing: "ease".to_string(),
    }
  }
}

/// Playback state for a declared animation, owned by the value table that
/// declared it. Reset whenever the referenced keyframe name changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationPlayback {
  /// Moment the animation was armed, in clock seconds. Advanced while the
  /// animation is paused so that elapsed time stands still.
  pub start: f64,
}

/// The original text of one property assignment, kept for diagnostics and
/// tooling only. Resolution never reads these.
#[derive(Debug, Clone, PartialEq)]
pub struct RawProperty {
  pub name: String,
  pub value: String,
  pub parsed: bool,
  pub line: u32,
}
