//! faststyle - a runtime style engine for retained-mode UIs.
//!
//! The crate resolves CSS-like property text into typed values and drives
//! those values through time:
//!
//! - [`StyleValues`] is the per-element table of typed, independently
//!   optional properties with fill-defaults / merge / clone / hash
//!   contracts.
//! - [`set_property`] and [`css::apply_style_text`] parse raw text into the
//!   table, expanding shorthands like `padding`, `border`, `background`
//!   and `flex`.
//! - [`apply_cascading`] copies the fixed inherited subset (typography,
//!   cursor, text decoration) from a parent's resolved table.
//! - [`TransitionScheduler`] blends between two value-table snapshots when
//!   the active style changes, with delay, easing, deduplication and
//!   graceful cancellation.
//! - [`Animator`] samples named keyframe sequences with the full set of
//!   playback parameters (iteration count, direction, fill mode, pause).
//!
//! Per frame, the scheduler and evaluator each produce an overlay table
//! that the owner merges onto the resolved style with
//! [`StyleValues::selective_merge_from`]; only explicitly produced
//! properties override.
//!
//! ```
//! use faststyle::{set_property, PropertyId, PropertyValue, StyleValues};
//!
//! let mut style = StyleValues::new();
//! assert!(set_property(&mut style, "padding", "4px 8px"));
//! assert_eq!(
//!     style.get(PropertyId::PaddingLeft),
//!     Some(&PropertyValue::Length(faststyle::Length::px(8.0)))
//! );
//! style.fill_defaults();
//! assert!(style.is_default("opacity").unwrap());
//! ```

pub mod animation;
pub mod css;
pub mod error;
pub mod style;

pub use error::{Error, Result};

pub use style::cascade::apply_cascading;
pub use style::color::Rgba;
pub use style::properties::{
  property_by_name, slot_by_name, PropertyId, PropertyKind, PropertyMeta, PropertyValue,
  StyleSlot, StyleValues, PROPERTIES,
};
pub use style::setter::{set_property, set_property_at};
pub use style::types::{
  AnimationDirection, AnimationPlayback, AnimationSpec, ColorStop, FillMode, Gradient,
  IterationCount, PlayState, RawProperty, Shadow, TransformOp, TransitionSpec, TransitionTarget,
};
pub use style::values::{Length, LengthUnit};

pub use animation::animator::Animator;
pub use animation::easing::{CubicBezier, EasingFn, EasingRegistry};
pub use animation::transition::TransitionScheduler;
pub use animation::{new_dirty_flag, DirtyFlag, FrameTick, KeyframeProvider, KeyframeSequence};
