//! Generic per-property interpolation
//!
//! One blend entry point serves both the transition scheduler and the
//! keyframe evaluator. The rules:
//!
//! - Both sides unset: the target slot is left untouched.
//! - One side unset: the property's default value stands in for the
//!   missing side (a color falls back to the schema's default color, a
//!   length to zero), keeping the blend continuous at both ends.
//! - Otherwise the typed values blend: numeric lerp for floats and ints,
//!   component-wise for colors, same-unit lerp for lengths, pairwise
//!   same-variant blending for transform lists, element-wise for shadow
//!   lists of equal length.
//!
//! Anything that cannot blend continuously falls back to discrete
//! stepping: the `from` value until the phase reaches 1, then `to`.

use crate::style::color::Rgba;
use crate::style::properties::{PropertyId, PropertyValue, StyleSlot, StyleValues};
use crate::style::types::{ColorStop, Gradient, Shadow, TransformOp};
use crate::style::values::Length;

/// Plain linear interpolation.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
  a + (b - a) * t
}

/// Component-wise color blend; channels round to the nearest 8-bit value.
pub fn lerp_color(a: Rgba, b: Rgba, t: f32) -> Rgba {
  let lerp_channel =
    |ca: u8, cb: u8| -> u8 { lerp(ca as f32, cb as f32, t).round().clamp(0.0, 255.0) as u8 };
  Rgba::new(
    lerp_channel(a.r, b.r),
    lerp_channel(a.g, b.g),
    lerp_channel(a.b, b.b),
    lerp(a.a, b.a, t),
  )
}

fn lerp_length(a: Length, b: Length, t: f32) -> Option<Length> {
  if a.unit == b.unit {
    Some(Length::new(lerp(a.value, b.value, t), a.unit))
  } else {
    None
  }
}

fn discrete<T: Clone>(from: &T, to: &T, t: f32) -> T {
  if t >= 1.0 {
    to.clone()
  } else {
    from.clone()
  }
}

/// Blends two typed values at a phase.
pub fn blend_values(from: &PropertyValue, to: &PropertyValue, t: f32) -> PropertyValue {
  match (from, to) {
    (PropertyValue::Float(a), PropertyValue::Float(b)) => PropertyValue::Float(lerp(*a, *b, t)),
    (PropertyValue::Int(a), PropertyValue::Int(b)) => {
      PropertyValue::Int(lerp(*a as f32, *b as f32, t).round() as i32)
    }
    (PropertyValue::Color(a), PropertyValue::Color(b)) => {
      PropertyValue::Color(lerp_color(*a, *b, t))
    }
    (PropertyValue::Length(a), PropertyValue::Length(b)) => match lerp_length(*a, *b, t) {
      Some(length) => PropertyValue::Length(length),
      None => discrete(from, to, t),
    },
    _ => discrete(from, to, t),
  }
}

fn blend_shadow(a: &Shadow, b: &Shadow, t: f32) -> Shadow {
  let blend_len = |x: Length, y: Length| lerp_length(x, y, t).unwrap_or(if t >= 1.0 { y } else { x });
  Shadow {
    offset_x: blend_len(a.offset_x, b.offset_x),
    offset_y: blend_len(a.offset_y, b.offset_y),
    blur: blend_len(a.blur, b.blur),
    spread: blend_len(a.spread, b.spread),
    color: lerp_color(a.color, b.color, t),
  }
}

fn blend_shadow_lists(a: &[Shadow], b: &[Shadow], t: f32) -> Option<Vec<Shadow>> {
  if a.len() != b.len() {
    return None;
  }
  Some(
    a.iter()
      .zip(b.iter())
      .map(|(sa, sb)| blend_shadow(sa, sb, t))
      .collect(),
  )
}

fn blend_transform_lists(a: &[TransformOp], b: &[TransformOp], t: f32) -> Option<Vec<TransformOp>> {
  if a.len() != b.len() {
    return None;
  }
  let mut out = Vec::with_capacity(a.len());
  for (ta, tb) in a.iter().zip(b.iter()) {
    let next = match (ta, tb) {
      (TransformOp::Translate(ax, ay), TransformOp::Translate(bx, by)) => TransformOp::Translate(
        lerp_length(*ax, *bx, t)?,
        lerp_length(*ay, *by, t)?,
      ),
      (TransformOp::Translate3d(ax, ay, az), TransformOp::Translate3d(bx, by, bz)) => {
        TransformOp::Translate3d(
          lerp_length(*ax, *bx, t)?,
          lerp_length(*ay, *by, t)?,
          lerp_length(*az, *bz, t)?,
        )
      }
      (TransformOp::Scale(ax, ay), TransformOp::Scale(bx, by)) => {
        TransformOp::Scale(lerp(*ax, *bx, t), lerp(*ay, *by, t))
      }
      (TransformOp::Scale3d(ax, ay, az), TransformOp::Scale3d(bx, by, bz)) => {
        TransformOp::Scale3d(lerp(*ax, *bx, t), lerp(*ay, *by, t), lerp(*az, *bz, t))
      }
      (TransformOp::Rotate(a), TransformOp::Rotate(b)) => TransformOp::Rotate(lerp(*a, *b, t)),
      (TransformOp::RotateX(a), TransformOp::RotateX(b)) => TransformOp::RotateX(lerp(*a, *b, t)),
      (TransformOp::RotateY(a), TransformOp::RotateY(b)) => TransformOp::RotateY(lerp(*a, *b, t)),
      (TransformOp::Skew(ax, ay), TransformOp::Skew(bx, by)) => {
        TransformOp::Skew(lerp(*ax, *bx, t), lerp(*ay, *by, t))
      }
      _ => return None,
    };
    out.push(next);
  }
  Some(out)
}

fn blend_stops(a: &[ColorStop], b: &[ColorStop], t: f32) -> Option<Vec<ColorStop>> {
  if a.len() != b.len() {
    return None;
  }
  let mut out = Vec::with_capacity(a.len());
  for (sa, sb) in a.iter().zip(b.iter()) {
    let position = match (sa.position, sb.position) {
      (Some(pa), Some(pb)) => Some(lerp_length(pa, pb, t)?),
      (None, None) => None,
      _ => return None,
    };
    out.push(ColorStop {
      color: lerp_color(sa.color, sb.color, t),
      position,
    });
  }
  Some(out)
}

fn blend_gradients(a: &Gradient, b: &Gradient, t: f32) -> Option<Gradient> {
  match (a, b) {
    (
      Gradient::Linear {
        angle: aa,
        stops: sa,
        repeating: ra,
      },
      Gradient::Linear {
        angle: ab,
        stops: sb,
        repeating: rb,
      },
    ) if ra == rb => Some(Gradient::Linear {
      angle: lerp(*aa, *ab, t),
      stops: blend_stops(sa, sb, t)?,
      repeating: *ra,
    }),
    (
      Gradient::Radial {
        stops: sa,
        repeating: ra,
      },
      Gradient::Radial {
        stops: sb,
        repeating: rb,
      },
    ) if ra == rb => Some(Gradient::Radial {
      stops: blend_stops(sa, sb, t)?,
      repeating: *ra,
    }),
    _ => None,
  }
}

/// Blends one schema property from `from` and `to` into `target`.
///
/// `default` stands in for whichever side is unset; when both are unset
/// the target is left untouched.
pub fn lerp_property(
  target: &mut StyleValues,
  id: PropertyId,
  from: &StyleValues,
  to: &StyleValues,
  default: &PropertyValue,
  phase: f32,
) {
  let result = match (from.get(id), to.get(id)) {
    (None, None) => return,
    (Some(a), Some(b)) => blend_values(a, b, phase),
    (Some(a), None) => blend_values(a, default, phase),
    (None, Some(b)) => blend_values(default, b, phase),
  };
  target.set(id, result);
}

/// Blends one addressable slot (schema property or composite).
pub fn lerp_slot(
  target: &mut StyleValues,
  slot: StyleSlot,
  from: &StyleValues,
  to: &StyleValues,
  phase: f32,
) {
  match slot {
    StyleSlot::Prop(id) => {
      let default = id.meta().default_value();
      lerp_property(target, id, from, to, &default, phase);
    }
    StyleSlot::BoxShadows => {
      let empty = Vec::new();
      let a = from.box_shadows.as_deref().unwrap_or(&empty);
      let b = to.box_shadows.as_deref().unwrap_or(&empty);
      let blended = blend_shadow_lists(a, b, phase)
        .unwrap_or_else(|| discrete(&a.to_vec(), &b.to_vec(), phase));
      target.box_shadows = Some(blended);
      target.mark_dirty();
    }
    StyleSlot::TextShadows => {
      let empty = Vec::new();
      let a = from.text_shadows.as_deref().unwrap_or(&empty);
      let b = to.text_shadows.as_deref().unwrap_or(&empty);
      let blended = blend_shadow_lists(a, b, phase)
        .unwrap_or_else(|| discrete(&a.to_vec(), &b.to_vec(), phase));
      target.text_shadows = Some(blended);
      target.mark_dirty();
    }
    StyleSlot::BackgroundGradient => {
      let blended = match (&from.background_gradient, &to.background_gradient) {
        (None, None) => return,
        (Some(a), Some(b)) => {
          Some(blend_gradients(a, b, phase).unwrap_or_else(|| discrete(a, b, phase)))
        }
        (Some(a), None) => {
          if phase >= 1.0 {
            None
          } else {
            Some(a.clone())
          }
        }
        (None, Some(b)) => {
          if phase >= 1.0 {
            Some(b.clone())
          } else {
            None
          }
        }
      };
      target.background_gradient = blended;
      target.mark_dirty();
    }
    StyleSlot::Transform => {
      let empty = Vec::new();
      let a = from.transform.as_deref().unwrap_or(&empty);
      let b = to.transform.as_deref().unwrap_or(&empty);
      let blended = blend_transform_lists(a, b, phase)
        .unwrap_or_else(|| discrete(&a.to_vec(), &b.to_vec(), phase));
      target.transform = Some(blended);
      target.mark_dirty();
    }
  }
}
