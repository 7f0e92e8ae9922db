//! Easing curves
//!
//! Transitions and animations name their easing curve; the scheduler and
//! evaluator resolve those names through an [`EasingRegistry`] passed in at
//! construction. The registry ships the standard named curves as
//! cubic-bezier presets, parses literal `cubic-bezier(x1, y1, x2, y2)`
//! values, and accepts custom registrations. Unknown names fall back to
//! linear with a warning rather than failing the whole transition.

use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::warn;

use crate::css::cursor::split_top_level_commas;

/// A resolved easing function mapping phase to eased phase.
pub type EasingFn = Rc<dyn Fn(f32) -> f32>;

/// A cubic bezier timing curve through (0,0) and (1,1).
///
/// Solved the usual way: Newton-Raphson on the x polynomial with a
/// bisection fallback for flat derivatives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
  pub x1: f32,
  pub y1: f32,
  pub x2: f32,
  pub y2: f32,
}

impl CubicBezier {
  pub const EASE: Self = Self::new(0.25, 0.1, 0.25, 1.0);
  pub const EASE_IN: Self = Self::new(0.42, 0.0, 1.0, 1.0);
  pub const EASE_OUT: Self = Self::new(0.0, 0.0, 0.58, 1.0);
  pub const EASE_IN_OUT: Self = Self::new(0.42, 0.0, 0.58, 1.0);

  pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
    Self { x1, y1, x2, y2 }
  }

  fn sample_x(&self, t: f32) -> f32 {
    let cx = 3.0 * self.x1;
    let bx = 3.0 * (self.x2 - self.x1) - cx;
    let ax = 1.0 - cx - bx;
    ((ax * t + bx) * t + cx) * t
  }

  fn sample_y(&self, t: f32) -> f32 {
    let cy = 3.0 * self.y1;
    let by = 3.0 * (self.y2 - self.y1) - cy;
    let ay = 1.0 - cy - by;
    ((ay * t + by) * t + cy) * t
  }

  fn sample_dx(&self, t: f32) -> f32 {
    let cx = 3.0 * self.x1;
    let bx = 3.0 * (self.x2 - self.x1) - cx;
    let ax = 1.0 - cx - bx;
    (3.0 * ax * t + 2.0 * bx) * t + cx
  }

  fn solve_t_for_x(&self, x: f32) -> f32 {
    const EPSILON: f32 = 1e-6;

    let mut t = x;
    for _ in 0..8 {
      let error = self.sample_x(t) - x;
      if error.abs() < EPSILON {
        return t;
      }
      let dx = self.sample_dx(t);
      if dx.abs() < EPSILON {
        break;
      }
      t -= error / dx;
    }

    // Newton failed to converge; bisect.
    let mut low = 0.0f32;
    let mut high = 1.0f32;
    t = x;
    while high - low > EPSILON {
      if self.sample_x(t) < x {
        low = t;
      } else {
        high = t;
      }
      t = (low + high) / 2.0;
    }
    t
  }

  /// Evaluates the curve at phase `x` in `[0, 1]`.
  pub fn solve(&self, x: f32) -> f32 {
    if x <= 0.0 {
      return 0.0;
    }
    if x >= 1.0 {
      return 1.0;
    }
    self.sample_y(self.solve_t_for_x(x))
  }

  fn to_fn(self) -> EasingFn {
    Rc::new(move |t| self.solve(t))
  }
}

/// Parses `cubic-bezier(x1, y1, x2, y2)`.
fn parse_cubic_bezier(name: &str) -> Option<CubicBezier> {
  let inner = name
    .strip_prefix("cubic-bezier(")
    .and_then(|rest| rest.strip_suffix(')'))?;
  let parts = split_top_level_commas(inner);
  if parts.len() != 4 {
    return None;
  }
  let mut values = [0.0f32; 4];
  for (slot, part) in values.iter_mut().zip(parts) {
    *slot = part.trim().parse::<f32>().ok().filter(|v| v.is_finite())?;
  }
  Some(CubicBezier::new(values[0], values[1], values[2], values[3]))
}

/// Named easing lookup.
pub struct EasingRegistry {
  curves: FxHashMap<String, EasingFn>,
  linear: EasingFn,
}

impl Default for EasingRegistry {
  fn default() -> Self {
    Self::new()
  }
}

impl EasingRegistry {
  /// Creates a registry with the standard named curves.
  pub fn new() -> Self {
    let linear: EasingFn = Rc::new(|t| t);
    let mut curves: FxHashMap<String, EasingFn> = FxHashMap::default();
    curves.insert("linear".to_string(), linear.clone());
    curves.insert("ease".to_string(), CubicBezier::EASE.to_fn());
    curves.insert("ease-in".to_string(), CubicBezier::EASE_IN.to_fn());
    curves.insert("ease-out".to_string(), CubicBezier::EASE_OUT.to_fn());
    curves.insert("ease-in-out".to_string(), CubicBezier::EASE_IN_OUT.to_fn());
    Self { curves, linear }
  }

  /// Registers (or replaces) a named curve.
  pub fn register(&mut self, name: &str, curve: EasingFn) {
    self.curves.insert(name.to_ascii_lowercase(), curve);
  }

  /// Resolves a curve name.
  ///
  /// Accepts registered names and literal `cubic-bezier(...)` values. An
  /// empty name resolves to linear silently; anything else unknown falls
  /// back to linear with a warning.
  pub fn resolve(&self, name: &str) -> EasingFn {
    let lowered = name.trim().to_ascii_lowercase();
    if lowered.is_empty() {
      return self.linear.clone();
    }
    if let Some(curve) = self.curves.get(&lowered) {
      return curve.clone();
    }
    if let Some(bezier) = parse_cubic_bezier(&lowered) {
      return bezier.to_fn();
    }
    warn!(easing = %name, "unknown easing curve, using linear");
    self.linear.clone()
  }
}
