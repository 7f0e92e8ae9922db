//! Keyframe animation evaluation
//!
//! Each frame, the evaluator turns a declared animation plus the element's
//! clock into a single playback phase in `[0, 1]`, then asks the keyframe
//! sequence to fill an overlay table at that phase. Delay, iteration
//! clamping, direction folding, fill modes and pause all happen here; the
//! keyframe sequence itself stays a collaborator resolved by name through
//! the owning panel's provider.

use std::rc::Rc;

use crate::animation::easing::EasingRegistry;
use crate::animation::{DirtyFlag, FrameTick, KeyframeProvider};
use crate::style::properties::StyleValues;
use crate::style::types::{AnimationDirection, AnimationPlayback, IterationCount, PlayState};

/// Evaluates declared animations into overlay tables.
pub struct Animator {
  easing: Rc<EasingRegistry>,
  dirty: DirtyFlag,
}

impl Animator {
  /// Creates an evaluator that resolves timing-function names through
  /// `easing` and raises `dirty` on every active frame.
  pub fn new(easing: Rc<EasingRegistry>, dirty: DirtyFlag) -> Self {
    Self { easing, dirty }
  }

  /// Evaluates the animation declared on `style` at `tick`, filling
  /// `overlay` when the animation is active.
  ///
  /// Returns whether an overlay was produced. Inactive cases (no declared
  /// animation, unresolvable name, pre-delay without backwards fill,
  /// finished without forwards fill) produce nothing, and the element
  /// reverts to its un-animated resolved value.
  pub fn evaluate(
    &self,
    style: &mut StyleValues,
    keyframes: &dyn KeyframeProvider,
    tick: FrameTick,
    overlay: &mut StyleValues,
  ) -> bool {
    let Some(spec) = style.animation().cloned() else {
      return false;
    };
    if spec.name.is_empty() {
      return false;
    }
    let Some(sequence) = keyframes.lookup(&spec.name) else {
      // Legitimately inactive: the sequence may not have loaded yet.
      return false;
    };

    let armed_this_frame = style.animation_playback.is_none();
    let playback = style
      .animation_playback
      .get_or_insert(AnimationPlayback { start: tick.now });
    if spec.play_state == PlayState::Paused && !armed_this_frame {
      // Push the recorded start forward by one frame so elapsed time
      // stands still while paused.
      playback.start += tick.delta;
    }
    let elapsed = tick.now - playback.start;
    let play_length = elapsed - spec.delay as f64;
    let timing = self.easing.resolve(&spec.timing);

    if play_length < 0.0 {
      if spec.fill_mode.fills_backwards() {
        sequence.fill(timing.as_ref()(0.0), overlay);
        self.dirty.set(true);
        return true;
      }
      return false;
    }

    let duration = spec.duration.max(0.0) as f64;
    let total = match spec.iterations {
      IterationCount::Finite(count) => Some(count as f64 * duration),
      IterationCount::Infinite => None,
    };
    let finished = duration <= 0.0 || total.map_or(false, |total| play_length >= total);
    if finished {
      if spec.fill_mode.fills_forwards() {
        sequence.fill(timing.as_ref()(1.0), overlay);
        self.dirty.set(true);
        return true;
      }
      return false;
    }

    let play_length = total.map_or(play_length, |total| play_length.min(total));
    let mut phase = ((play_length % duration) / duration) as f32;
    match spec.direction {
      AnimationDirection::Normal => {}
      AnimationDirection::Reverse => phase = 1.0 - phase,
      AnimationDirection::Alternate | AnimationDirection::AlternateReverse => {
        // Fold a doubled period: the second half plays backwards.
        let folded = ((play_length % (2.0 * duration)) / duration) as f32;
        phase = if folded > 1.0 { 2.0 - folded } else { folded };
        if spec.direction == AnimationDirection::AlternateReverse {
          phase = 1.0 - phase;
        }
      }
    }

    sequence.fill(timing.as_ref()(phase.clamp(0.0, 1.0)), overlay);
    self.dirty.set(true);
    true
  }
}
