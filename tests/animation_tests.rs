use std::rc::Rc;

use faststyle::{
  new_dirty_flag, set_property, Animator, EasingRegistry, FrameTick, KeyframeProvider,
  KeyframeSequence, PropertyId, PropertyValue, StyleValues,
};
use rustc_hash::FxHashMap;

/// A fade sequence: opacity follows the phase directly.
struct Fade;

impl KeyframeSequence for Fade {
  fn fill(&self, phase: f32, overlay: &mut StyleValues) {
    overlay.set(PropertyId::Opacity, PropertyValue::Float(phase));
  }
}

#[derive(Default)]
struct Keyframes {
  sequences: FxHashMap<String, Box<dyn KeyframeSequence>>,
}

impl Keyframes {
  fn with_fade(name: &str) -> Self {
    let mut keyframes = Self::default();
    keyframes.sequences.insert(name.to_string(), Box::new(Fade));
    keyframes
  }
}

impl KeyframeProvider for Keyframes {
  fn lookup(&self, name: &str) -> Option<&dyn KeyframeSequence> {
    self.sequences.get(name).map(|s| s.as_ref())
  }
}

fn animator() -> Animator {
  Animator::new(Rc::new(EasingRegistry::new()), new_dirty_flag())
}

fn overlay_opacity(
  style: &mut StyleValues,
  keyframes: &Keyframes,
  now: f64,
) -> Option<f32> {
  let mut overlay = StyleValues::new();
  let active = animator().evaluate(style, keyframes, FrameTick::new(now, 1.0 / 60.0), &mut overlay);
  if !active {
    return None;
  }
  overlay.get(PropertyId::Opacity).and_then(|v| v.as_float())
}

#[test]
fn alternate_second_cycle_reverses_first() {
  // duration 2s, two iterations, alternate: elapsed 3s is the reverse of
  // elapsed 1s
  let keyframes = Keyframes::with_fade("fade");
  let mut style = StyleValues::new();
  set_property(&mut style, "animation", "fade 2s linear 2 alternate");

  // arm playback at t = 0
  assert_eq!(overlay_opacity(&mut style, &keyframes, 0.0), Some(0.0));
  let at_one = overlay_opacity(&mut style, &keyframes, 1.0).unwrap();
  let at_three = overlay_opacity(&mut style, &keyframes, 3.0).unwrap();
  assert!((at_three - (1.0 - at_one)).abs() < 1e-6);

  let at_half = overlay_opacity(&mut style, &keyframes, 0.5).unwrap();
  let reflected = overlay_opacity(&mut style, &keyframes, 2.5).unwrap();
  assert!((reflected - (1.0 - at_half)).abs() < 1e-6);
}

#[test]
fn fill_none_yields_inactive_every_frame_after_finish() {
  let keyframes = Keyframes::with_fade("fade");
  let mut style = StyleValues::new();
  set_property(&mut style, "animation", "fade 1s linear 2");

  assert!(overlay_opacity(&mut style, &keyframes, 0.0).is_some());
  for now in [2.0, 2.5, 3.0, 100.0] {
    assert_eq!(overlay_opacity(&mut style, &keyframes, now), None);
  }
}

#[test]
fn fill_forwards_keeps_presenting_the_end_value() {
  let keyframes = Keyframes::with_fade("fade");
  let mut style = StyleValues::new();
  set_property(&mut style, "animation", "fade 1s linear forwards");

  assert!(overlay_opacity(&mut style, &keyframes, 0.0).is_some());
  assert_eq!(overlay_opacity(&mut style, &keyframes, 5.0), Some(1.0));
  assert_eq!(overlay_opacity(&mut style, &keyframes, 50.0), Some(1.0));
}

#[test]
fn backwards_fill_presents_phase_zero_through_delay() {
  let keyframes = Keyframes::with_fade("fade");
  let mut style = StyleValues::new();
  set_property(&mut style, "animation", "fade 1s linear 2s both");

  assert_eq!(overlay_opacity(&mut style, &keyframes, 0.0), Some(0.0));
  assert_eq!(overlay_opacity(&mut style, &keyframes, 1.5), Some(0.0));
  let running = overlay_opacity(&mut style, &keyframes, 2.5).unwrap();
  assert!((running - 0.5).abs() < 1e-6);
}

#[test]
fn unresolved_sequence_is_silently_inactive() {
  let keyframes = Keyframes::with_fade("fade");
  let mut style = StyleValues::new();
  set_property(&mut style, "animation", "not-loaded-yet 1s linear");
  assert_eq!(overlay_opacity(&mut style, &keyframes, 0.0), None);
  // playback is not armed until the sequence resolves, so the animation
  // starts from its first frame once the sequence loads
  assert!(style.animation_playback.is_none());
}

#[test]
fn changing_the_animation_name_restarts_playback() {
  let keyframes = {
    let mut k = Keyframes::with_fade("first");
    k.sequences.insert("second".to_string(), Box::new(Fade));
    k
  };
  let mut style = StyleValues::new();
  set_property(&mut style, "animation", "first 2s linear");

  assert_eq!(overlay_opacity(&mut style, &keyframes, 10.0), Some(0.0));
  let midway = overlay_opacity(&mut style, &keyframes, 11.0).unwrap();
  assert!((midway - 0.5).abs() < 1e-6);

  // switching names re-arms: elapsed time starts over
  set_property(&mut style, "animation-name", "second");
  assert_eq!(overlay_opacity(&mut style, &keyframes, 11.5), Some(0.0));
}

#[test]
fn animation_overlay_merges_onto_resolved_style() {
  let keyframes = Keyframes::with_fade("fade");
  let mut style = StyleValues::new();
  set_property(&mut style, "animation", "fade 2s linear");
  set_property(&mut style, "width", "100px");
  style.fill_defaults();

  let mut overlay = StyleValues::new();
  let active = animator().evaluate(
    &mut style,
    &keyframes,
    FrameTick::new(0.0, 1.0 / 60.0),
    &mut overlay,
  );
  assert!(active);

  let mut resolved = style.clone();
  resolved.selective_merge_from(&overlay);
  assert_eq!(resolved.get(PropertyId::Opacity), Some(&PropertyValue::Float(0.0)));
  // properties the overlay never produced keep their resolved values
  assert_eq!(
    resolved.get(PropertyId::Width),
    style.get(PropertyId::Width)
  );
}

#[test]
fn paused_animation_holds_its_phase_while_clock_advances() {
  let keyframes = Keyframes::with_fade("fade");
  let mut style = StyleValues::new();
  set_property(&mut style, "animation", "fade 2s linear");

  assert_eq!(overlay_opacity(&mut style, &keyframes, 0.0), Some(0.0));
  let before_pause = overlay_opacity(&mut style, &keyframes, 0.5).unwrap();

  set_property(&mut style, "animation-play-state", "paused");
  let frame = 1.0 / 60.0;
  let mut now = 0.5;
  for _ in 0..30 {
    now += frame;
    let frozen = overlay_opacity(&mut style, &keyframes, now).unwrap();
    assert!((frozen - before_pause).abs() < 1e-3);
  }

  // resuming continues from the frozen phase, not from the wall clock
  set_property(&mut style, "animation-play-state", "running");
  let resumed = overlay_opacity(&mut style, &keyframes, now + 0.1).unwrap();
  assert!(resumed < 0.5, "resumed at {}", resumed);
}
