//! Transition scheduling
//!
//! When an element's active style changes, the scheduler creates one entry
//! per transitioning property and blends it from the old value table to the
//! new one over the declared duration. Entries move through a small state
//! machine:
//!
//! pending (holds phase 0 through the delay) -> active (eased blend) ->
//! killed (forced to phase 1, rendered once more) -> removed.
//!
//! Entries snapshot both tables when created, so mutating the live tables
//! mid-flight cannot corrupt the blend. Each entry carries a deduplication
//! key derived from the destination table's value hash and the property:
//! re-requesting the same target while its entry is still in flight
//! restores that entry instead of restarting the blend, which is what keeps
//! rapid hover flips from popping.

use std::rc::Rc;

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::animation::easing::{EasingFn, EasingRegistry};
use crate::animation::interpolate::lerp_slot;
use crate::animation::DirtyFlag;
use crate::style::properties::{StyleSlot, StyleValues, PROPERTIES};
use crate::style::types::{TransitionSpec, TransitionTarget};

struct TransitionEntry {
  slot: StyleSlot,
  /// Start of the blend (declared start time plus delay), clock seconds
  start: f64,
  /// Blend duration in seconds
  length: f64,
  key: u64,
  from: Rc<StyleValues>,
  to: Rc<StyleValues>,
  easing: EasingFn,
  killed: bool,
}

/// Tracks the in-flight transitions of one element.
pub struct TransitionScheduler {
  entries: Vec<TransitionEntry>,
  easing: Rc<EasingRegistry>,
  dirty: DirtyFlag,
}

fn dedup_key(destination_hash: u64, slot: StyleSlot) -> u64 {
  let mut hasher = FxHasher::default();
  destination_hash.hash(&mut hasher);
  slot.hash(&mut hasher);
  hasher.finish()
}

fn slot_value_differs(from: &StyleValues, to: &StyleValues, slot: StyleSlot) -> bool {
  match slot {
    StyleSlot::Prop(id) => from.get(id) != to.get(id),
    StyleSlot::BoxShadows => from.box_shadows != to.box_shadows,
    StyleSlot::TextShadows => from.text_shadows != to.text_shadows,
    StyleSlot::BackgroundGradient => from.background_gradient != to.background_gradient,
    StyleSlot::Transform => from.transform != to.transform,
  }
}

fn all_slots() -> impl Iterator<Item = StyleSlot> {
  PROPERTIES
    .iter()
    .map(|meta| StyleSlot::Prop(meta.id))
    .chain([
      StyleSlot::BoxShadows,
      StyleSlot::TextShadows,
      StyleSlot::BackgroundGradient,
      StyleSlot::Transform,
    ])
}

/// Whether `spec` covers `slot`.
fn spec_covers(spec: &TransitionSpec, slot: StyleSlot) -> bool {
  match spec.target {
    TransitionTarget::All => true,
    TransitionTarget::Slot(s) => s == slot,
  }
}

impl TransitionScheduler {
  /// Creates a scheduler that resolves easing names through `easing` and
  /// raises `dirty` whenever the owner must repaint.
  pub fn new(easing: Rc<EasingRegistry>, dirty: DirtyFlag) -> Self {
    Self {
      entries: Vec::new(),
      easing,
      dirty,
    }
  }

  /// Number of tracked entries (pending, active and killed).
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Drops every entry without a final frame. Used when an element leaves
  /// the tree entirely; mid-flight cancellation goes through [`Self::kill`].
  pub fn clear(&mut self) {
    self.entries.clear();
  }

  /// Schedules transitions declared on `to` for every property whose value
  /// actually changes between `from` and `to`.
  ///
  /// Re-requesting a target that already has an in-flight entry restores
  /// that entry (un-kills it) instead of creating a duplicate, so the
  /// existing trajectory continues. Zero-length, zero-delay descriptors are
  /// discarded; the value change lands through the resolved style without
  /// an entry.
  pub fn add(&mut self, from: &StyleValues, to: &StyleValues, start_time: f64) {
    let Some(specs) = to.transitions.as_ref() else {
      return;
    };
    if specs.is_empty() {
      return;
    }

    let destination_hash = to.value_hash();
    let mut snapshots: Option<(Rc<StyleValues>, Rc<StyleValues>)> = None;

    for spec in specs {
      if spec.duration <= 0.0 && spec.delay <= 0.0 {
        continue;
      }
      for slot in all_slots().filter(|slot| spec_covers(spec, *slot)) {
        if !slot_value_differs(from, to, slot) {
          continue;
        }
        let key = dedup_key(destination_hash, slot);
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.key == key) {
          // Restore: the same destination was re-requested mid-flight.
          entry.killed = false;
          continue;
        }
        let (from_snapshot, to_snapshot) = snapshots
          .get_or_insert_with(|| (Rc::new(from.clone()), Rc::new(to.clone())))
          .clone();
        self.entries.push(TransitionEntry {
          slot,
          start: start_time + spec.delay as f64,
          length: spec.duration as f64,
          key,
          from: from_snapshot,
          to: to_snapshot,
          easing: self.easing.resolve(&spec.easing),
          killed: false,
        });
      }
    }
  }

  /// Marks every entry whose property is declared as transitioning on
  /// `from` as killed: each finishes instantly (phase 1) on its next
  /// evaluation and is then removed. Called when a different transition is
  /// about to claim those properties.
  pub fn kill(&mut self, from: &StyleValues) {
    let Some(specs) = from.transitions.as_ref() else {
      return;
    };
    for entry in &mut self.entries {
      if specs.iter().any(|spec| spec_covers(spec, entry.slot)) {
        entry.killed = true;
      }
    }
  }

  /// Evaluates every entry at `now`, writing blended values into `overlay`.
  ///
  /// Entries that ended before this frame are purged first; pending entries
  /// hold phase 0; killed entries evaluate once at phase 1 and are then
  /// purged. Every removal raises the dirty flag so the owner repaints the
  /// settled value. Returns whether any entry is still live.
  pub fn run(&mut self, overlay: &mut StyleValues, now: f64) -> bool {
    let before = self.entries.len();
    self
      .entries
      .retain(|entry| entry.killed || entry.start + entry.length >= now);
    if self.entries.len() != before {
      self.dirty.set(true);
    }

    for entry in &self.entries {
      let phase = if entry.killed {
        1.0
      } else if now < entry.start {
        0.0
      } else if entry.length <= 0.0 {
        1.0
      } else {
        let linear = ((now - entry.start) / entry.length).clamp(0.0, 1.0) as f32;
        entry.easing.as_ref()(linear)
      };
      lerp_slot(overlay, entry.slot, &entry.from, &entry.to, phase);
    }
    if !self.entries.is_empty() {
      self.dirty.set(true);
    }

    let before = self.entries.len();
    self.entries.retain(|entry| !entry.killed);
    if self.entries.len() != before {
      self.dirty.set(true);
    }

    !self.entries.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::animation::new_dirty_flag;
  use crate::style::properties::{PropertyId, PropertyValue};
  use crate::style::setter::set_property;
  use crate::style::values::Length;

  fn scheduler() -> TransitionScheduler {
    TransitionScheduler::new(Rc::new(EasingRegistry::new()), new_dirty_flag())
  }

  fn tables(from_width: f32, to_width: f32, transition: &str) -> (StyleValues, StyleValues) {
    let mut from = StyleValues::new();
    from.set(PropertyId::Width, PropertyValue::Length(Length::px(from_width)));
    let mut to = StyleValues::new();
    to.set(PropertyId::Width, PropertyValue::Length(Length::px(to_width)));
    set_property(&mut to, "transition", transition);
    (from, to)
  }

  fn overlay_width(scheduler: &mut TransitionScheduler, now: f64) -> Option<f32> {
    let mut overlay = StyleValues::new();
    scheduler.run(&mut overlay, now);
    overlay
      .get(PropertyId::Width)
      .and_then(|v| v.as_length())
      .map(|l| l.value)
  }

  #[test]
  fn test_linear_midpoint() {
    let (from, to) = tables(0.0, 100.0, "width 1s linear");
    let mut scheduler = scheduler();
    scheduler.add(&from, &to, 10.0);
    assert_eq!(overlay_width(&mut scheduler, 10.5), Some(50.0));
  }

  #[test]
  fn test_pre_delay_holds_phase_zero() {
    let (from, to) = tables(0.0, 100.0, "width 1s linear 0.5s");
    let mut scheduler = scheduler();
    scheduler.add(&from, &to, 10.0);
    // during the delay the blend holds the from value
    assert_eq!(overlay_width(&mut scheduler, 10.25), Some(0.0));
    assert_eq!(overlay_width(&mut scheduler, 11.0), Some(50.0));
  }

  #[test]
  fn test_no_entry_without_value_change() {
    let (from, to) = tables(50.0, 50.0, "width 1s linear");
    let mut scheduler = scheduler();
    scheduler.add(&from, &to, 0.0);
    assert!(scheduler.is_empty());
  }

  #[test]
  fn test_zero_duration_zero_delay_discarded() {
    let (from, to) = tables(0.0, 100.0, "width 0s linear");
    let mut scheduler = scheduler();
    scheduler.add(&from, &to, 0.0);
    assert!(scheduler.is_empty());
  }

  #[test]
  fn test_dedup_same_destination() {
    let (from, to) = tables(0.0, 100.0, "width 1s linear");
    let mut scheduler = scheduler();
    scheduler.add(&from, &to, 0.0);
    scheduler.add(&from, &to, 0.4);
    assert_eq!(scheduler.len(), 1);
  }

  #[test]
  fn test_boundary_equals_phase_one() {
    let (from, to) = tables(0.0, 100.0, "width 1s linear");
    let mut scheduler = scheduler();
    scheduler.add(&from, &to, 10.0);
    // exactly at start + length the entry is still evaluated, at phase 1
    assert_eq!(overlay_width(&mut scheduler, 11.0), Some(100.0));
  }

  #[test]
  fn test_expired_entries_are_purged() {
    let (from, to) = tables(0.0, 100.0, "width 1s linear");
    let mut scheduler = scheduler();
    scheduler.add(&from, &to, 10.0);
    let mut overlay = StyleValues::new();
    assert!(!scheduler.run(&mut overlay, 12.0));
    assert!(scheduler.is_empty());
    assert!(!overlay.is_set(PropertyId::Width));
  }

  #[test]
  fn test_killed_entry_finishes_then_removes() {
    let (from, to) = tables(0.0, 100.0, "width 10s linear");
    let mut scheduler = scheduler();
    scheduler.add(&from, &to, 0.0);
    scheduler.kill(&to);
    // one more frame at phase 1
    assert_eq!(overlay_width(&mut scheduler, 1.0), Some(100.0));
    assert!(scheduler.is_empty());
  }

  #[test]
  fn test_restore_unkills_existing_entry() {
    let (from, to) = tables(0.0, 100.0, "width 10s linear");
    let mut scheduler = scheduler();
    scheduler.add(&from, &to, 0.0);
    scheduler.kill(&to);
    // the same destination is requested again before the killed entry is
    // evaluated: the original trajectory continues
    scheduler.add(&from, &to, 1.0);
    assert_eq!(scheduler.len(), 1);
    assert_eq!(overlay_width(&mut scheduler, 5.0), Some(50.0));
    assert!(!scheduler.is_empty());
  }

  #[test]
  fn test_removal_raises_dirty_flag() {
    let (from, to) = tables(0.0, 100.0, "width 1s linear");
    let dirty = new_dirty_flag();
    let mut scheduler = TransitionScheduler::new(Rc::new(EasingRegistry::new()), dirty.clone());
    scheduler.add(&from, &to, 0.0);
    let mut overlay = StyleValues::new();
    scheduler.run(&mut overlay, 0.5);
    dirty.set(false);
    scheduler.run(&mut overlay, 2.0);
    assert!(dirty.get());
  }

  #[test]
  fn test_all_wildcard_blends_every_changed_property() {
    let mut from = StyleValues::new();
    from.set(PropertyId::Width, PropertyValue::Length(Length::px(0.0)));
    from.set(PropertyId::Opacity, PropertyValue::Float(0.0));
    let mut to = StyleValues::new();
    to.set(PropertyId::Width, PropertyValue::Length(Length::px(10.0)));
    to.set(PropertyId::Opacity, PropertyValue::Float(1.0));
    set_property(&mut to, "transition", "all 1s linear");

    let mut scheduler = scheduler();
    scheduler.add(&from, &to, 0.0);
    assert_eq!(scheduler.len(), 2);

    let mut overlay = StyleValues::new();
    scheduler.run(&mut overlay, 0.5);
    assert_eq!(overlay.get(PropertyId::Opacity), Some(&PropertyValue::Float(0.5)));
    assert_eq!(
      overlay.get(PropertyId::Width),
      Some(&PropertyValue::Length(Length::px(5.0)))
    );
  }

  #[test]
  fn test_snapshots_isolate_later_mutation() {
    let (from, mut to) = tables(0.0, 100.0, "width 1s linear");
    let mut scheduler = scheduler();
    scheduler.add(&from, &to, 0.0);
    // mutating the live destination after scheduling must not affect the
    // in-flight blend
    to.set(PropertyId::Width, PropertyValue::Length(Length::px(999.0)));
    assert_eq!(overlay_width(&mut scheduler, 0.5), Some(50.0));
  }
}
