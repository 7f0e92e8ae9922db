//! Inherited-property cascade
//!
//! A fixed subset of properties flows from a parent's resolved table into a
//! child's unset slots: typography, color, text decoration and friends, the
//! cursor, and pointer behavior. Layout and box properties never cascade.
//!
//! The subset is driven by the `inherited` column of the property schema
//! plus the text-shadow composite. The copy is idempotent and never
//! overrides an explicitly set child value; the parent's values may
//! themselves already be cascaded.

use crate::style::properties::{StyleValues, PROPERTIES};

/// Copies inherited properties from `parent` into unset slots of `child`.
pub fn apply_cascading(child: &mut StyleValues, parent: &StyleValues) {
  for meta in PROPERTIES.iter().filter(|meta| meta.inherited) {
    if child.get(meta.id).is_none() {
      if let Some(value) = parent.get(meta.id) {
        child.set(meta.id, value.clone());
      }
    }
  }
  if child.text_shadows.is_none() && parent.text_shadows.is_some() {
    child.text_shadows = parent.text_shadows.clone();
    child.mark_dirty();
  }
}
