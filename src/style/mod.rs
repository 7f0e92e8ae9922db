//! Typed style storage and resolution
//!
//! The property schema, the per-element value table, the string setter and
//! the inherited-property cascade. See [`properties::StyleValues`] for the
//! table contract.

pub mod cascade;
pub mod color;
pub mod properties;
pub mod setter;
pub mod types;
pub mod values;

pub use cascade::apply_cascading;
pub use color::Rgba;
pub use properties::{
  property_by_name, slot_by_name, PropertyId, PropertyKind, PropertyMeta, PropertyValue,
  StyleSlot, StyleValues, PROPERTIES,
};
pub use setter::{set_property, set_property_at};
pub use values::{Length, LengthUnit};
