//! The [TypeIndex] maps every component type and capability to the entities currently exposing it.

mod type_index;

pub use type_index::*;
