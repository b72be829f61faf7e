//! [Systems](System) provide the logic for modifying the state of [Entities](crate::entities::Entity)
//! and their associated [Components](crate::components::Component).
//!
//! A [System] must be added to a [World](crate::world::World), either directly or through a
//! [WorldBuilder](crate::world::WorldBuilder), for it to become active.

mod system;
mod system_store;

pub use system::*;
pub(crate) use system_store::*;
