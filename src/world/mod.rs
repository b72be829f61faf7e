//! The [World] ties entities, their type index, systems and the event bus together.

mod world;
mod world_builder;

pub use world::*;
pub use world_builder::*;
